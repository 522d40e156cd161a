//! Kitchen prep station: a fixed set of cooking slots fed by a FIFO queue.

use crate::core::errors::{SimError, SimResult};
use crate::core::event::{EventBus, EventKind};
use crate::core::food::{FoodSlot, PreparedFood};
use crate::core::input::Input;
use crate::core::memory::OrderMemory;
use crate::core::timer::Countdown;
use crate::core::types::PrepSlotState;
use log::{debug, warn};
use std::collections::VecDeque;

use super::traits::{Cycle, CycleContext, Interactable, Interaction};
use super::waiter::Waiter;

#[derive(Debug, Clone)]
enum SlotStage {
    Idle,
    Cooking { order: FoodSlot, timer: Countdown },
    Ready { order: FoodSlot, food: PreparedFood },
}

/// A single cooking bay holding at most one order
#[derive(Debug, Clone)]
pub struct PrepSlot {
    index: usize,
    stage: SlotStage,
}

impl PrepSlot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            stage: SlotStage::Idle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PrepSlotState {
        match self.stage {
            SlotStage::Idle => PrepSlotState::Idle,
            SlotStage::Cooking { .. } => PrepSlotState::Cooking,
            SlotStage::Ready { .. } => PrepSlotState::Ready,
        }
    }

    /// The order assigned to this slot, if any
    pub fn order(&self) -> Option<&FoodSlot> {
        match &self.stage {
            SlotStage::Idle => None,
            SlotStage::Cooking { order, .. } | SlotStage::Ready { order, .. } => Some(order),
        }
    }

    /// Cooked food waiting to be picked up
    pub fn ready_food(&self) -> Option<&PreparedFood> {
        match &self.stage {
            SlotStage::Ready { food, .. } => Some(food),
            _ => None,
        }
    }

    /// Cooking progress in [0, 1], only while cooking
    pub fn progress(&self) -> Option<f64> {
        match &self.stage {
            SlotStage::Cooking { timer, .. } => Some(timer.progress()),
            _ => None,
        }
    }

    /// Start cooking an order; the slot must be idle
    pub fn start(&mut self, order: FoodSlot, events: &mut EventBus) -> SimResult<()> {
        if !matches!(self.stage, SlotStage::Idle) {
            return Err(SimError::SlotCapacityViolation {
                slot: self.index,
                state: self.state(),
            });
        }

        debug!(
            "[PrepSlot {}] Cooking {} for table {} ({}s)",
            self.index,
            order.food(),
            order.table(),
            order.prep_time()
        );
        events.emit(EventKind::CookingStarted {
            slot: self.index,
            table: order.table(),
            food: order.food().clone(),
        });
        let timer = Countdown::new(order.prep_time());
        self.stage = SlotStage::Cooking { order, timer };
        Ok(())
    }

    /// Advance the cooking countdown; returns true when the food just became ready
    pub fn advance(&mut self, dt: f64, events: &mut EventBus) -> bool {
        let done = match &mut self.stage {
            SlotStage::Cooking { timer, .. } => timer.advance(dt),
            _ => false,
        };
        if !done {
            return false;
        }

        let stage = std::mem::replace(&mut self.stage, SlotStage::Idle);
        if let SlotStage::Cooking { order, .. } = stage {
            let food = PreparedFood::from_order(&order);
            debug!(
                "[PrepSlot {}] {} ready for table {}",
                self.index,
                food.food(),
                food.table()
            );
            events.emit(EventKind::FoodReady {
                slot: self.index,
                table: food.table(),
                food: food.food().clone(),
            });
            self.stage = SlotStage::Ready { order, food };
        }
        true
    }

    /// Claim the cooked food. No-op while cooking or idle.
    pub fn take_food(&mut self) -> Option<PreparedFood> {
        if !matches!(self.stage, SlotStage::Ready { .. }) {
            return None;
        }
        match std::mem::replace(&mut self.stage, SlotStage::Idle) {
            SlotStage::Ready { food, .. } => Some(food),
            _ => None,
        }
    }

    /// Return to idle unconditionally, discarding any order or food
    pub fn reset(&mut self) -> Option<FoodSlot> {
        match std::mem::replace(&mut self.stage, SlotStage::Idle) {
            SlotStage::Idle => None,
            SlotStage::Cooking { order, .. } | SlotStage::Ready { order, .. } => Some(order),
        }
    }
}

impl Interactable for PrepSlot {
    fn interaction(&self, waiter: &Waiter) -> Interaction {
        if self.state() == PrepSlotState::Ready && !waiter.is_holding() {
            Interaction::Submit(Input::TakeFood { slot: self.index })
        } else {
            Interaction::Nothing
        }
    }
}

/// Fixed set of prep slots plus an unbounded FIFO of orders waiting for one
#[derive(Debug, Clone)]
pub struct PrepStation {
    slots: Vec<PrepSlot>,
    queue: VecDeque<FoodSlot>,
}

impl PrepStation {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(PrepSlot::new).collect(),
            queue: VecDeque::new(),
        }
    }

    pub fn slots(&self) -> &[PrepSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> SimResult<&PrepSlot> {
        self.slots.get(index).ok_or(SimError::UnknownSlot(index))
    }

    /// Orders waiting for a free slot, front first
    pub fn queue(&self) -> impl Iterator<Item = &FoodSlot> {
        self.queue.iter()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Orders not yet finished: queued plus cooking
    pub fn outstanding(&self) -> usize {
        self.queue.len()
            + self
                .slots
                .iter()
                .filter(|slot| slot.state() == PrepSlotState::Cooking)
                .count()
    }

    pub fn queue_order(&mut self, order: FoodSlot, events: &mut EventBus) {
        self.queue.push_back(order);
        self.settle_queue(events);
    }

    /// Move every memorised order into the queue in one hand-off
    pub fn queue_from_memory(&mut self, memory: &mut OrderMemory, events: &mut EventBus) -> usize {
        let orders = memory.take_all();
        if orders.is_empty() {
            return 0;
        }

        let count = orders.len();
        self.queue.extend(orders);
        debug!("[PrepStation] Queued {} orders ({} pending)", count, self.queue.len());
        self.settle_queue(events);
        count
    }

    /// Assign after growing the queue; one `QueueChanged` either way
    fn settle_queue(&mut self, events: &mut EventBus) {
        if self.assign_free_slots(events) == 0 {
            events.emit(EventKind::QueueChanged {
                pending: self.queue.len(),
            });
        }
    }

    /// Start queued orders on idle slots, scanning slots in index order.
    /// Calling it again without a state change does nothing.
    pub fn assign_free_slots(&mut self, events: &mut EventBus) -> usize {
        let mut assigned = 0;

        for slot in self.slots.iter_mut() {
            if self.queue.is_empty() {
                break;
            }
            if slot.state() != PrepSlotState::Idle {
                continue;
            }
            if let Some(order) = self.queue.pop_front() {
                if let Err(error) = slot.start(order.clone(), events) {
                    warn!("[PrepStation] {}", error);
                    self.queue.push_front(order);
                    continue;
                }
                assigned += 1;
            }
        }

        if assigned > 0 {
            events.emit(EventKind::QueueChanged {
                pending: self.queue.len(),
            });
        }
        assigned
    }

    /// Pick up cooked food from a slot, then refill free slots
    pub fn take_food(&mut self, index: usize, events: &mut EventBus) -> SimResult<Option<PreparedFood>> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SimError::UnknownSlot(index))?;
        let food = slot.take_food();

        if let Some(food) = &food {
            events.emit(EventKind::FoodTaken {
                slot: index,
                table: food.table(),
                food: food.food().clone(),
                delivery: food.handle(),
            });
            self.assign_free_slots(events);
        }
        Ok(food)
    }

    /// Force a slot back to idle, discarding its order, then refill free slots
    pub fn reset_slot(&mut self, index: usize, events: &mut EventBus) -> SimResult<Option<FoodSlot>> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SimError::UnknownSlot(index))?;
        let discarded = slot.reset();
        if let Some(order) = &discarded {
            warn!(
                "[PrepSlot {}] Reset, discarding {} for table {}",
                index,
                order.food(),
                order.table()
            );
        }
        self.assign_free_slots(events);
        Ok(discarded)
    }
}

impl Cycle for PrepStation {
    type Output = usize;

    /// Advance every cooking slot; returns how many finished this cycle
    fn cycle(&mut self, dt: f64, ctx: &mut CycleContext<'_>) -> usize {
        let mut finished = 0;
        for slot in self.slots.iter_mut() {
            if slot.advance(dt, ctx.events) {
                finished += 1;
            }
        }
        finished
    }
}

impl Interactable for PrepStation {
    fn interaction(&self, waiter: &Waiter) -> Interaction {
        if waiter.memory().is_empty() {
            Interaction::Nothing
        } else {
            Interaction::Submit(Input::QueueMemorizedOrders)
        }
    }
}
