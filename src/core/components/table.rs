//! Table lifecycle state machine.
//!
//! A table cycles `Available -> Occupied -> ReadyToOrder -> WaitingForFood ->
//! Eating -> (ReadyToOrder | ReadyToPay) -> Available`. Timed transitions are
//! driven by [`Cycle::cycle`]; the rest come from waiter and customer events.
//! Running out of patience sends the table back to `Available` from any
//! state without payment.

use crate::core::config::{DinerConfig, OrderConfig};
use crate::core::errors::{SimError, SimResult};
use crate::core::event::{EventBus, EventKind};
use crate::core::food::{FoodCatalog, FoodSlot};
use crate::core::input::Input;
use crate::core::memory::OrderMemory;
use crate::core::timer::{uniform_count, uniform_seconds, Countdown};
use crate::core::types::{CustomerHandle, FoodId, TableNumber, TableState};
use log::{debug, info};
use rand::Rng;

use super::patience::PatienceTimer;
use super::traits::{Cycle, CycleContext, Interactable, Interaction};
use super::waiter::Waiter;

/// Pending timed transition. At most one per table; entering a new phase
/// replaces the previous timer.
#[derive(Debug, Clone)]
enum Phase {
    Ordering(Countdown),
    Eating(Countdown),
}

/// Outcome of one table cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    Steady,
    PatienceExhausted,
}

/// Amount a table paid on leaving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment {
    pub table: TableNumber,
    pub amount: f64,
    /// Tip factor applied to the bill: `base_tip + base_tip * bonus_multiplier`
    pub tip: f64,
}

#[derive(Debug, Clone)]
pub struct Table {
    number: TableNumber,
    state: TableState,
    chairs: Vec<Option<CustomerHandle>>,
    reservation: Vec<CustomerHandle>,
    epoch: u64,
    all_orders: Vec<FoodSlot>,
    current_orders: Vec<FoodSlot>,
    total_pay: f64,
    base_tip: f64,
    bonus_multiplier: f64,
    patience: PatienceTimer,
    delivery_bonus: f64,
    phase: Option<Phase>,
    timing: OrderConfig,
}

impl Table {
    pub fn new(number: TableNumber, chairs: usize, config: &DinerConfig) -> Self {
        Self {
            number,
            state: TableState::Available,
            chairs: vec![None; chairs],
            reservation: Vec::new(),
            epoch: 0,
            all_orders: Vec::new(),
            current_orders: Vec::new(),
            total_pay: 0.0,
            base_tip: config.tip.base_tip,
            bonus_multiplier: config.tip.bonus_multiplier,
            patience: PatienceTimer::from_config(&config.patience),
            delivery_bonus: config.patience.patience_delivery_bonus,
            phase: None,
            timing: config.order.clone(),
        }
    }

    pub fn number(&self) -> TableNumber {
        self.number
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn chair_count(&self) -> usize {
        self.chairs.len()
    }

    pub fn occupied_chairs(&self) -> usize {
        self.chairs.iter().filter(|chair| chair.is_some()).count()
    }

    pub fn chair_occupant(&self, chair: usize) -> Option<CustomerHandle> {
        self.chairs.get(chair).copied().flatten()
    }

    pub fn customers(&self) -> impl Iterator<Item = CustomerHandle> + '_ {
        self.chairs.iter().filter_map(|chair| *chair)
    }

    /// Order lines not yet claimed by the waiter
    pub fn all_orders(&self) -> &[FoodSlot] {
        &self.all_orders
    }

    /// Claimed order lines awaiting delivery
    pub fn current_orders(&self) -> &[FoodSlot] {
        &self.current_orders
    }

    pub fn total_pay(&self) -> f64 {
        self.total_pay
    }

    pub fn base_tip(&self) -> f64 {
        self.base_tip
    }

    pub fn bonus_multiplier(&self) -> f64 {
        self.bonus_multiplier
    }

    pub fn patience(&self) -> &PatienceTimer {
        &self.patience
    }

    /// Incremented on every reset; arrivals scheduled before a reset carry a stale epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_reserved(&self) -> bool {
        !self.reservation.is_empty()
    }

    /// Seconds left on the pending order or eating countdown
    pub fn phase_remaining(&self) -> Option<f64> {
        match &self.phase {
            Some(Phase::Ordering(timer)) | Some(Phase::Eating(timer)) => Some(timer.remaining()),
            None => None,
        }
    }

    /// Available, empty and not promised to a party already on its way
    pub fn is_available_for_party(&self) -> bool {
        self.state == TableState::Available
            && self.reservation.is_empty()
            && self.occupied_chairs() == 0
    }

    /// Hold the table for a spawned party
    pub fn reserve(&mut self, party: Vec<CustomerHandle>) -> SimResult<()> {
        if !self.is_available_for_party() {
            return Err(self.invalid("reserve"));
        }
        debug!("[Table {}] Reserved for {} customers", self.number, party.len());
        self.reservation = party;
        Ok(())
    }

    /// Seat an arriving customer on the lowest free chair; the table becomes
    /// occupied once every chair is filled
    pub fn seat_customer<R: Rng + ?Sized>(
        &mut self,
        customer: CustomerHandle,
        rng: &mut R,
        events: &mut EventBus,
    ) -> SimResult<usize> {
        if self.state != TableState::Available {
            return Err(self.invalid("seat a customer"));
        }
        if self.chairs.contains(&Some(customer)) {
            return Err(self.invalid("seat the same customer twice"));
        }
        if self.is_reserved() && !self.reservation.contains(&customer) {
            return Err(self.invalid("seat a customer from another party"));
        }
        let chair = self
            .chairs
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| self.invalid("seat a customer at a full table"))?;

        self.chairs[chair] = Some(customer);
        debug!("[Table {}] {} sat on chair {}", self.number, customer, chair);
        events.emit(EventKind::CustomerSeated {
            table: self.number,
            customer,
            chair,
        });

        if self.chairs.iter().all(Option::is_some) {
            self.enable_customers(rng, events);
        }
        Ok(chair)
    }

    /// Move order lines from the table into the waiter's memory. All lines are
    /// resolved before anything changes, so a missing line leaves the table untouched.
    pub fn take_orders(
        &mut self,
        foods: &[FoodId],
        memory: &mut OrderMemory,
        events: &mut EventBus,
    ) -> SimResult<()> {
        if !matches!(
            self.state,
            TableState::ReadyToOrder | TableState::WaitingForFood
        ) {
            return Err(self.invalid("take an order"));
        }
        if foods.is_empty() {
            return Ok(());
        }

        let mut remaining = self.all_orders.clone();
        let mut taken = Vec::with_capacity(foods.len());
        for food in foods {
            let index = remaining
                .iter()
                .position(|line| line.matches(food))
                .ok_or_else(|| SimError::UnknownOrderLine {
                    table: self.number,
                    food: food.clone(),
                })?;
            taken.push(remaining.remove(index));
        }
        self.all_orders = remaining;

        for line in taken {
            events.emit(EventKind::OrderLineTaken {
                table: self.number,
                food: line.food().clone(),
            });
            memory.add_food(line.clone());
            self.current_orders.push(line);
        }

        if self.state != TableState::WaitingForFood {
            self.set_state(TableState::WaitingForFood, events);
        }
        Ok(())
    }

    /// Match a delivered food against the current orders, first match wins
    pub fn deliver_food<R: Rng + ?Sized>(
        &mut self,
        food: &FoodId,
        rng: &mut R,
        events: &mut EventBus,
    ) -> SimResult<()> {
        let index = self
            .current_orders
            .iter()
            .position(|line| line.matches(food))
            .ok_or_else(|| SimError::EmptyQueueUnderflow {
                table: self.number,
                food: food.clone(),
            })?;

        self.current_orders.remove(index);
        self.patience.increase(self.delivery_bonus);
        debug!(
            "[Table {}] Served {} ({} still expected)",
            self.number,
            food,
            self.current_orders.len()
        );
        events.emit(EventKind::FoodServed {
            table: self.number,
            food: food.clone(),
        });

        if self.current_orders.is_empty() {
            self.start_eating(rng, events);
        }
        Ok(())
    }

    /// Settle the bill and free the table
    pub fn pay(&mut self, events: &mut EventBus) -> SimResult<Payment> {
        if self.state != TableState::ReadyToPay {
            return Err(self.invalid("pay"));
        }

        let payment = self.final_pay();
        info!(
            "[Table {}] Paid {:.2} on a bill of {:.2} (tip factor {:.2})",
            self.number, payment.amount, self.total_pay, payment.tip
        );
        events.emit(EventKind::Paid {
            table: self.number,
            amount: payment.amount,
        });
        self.reset(events);
        Ok(payment)
    }

    /// What the table would pay right now
    pub fn final_pay(&self) -> Payment {
        let tip = self.base_tip + self.base_tip * self.bonus_multiplier;
        Payment {
            table: self.number,
            amount: self.total_pay * tip,
            tip,
        }
    }

    /// Return to `Available`: clear orders, chairs, reservation, bill and
    /// timers. Does not award any pay.
    pub fn reset(&mut self, events: &mut EventBus) {
        self.all_orders.clear();
        self.current_orders.clear();
        for chair in self.chairs.iter_mut() {
            *chair = None;
        }
        self.reservation.clear();
        self.patience.set_active(false);
        self.patience.reset();
        self.phase = None;
        self.total_pay = 0.0;
        self.epoch += 1;
        self.set_state(TableState::Available, events);
    }

    pub fn add_base_tip(&mut self, amount: f64) -> bool {
        if amount <= 0.0 || self.base_tip + amount > 1.0 {
            return false;
        }
        self.base_tip += amount;
        true
    }

    pub fn subtract_base_tip(&mut self, amount: f64) -> bool {
        if amount <= 0.0 || self.base_tip - amount < 0.0 {
            return false;
        }
        self.base_tip -= amount;
        true
    }

    pub fn add_bonus_multiplier(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return false;
        }
        self.bonus_multiplier += amount;
        true
    }

    pub fn subtract_bonus_multiplier(&mut self, amount: f64) -> bool {
        if amount <= 0.0 || self.bonus_multiplier - amount < 1.0 {
            return false;
        }
        self.bonus_multiplier -= amount;
        true
    }

    fn enable_customers<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut EventBus) {
        self.reservation.clear();
        self.patience.set_active(true);
        self.patience.reset();

        let delay = uniform_seconds(rng, self.timing.min_order_time, self.timing.max_order_time);
        self.phase = Some(Phase::Ordering(Countdown::new(delay)));
        self.set_state(TableState::Occupied, events);
    }

    fn order_food<R: Rng + ?Sized>(&mut self, rng: &mut R, catalog: &FoodCatalog, events: &mut EventBus) {
        let count = uniform_count(
            rng,
            self.timing.min_order_amount,
            self.timing.max_order_amount,
        );
        let lines: Vec<FoodSlot> = (0..count)
            .map(|_| FoodSlot::new(catalog.random_item(rng), self.number))
            .collect();

        self.total_pay += lines.iter().map(FoodSlot::price).sum::<f64>();
        self.all_orders = lines.clone();

        info!(
            "[Table {}] Ordered {} items, bill now {:.2}",
            self.number, count, self.total_pay
        );
        self.set_state(TableState::ReadyToOrder, events);
        events.emit(EventKind::OrderGenerated {
            table: self.number,
            lines,
        });
    }

    fn start_eating<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut EventBus) {
        self.patience.set_active(false);
        let duration = uniform_seconds(rng, self.timing.min_order_time, self.timing.max_order_time);
        self.phase = Some(Phase::Eating(Countdown::new(duration)));
        self.set_state(TableState::Eating, events);
    }

    fn finish_eating(&mut self, events: &mut EventBus) {
        let next = if self.all_orders.is_empty() {
            TableState::ReadyToPay
        } else {
            TableState::ReadyToOrder
        };
        self.patience.set_active(true);
        self.set_state(next, events);
    }

    fn set_state(&mut self, state: TableState, events: &mut EventBus) {
        debug!("[Table {}] {} -> {}", self.number, self.state, state);
        self.state = state;
        events.emit(EventKind::StateChanged {
            table: self.number,
            state,
        });
    }

    fn invalid(&self, action: &'static str) -> SimError {
        SimError::InvalidTransition {
            table: self.number,
            state: self.state,
            action,
        }
    }
}

impl Cycle for Table {
    type Output = TableOutcome;

    fn cycle(&mut self, dt: f64, ctx: &mut CycleContext<'_>) -> TableOutcome {
        self.patience.advance(dt);
        if self.patience.is_exhausted() {
            info!(
                "[Table {}] Patience exhausted while {}, customers leave",
                self.number, self.state
            );
            ctx.events.emit(EventKind::PatienceExhausted { table: self.number });
            self.reset(ctx.events);
            return TableOutcome::PatienceExhausted;
        }

        let expired = match &mut self.phase {
            Some(Phase::Ordering(timer)) | Some(Phase::Eating(timer)) => timer.advance(dt),
            None => false,
        };
        if expired {
            match self.phase.take() {
                Some(Phase::Ordering(_)) => self.order_food(&mut *ctx.rng, ctx.catalog, ctx.events),
                Some(Phase::Eating(_)) => self.finish_eating(ctx.events),
                None => {}
            }
        }
        TableOutcome::Steady
    }
}

impl Interactable for Table {
    fn interaction(&self, waiter: &Waiter) -> Interaction {
        // Food nobody here ordered does not stand in the way of orders or the bill
        if let Some(food) = waiter.hands() {
            if self.current_orders.iter().any(|line| line.matches(food.food())) {
                return Interaction::Submit(Input::FoodDelivered {
                    table: self.number,
                    food: food.food().clone(),
                    delivery: food.handle(),
                });
            }
        }

        match self.state {
            TableState::ReadyToOrder => Interaction::ShowOrders(self.all_orders.clone()),
            TableState::ReadyToPay => {
                Interaction::Submit(Input::PayRequested { table: self.number })
            }
            _ => Interaction::Nothing,
        }
    }
}
