use crate::core::components::traits::{InteractTarget, Interaction};
use crate::core::errors::SimResult;
use crate::core::types::{PrepSlotState, TableState};
use log::debug;

use super::cycle_engine::CycleEngine;

/// Scripted waiter used for unattended runs.
///
/// Each step performs at most one interaction, in priority order: deliver
/// the food in hand, pick up ready food, hand memorised orders to the
/// kitchen, collect a bill, take a table's order.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    actions: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interactions performed so far
    pub fn actions(&self) -> u64 {
        self.actions
    }

    pub fn step(&mut self, engine: &mut CycleEngine) -> SimResult<Option<InteractTarget>> {
        let target = self.choose(engine)?;
        if let Some(target) = target {
            match engine.interact(target)? {
                Interaction::ShowOrders(lines) => {
                    if let InteractTarget::Table(table) = target {
                        let foods = lines.iter().map(|line| line.food().clone()).collect();
                        engine.take_orders(table, foods);
                    }
                }
                Interaction::Submit(_) | Interaction::Nothing => {}
            }
            self.actions += 1;
        }
        Ok(target)
    }

    fn choose(&self, engine: &mut CycleEngine) -> SimResult<Option<InteractTarget>> {
        if let Some(held) = engine.waiter().hands() {
            let table = held.table();
            let wanted = engine
                .table(table)?
                .current_orders()
                .iter()
                .any(|line| line.matches(held.food()));
            if wanted {
                return Ok(Some(InteractTarget::Table(table)));
            }
            debug!("[Autopilot] Table {} no longer wants {}", table, held.food());
            engine.discard_held_food();
        }

        if let Some(slot) = engine
            .station()
            .slots()
            .iter()
            .find(|slot| slot.state() == PrepSlotState::Ready)
        {
            return Ok(Some(InteractTarget::PrepSlot(slot.index())));
        }

        if !engine.waiter().memory().is_empty() {
            return Ok(Some(InteractTarget::PrepStation));
        }

        let ready = |state: TableState| {
            engine
                .tables()
                .iter()
                .find(|table| table.state() == state)
                .map(|table| InteractTarget::Table(table.number()))
        };
        Ok(ready(TableState::ReadyToPay).or_else(|| ready(TableState::ReadyToOrder)))
    }
}
