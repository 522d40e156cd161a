use crate::core::event::EventBus;
use crate::core::food::{FoodCatalog, FoodSlot};
use crate::core::input::Input;
use crate::core::types::TableNumber;
use rand::rngs::StdRng;

use super::waiter::Waiter;

/// Shared resources handed to entities while they advance one cycle
pub struct CycleContext<'a> {
    pub rng: &'a mut StdRng,
    pub catalog: &'a FoodCatalog,
    pub events: &'a mut EventBus,
}

/// Per-cycle update trait for timer-driven entities
///
/// The cycle engine calls `cycle` once per tick, before any external input
/// of that tick is applied.
pub trait Cycle {
    type Output;

    /// Advance internal timers by `dt` seconds and perform due transitions
    fn cycle(&mut self, dt: f64, ctx: &mut CycleContext<'_>) -> Self::Output;
}

/// Result of the waiter interacting with something in the restaurant
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Open the order menu; the caller picks lines and submits `Input::OrderTaken`
    ShowOrders(Vec<FoodSlot>),
    /// The interaction resolves to this input
    Submit(Input),
    Nothing,
}

/// Capability of entities the waiter can interact with
pub trait Interactable {
    fn interaction(&self, waiter: &Waiter) -> Interaction;
}

/// Selects which interactable the waiter is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractTarget {
    Table(TableNumber),
    PrepStation,
    PrepSlot(usize),
}
