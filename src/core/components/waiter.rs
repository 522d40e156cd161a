use crate::core::errors::{SimError, SimResult};
use crate::core::food::PreparedFood;
use crate::core::memory::OrderMemory;

/// The player-controlled waiter: memorised orders plus at most one dish in hand
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    memory: OrderMemory,
    hands: Option<PreparedFood>,
}

impl Waiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &OrderMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut OrderMemory {
        &mut self.memory
    }

    pub fn hands(&self) -> Option<&PreparedFood> {
        self.hands.as_ref()
    }

    pub fn is_holding(&self) -> bool {
        self.hands.is_some()
    }

    pub fn pick_up(&mut self, food: PreparedFood) -> SimResult<()> {
        if let Some(held) = &self.hands {
            return Err(SimError::HandsFull(held.food().clone()));
        }
        self.hands = Some(food);
        Ok(())
    }

    pub fn put_down(&mut self) -> Option<PreparedFood> {
        self.hands.take()
    }
}
