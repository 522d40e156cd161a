use super::types::{CustomerHandle, FoodId, PrepSlotState, TableNumber, TableState};
use thiserror::Error;

/// Errors raised by the restaurant core.
///
/// None of them is fatal to a session: the cycle engine logs rejected inputs
/// and keeps ticking, and an inconsistent table or slot can always be
/// recovered with a reset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// An event arrived for a table in a state that cannot accept it
    #[error("table {table}: cannot {action} while {state}")]
    InvalidTransition {
        table: TableNumber,
        state: TableState,
        action: &'static str,
    },
    /// A delivery did not match any current order of the table
    #[error("table {table}: no current order matches delivered {food}")]
    EmptyQueueUnderflow { table: TableNumber, food: FoodId },
    /// Attempt to start cooking on a slot that is not idle
    #[error("prep slot {slot} is {state}, cannot start cooking")]
    SlotCapacityViolation { slot: usize, state: PrepSlotState },
    /// Configuration value outside its allowed range
    #[error("configuration out of range: {0}")]
    ConfigurationRange(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
    #[error("i/o error: {0}")]
    Io(String),
    #[error("unknown table {0}")]
    UnknownTable(TableNumber),
    #[error("unknown prep slot {0}")]
    UnknownSlot(usize),
    /// The table has no unclaimed order line for the requested food
    #[error("table {table}: no outstanding order line for {food}")]
    UnknownOrderLine { table: TableNumber, food: FoodId },
    #[error("customer {customer} is already seated at table {table}")]
    CustomerAlreadySeated {
        customer: CustomerHandle,
        table: TableNumber,
    },
    #[error("waiter is already holding {0}")]
    HandsFull(FoodId),
    #[error("invalid timestep {0}")]
    InvalidTimestep(f64),
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::InvalidTransition {
            table: TableNumber(2),
            state: TableState::Occupied,
            action: "pay",
        };
        assert_eq!(err.to_string(), "table 2: cannot pay while Occupied");

        let err = SimError::SlotCapacityViolation {
            slot: 1,
            state: PrepSlotState::Cooking,
        };
        assert_eq!(err.to_string(), "prep slot 1 is Cooking, cannot start cooking");
    }
}
