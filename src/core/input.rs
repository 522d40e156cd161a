use super::types::{CustomerHandle, DeliveryHandle, FoodId, TableNumber};

/// External events fed to the session.
///
/// Inputs are queued and applied at the end of the next cycle, after every
/// timer-driven transition of that cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    CustomerArrived {
        table: TableNumber,
        customer: CustomerHandle,
    },
    FoodDelivered {
        table: TableNumber,
        food: FoodId,
        delivery: DeliveryHandle,
    },
    /// The waiter takes these order lines from the table in one action
    OrderTaken {
        table: TableNumber,
        foods: Vec<FoodId>,
    },
    PayRequested {
        table: TableNumber,
    },
    /// Hand the waiter's memorised orders to the prep station
    QueueMemorizedOrders,
    /// Pick up cooked food from a prep slot
    TakeFood {
        slot: usize,
    },
    ResetTable {
        table: TableNumber,
    },
}
