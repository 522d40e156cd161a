use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a table within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableNumber(pub usize);

impl TableNumber {
    /// Position of the table in the session's table list
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a menu item; order lines and cooked food are matched on it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(String);

impl FoodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FoodId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for FoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for a customer agent spawned for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerHandle(Uuid);

impl CustomerHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CustomerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// Handle for one cooked food item on its way from the kitchen to a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryHandle(Uuid);

impl DeliveryHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeliveryHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeliveryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delivery_{}", self.0)
    }
}

/// Lifecycle of a table, from empty to paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableState {
    Available,
    Occupied,
    ReadyToOrder,
    WaitingForFood,
    Eating,
    ReadyToPay,
}

impl std::fmt::Display for TableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableState::Available => "Available",
            TableState::Occupied => "Occupied",
            TableState::ReadyToOrder => "ReadyToOrder",
            TableState::WaitingForFood => "WaitingForFood",
            TableState::Eating => "Eating",
            TableState::ReadyToPay => "ReadyToPay",
        };
        write!(f, "{}", name)
    }
}

/// Externally visible state of a single prep slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepSlotState {
    Idle,
    Cooking,
    Ready,
}

impl std::fmt::Display for PrepSlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrepSlotState::Idle => "Idle",
            PrepSlotState::Cooking => "Cooking",
            PrepSlotState::Ready => "Ready",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_id_display_and_conversion() {
        let id: FoodId = "burger".into();
        assert_eq!(id.as_str(), "burger");
        assert_eq!(id.to_string(), "burger");
        assert_eq!(id, FoodId::new(String::from("burger")));
    }

    #[test]
    fn test_handles_are_unique() {
        assert_ne!(CustomerHandle::new(), CustomerHandle::new());
        assert_ne!(DeliveryHandle::new(), DeliveryHandle::new());
    }

    #[test]
    fn test_table_number_index() {
        assert_eq!(TableNumber(3).index(), 3);
        assert_eq!(TableNumber(3).to_string(), "3");
    }
}
