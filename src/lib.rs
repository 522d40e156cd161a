pub mod core;

// Re-export commonly used types
pub use crate::core::components::{InteractTarget, Interaction, Table};
pub use crate::core::config::DinerConfig;
pub use crate::core::errors::{SimError, SimResult};
pub use crate::core::event::{EventKind, EventProbe, SimEvent};
pub use crate::core::execution::{BatchRunner, CycleEngine, SessionReport, SimulationConfig, SimulationEngine};
pub use crate::core::input::Input;
pub use crate::core::types::{CustomerHandle, DeliveryHandle, FoodId, PrepSlotState, TableNumber, TableState};
