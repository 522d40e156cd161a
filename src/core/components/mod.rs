pub mod patience;
pub mod prep;
pub mod spawner;
pub mod table;
pub mod traits;
pub mod waiter;

// Re-export commonly used types
pub use patience::PatienceTimer;
pub use prep::{PrepSlot, PrepStation};
pub use spawner::{CustomerAgent, CustomerSpawner, SpawnedParty};
pub use table::{Payment, Table, TableOutcome};
pub use traits::{Cycle, CycleContext, InteractTarget, Interactable, Interaction};
pub use waiter::Waiter;
