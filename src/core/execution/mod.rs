pub mod autopilot;
pub mod batch;
pub mod config;
pub mod cycle_engine;
pub mod simulation_engine;

// Re-export commonly used types
pub use autopilot::Autopilot;
pub use batch::BatchRunner;
pub use config::{ConcurrencyMode, SimulationConfig};
pub use cycle_engine::CycleEngine;
pub use simulation_engine::{SessionReport, SimulationEngine};
