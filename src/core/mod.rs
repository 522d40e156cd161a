pub mod components;
pub mod config;
pub mod errors;
pub mod event;
pub mod event_scheduler;
pub mod execution;
pub mod food;
pub mod input;
pub mod memory;
pub mod score;
pub mod timer;
pub mod types;
