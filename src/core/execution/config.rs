//! Configuration for running restaurant sessions
//!
//! This module provides the execution settings that sit beside the
//! restaurant configuration: timestep, run length and how batches of
//! sessions are spread over threads.

use crate::core::errors::{SimError, SimResult};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// Sessions of a batch run one after another on the calling thread
    #[default]
    Sequential,
    /// Sessions of a batch run in parallel on a Rayon thread pool
    Rayon,
}

/// Configuration for session execution
///
/// A single session always runs on one thread; the concurrency mode only
/// affects batches of independent sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// The concurrency mode to use for batches
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel execution
    /// Only relevant when concurrency_mode is Rayon
    pub thread_pool_size: Option<usize>,
    /// Fixed timestep in seconds fed to every cycle
    pub timestep: f64,
    /// Number of cycles a run lasts
    pub max_cycles: Option<u64>,
}

impl SimulationConfig {
    /// Create a new configuration: sequential, 0.1s timestep, unbounded run
    pub fn new() -> Self {
        Self {
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
            timestep: 0.1,
            max_cycles: None,
        }
    }

    /// Set the concurrency mode for batches
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    /// Reject a non-positive timestep or an empty thread pool
    pub fn validate(&self) -> SimResult<()> {
        if !(self.timestep > 0.0) || !self.timestep.is_finite() {
            return Err(SimError::InvalidTimestep(self.timestep));
        }
        if self.thread_pool_size == Some(0) {
            return Err(SimError::ConfigurationRange(
                "thread_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Sequential);
        assert_eq!(config.thread_pool_size, None);
        assert_eq!(config.timestep, 0.1);
        assert_eq!(config.max_cycles, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_concurrency(ConcurrencyMode::Rayon)
            .with_thread_pool_size(4)
            .with_timestep(0.5)
            .with_max_cycles(100);

        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.thread_pool_size, Some(4));
        assert_eq!(config.timestep, 0.5);
        assert_eq!(config.max_cycles, Some(100));
    }

    #[test]
    fn test_concurrency_mode_default() {
        let mode = ConcurrencyMode::default();
        assert_eq!(mode, ConcurrencyMode::Sequential);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert_eq!(
            SimulationConfig::new().with_timestep(0.0).validate(),
            Err(SimError::InvalidTimestep(0.0))
        );
        assert!(SimulationConfig::new()
            .with_timestep(f64::NAN)
            .validate()
            .is_err());
        assert!(SimulationConfig::new()
            .with_thread_pool_size(0)
            .validate()
            .is_err());
    }
}
