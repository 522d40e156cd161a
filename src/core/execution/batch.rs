use crate::core::config::DinerConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::execution::config::{ConcurrencyMode, SimulationConfig};
use crate::core::execution::cycle_engine::CycleEngine;
use crate::core::execution::simulation_engine::{SessionReport, SimulationEngine};
use log::info;
use rayon::prelude::*;

/// Runs independent sessions that differ only by seed
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: DinerConfig,
    settings: SimulationConfig,
    autopilot: bool,
}

impl BatchRunner {
    pub fn new(config: DinerConfig, settings: SimulationConfig) -> Self {
        Self {
            config,
            settings,
            autopilot: true,
        }
    }

    pub fn with_autopilot(mut self, enabled: bool) -> Self {
        self.autopilot = enabled;
        self
    }

    /// One report per seed, in seed order
    pub fn run(&self, seeds: &[u64]) -> SimResult<Vec<SessionReport>> {
        self.settings.validate()?;
        info!(
            "[Batch] Running {} sessions ({:?})",
            seeds.len(),
            self.settings.concurrency_mode
        );

        match self.settings.concurrency_mode {
            ConcurrencyMode::Sequential => seeds.iter().map(|&seed| self.run_seed(seed)).collect(),
            ConcurrencyMode::Rayon => {
                let mut builder = rayon::ThreadPoolBuilder::new();
                if let Some(size) = self.settings.thread_pool_size {
                    builder = builder.num_threads(size);
                }
                let pool = builder
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?;
                pool.install(|| seeds.par_iter().map(|&seed| self.run_seed(seed)).collect())
            }
        }
    }

    pub fn run_seed(&self, seed: u64) -> SimResult<SessionReport> {
        let engine = CycleEngine::new(self.config.clone().with_seed(seed))?;
        let mut simulation = SimulationEngine::new(engine, &self.settings)?;
        if self.autopilot {
            simulation = simulation.with_autopilot();
        }
        simulation.run()?;
        Ok(simulation.report())
    }
}
