use crate::core::errors::{SimError, SimResult};
use crate::core::execution::autopilot::Autopilot;
use crate::core::execution::config::SimulationConfig;
use crate::core::execution::cycle_engine::CycleEngine;
use crate::core::score::ScoreBoard;
use serde::Serialize;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub cycles: u64,
    pub elapsed: f64,
    pub parties_spawned: u64,
    pub score: ScoreBoard,
}

/// Drives a [`CycleEngine`] with a fixed timestep, optionally playing the
/// waiter with an [`Autopilot`]
pub struct SimulationEngine {
    cycle_engine: CycleEngine,
    autopilot: Option<Autopilot>,
    timestep: f64,
    max_cycles: Option<u64>,
}

impl SimulationEngine {
    pub fn new(cycle_engine: CycleEngine, settings: &SimulationConfig) -> SimResult<Self> {
        settings.validate()?;

        Ok(Self {
            cycle_engine,
            autopilot: None,
            timestep: settings.timestep,
            max_cycles: settings.max_cycles,
        })
    }

    pub fn with_autopilot(mut self) -> Self {
        self.autopilot = Some(Autopilot::new());
        self
    }

    /// Run until `max_cycles` is reached
    pub fn run(&mut self) -> SimResult<u64> {
        let max = self.max_cycles.ok_or_else(|| {
            SimError::ConfigurationRange("run needs max_cycles to be set".to_string())
        })?;
        while self.current_cycle() < max {
            self.step()?;
        }
        Ok(self.current_cycle())
    }

    /// Run for `seconds` of session time, rounded up to whole timesteps
    pub fn run_for(&mut self, seconds: f64) -> SimResult<u64> {
        if !(seconds >= 0.0) || !seconds.is_finite() {
            return Err(SimError::InvalidTimestep(seconds));
        }
        let steps = (seconds / self.timestep).ceil() as u64;
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.current_cycle())
    }

    /// Let the autopilot act, then execute one cycle
    pub fn step(&mut self) -> SimResult<()> {
        if let Some(autopilot) = self.autopilot.as_mut() {
            autopilot.step(&mut self.cycle_engine)?;
        }
        self.cycle_engine.cycle(self.timestep)
    }

    pub fn current_cycle(&self) -> u64 {
        self.cycle_engine.current_cycle()
    }

    pub fn engine(&self) -> &CycleEngine {
        &self.cycle_engine
    }

    pub fn engine_mut(&mut self) -> &mut CycleEngine {
        &mut self.cycle_engine
    }

    pub fn into_engine(self) -> CycleEngine {
        self.cycle_engine
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            seed: self.cycle_engine.config().seed,
            cycles: self.current_cycle(),
            elapsed: self.cycle_engine.clock(),
            parties_spawned: self.cycle_engine.spawner().parties_spawned(),
            score: self.cycle_engine.score().clone(),
        }
    }
}
