use crate::core::config::PatienceConfig;

/// Bounded customer patience that decays while active
#[derive(Debug, Clone, PartialEq)]
pub struct PatienceTimer {
    value: f64,
    max: f64,
    decay_rate: f64,
    active: bool,
}

impl PatienceTimer {
    pub fn new(max: f64, decay_rate: f64) -> Self {
        Self {
            value: max,
            max,
            decay_rate,
            active: false,
        }
    }

    pub fn from_config(config: &PatienceConfig) -> Self {
        Self::new(config.patience_max, config.patience_decay_rate)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.value = self.max;
    }

    /// Decay by `dt` seconds if active
    pub fn advance(&mut self, dt: f64) {
        if self.active && dt > 0.0 {
            self.value = (self.value - self.decay_rate * dt).max(0.0);
        }
    }

    /// Raise patience, capped at the maximum
    pub fn increase(&mut self, amount: f64) {
        if amount > 0.0 {
            self.value = (self.value + amount).min(self.max);
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.value <= 0.0
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
