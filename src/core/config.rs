//! Restaurant configuration.
//!
//! Every section has a playable default and can be overridden from TOML.
//! [`DinerConfig::validated`] swaps inverted ranges (logging a warning) and
//! rejects values outside their domain.

use super::errors::{SimError, SimResult};
use super::food::{FoodCatalog, MenuItem};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub chairs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Bounds in seconds for both the order delay and the eating time
    pub min_order_time: f64,
    pub max_order_time: f64,
    /// Bounds on the number of lines a table orders at once
    pub min_order_amount: u32,
    pub max_order_amount: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            min_order_time: 5.0,
            max_order_time: 20.0,
            min_order_amount: 1,
            max_order_amount: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipConfig {
    pub base_tip: f64,
    pub bonus_multiplier: f64,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            base_tip: 0.15,
            bonus_multiplier: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub enabled: bool,
    /// Bounds in seconds between two spawn attempts
    pub spawn_rate_min: f64,
    pub spawn_rate_max: f64,
    /// Bounds in seconds for a customer to walk to its table
    pub travel_time_min: f64,
    pub travel_time_max: f64,
    /// Schedule arrivals internally; disable when navigation is driven externally
    pub simulate_arrivals: bool,
    pub archetypes: Vec<String>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_rate_min: 20.0,
            spawn_rate_max: 30.0,
            travel_time_min: 2.0,
            travel_time_max: 6.0,
            simulate_arrivals: true,
            archetypes: vec![
                "regular".to_string(),
                "tourist".to_string(),
                "critic".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub prep_slot_count: usize,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self { prep_slot_count: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatienceConfig {
    pub patience_max: f64,
    /// Patience lost per second while decaying
    pub patience_decay_rate: f64,
    /// Patience regained per correctly delivered food
    pub patience_delivery_bonus: f64,
}

impl Default for PatienceConfig {
    fn default() -> Self {
        Self {
            patience_max: 1.0,
            patience_decay_rate: 0.01,
            patience_delivery_bonus: 0.1,
        }
    }
}

/// Complete configuration of a restaurant session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DinerConfig {
    pub seed: u64,
    pub tables: Vec<TableLayout>,
    pub menu: Vec<MenuItem>,
    pub order: OrderConfig,
    pub tip: TipConfig,
    pub spawn: SpawnConfig,
    pub kitchen: KitchenConfig,
    pub patience: PatienceConfig,
}

impl Default for DinerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tables: [2, 2, 4, 4]
                .iter()
                .map(|&chairs| TableLayout { chairs })
                .collect(),
            menu: vec![
                MenuItem::new("burger", 12.0, 6.0),
                MenuItem::new("fries", 4.5, 3.0),
                MenuItem::new("salad", 8.0, 4.0),
                MenuItem::new("pasta", 14.0, 8.0),
                MenuItem::new("soup", 6.5, 5.0),
            ],
            order: OrderConfig::default(),
            tip: TipConfig::default(),
            spawn: SpawnConfig::default(),
            kitchen: KitchenConfig::default(),
            patience: PatienceConfig::default(),
        }
    }
}

impl DinerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> SimResult<Self> {
        let config: DinerConfig =
            toml::from_str(source).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        config.validated()
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SimError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> SimResult<String> {
        toml::to_string(self).map_err(|e| SimError::ConfigParse(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tables(mut self, chairs: &[usize]) -> Self {
        self.tables = chairs.iter().map(|&chairs| TableLayout { chairs }).collect();
        self
    }

    pub fn with_menu(mut self, menu: Vec<MenuItem>) -> Self {
        self.menu = menu;
        self
    }

    pub fn with_order_time(mut self, min: f64, max: f64) -> Self {
        self.order.min_order_time = min;
        self.order.max_order_time = max;
        self
    }

    pub fn with_order_amount(mut self, min: u32, max: u32) -> Self {
        self.order.min_order_amount = min;
        self.order.max_order_amount = max;
        self
    }

    pub fn with_tip(mut self, base_tip: f64, bonus_multiplier: f64) -> Self {
        self.tip.base_tip = base_tip;
        self.tip.bonus_multiplier = bonus_multiplier;
        self
    }

    pub fn with_spawn_rate(mut self, min: f64, max: f64) -> Self {
        self.spawn.spawn_rate_min = min;
        self.spawn.spawn_rate_max = max;
        self
    }

    pub fn with_travel_time(mut self, min: f64, max: f64) -> Self {
        self.spawn.travel_time_min = min;
        self.spawn.travel_time_max = max;
        self
    }

    pub fn with_spawning(mut self, enabled: bool) -> Self {
        self.spawn.enabled = enabled;
        self
    }

    pub fn with_prep_slots(mut self, count: usize) -> Self {
        self.kitchen.prep_slot_count = count;
        self
    }

    pub fn with_patience(mut self, max: f64, decay_rate: f64, delivery_bonus: f64) -> Self {
        self.patience.patience_max = max;
        self.patience.patience_decay_rate = decay_rate;
        self.patience.patience_delivery_bonus = delivery_bonus;
        self
    }

    /// Normalise inverted ranges and reject out-of-domain values
    pub fn validated(mut self) -> SimResult<Self> {
        check_seconds("min_order_time", self.order.min_order_time)?;
        check_seconds("max_order_time", self.order.max_order_time)?;
        check_seconds("spawn_rate_min", self.spawn.spawn_rate_min)?;
        check_seconds("spawn_rate_max", self.spawn.spawn_rate_max)?;
        check_seconds("travel_time_min", self.spawn.travel_time_min)?;
        check_seconds("travel_time_max", self.spawn.travel_time_max)?;

        swap_if_inverted(
            "order amount",
            &mut self.order.min_order_amount,
            &mut self.order.max_order_amount,
        );
        swap_if_inverted(
            "order time",
            &mut self.order.min_order_time,
            &mut self.order.max_order_time,
        );
        swap_if_inverted(
            "spawn rate",
            &mut self.spawn.spawn_rate_min,
            &mut self.spawn.spawn_rate_max,
        );
        swap_if_inverted(
            "travel time",
            &mut self.spawn.travel_time_min,
            &mut self.spawn.travel_time_max,
        );

        if self.order.min_order_amount == 0 {
            return Err(SimError::ConfigurationRange(
                "min_order_amount must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tip.base_tip) {
            return Err(SimError::ConfigurationRange(format!(
                "base_tip must be within [0, 1], got {}",
                self.tip.base_tip
            )));
        }
        if !(self.tip.bonus_multiplier >= 1.0) || !self.tip.bonus_multiplier.is_finite() {
            return Err(SimError::ConfigurationRange(format!(
                "bonus_multiplier must be at least 1, got {}",
                self.tip.bonus_multiplier
            )));
        }
        if self.kitchen.prep_slot_count == 0 {
            return Err(SimError::ConfigurationRange(
                "prep_slot_count must be at least 1".to_string(),
            ));
        }
        if self.tables.is_empty() {
            return Err(SimError::ConfigurationRange(
                "at least one table is required".to_string(),
            ));
        }
        if let Some(index) = self.tables.iter().position(|t| t.chairs == 0) {
            return Err(SimError::ConfigurationRange(format!(
                "table {} has no chairs",
                index
            )));
        }
        if !(self.patience.patience_max > 0.0) || !self.patience.patience_max.is_finite() {
            return Err(SimError::ConfigurationRange(format!(
                "patience_max must be positive, got {}",
                self.patience.patience_max
            )));
        }
        check_seconds("patience_decay_rate", self.patience.patience_decay_rate)?;
        check_seconds(
            "patience_delivery_bonus",
            self.patience.patience_delivery_bonus,
        )?;
        if self.spawn.archetypes.is_empty() {
            self.spawn.archetypes.push("regular".to_string());
        }

        FoodCatalog::new(self.menu.clone())?;

        Ok(self)
    }

    pub fn catalog(&self) -> SimResult<FoodCatalog> {
        FoodCatalog::new(self.menu.clone())
    }
}

fn check_seconds(name: &str, value: f64) -> SimResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::ConfigurationRange(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn swap_if_inverted<T: PartialOrd + std::fmt::Display>(name: &str, min: &mut T, max: &mut T) {
    if *min > *max {
        warn!(
            "[Config] {} bounds inverted (min {} > max {}), swapping",
            name, min, max
        );
        std::mem::swap(min, max);
    }
}
