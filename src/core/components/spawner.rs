//! Periodic customer spawning.

use crate::core::config::SpawnConfig;
use crate::core::event::{EventBus, EventKind};
use crate::core::timer::{uniform_seconds, Countdown};
use crate::core::types::{CustomerHandle, TableNumber};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use super::table::Table;

/// A customer walking to its table
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAgent {
    pub handle: CustomerHandle,
    pub table: TableNumber,
    pub archetype: String,
    /// Seconds until the customer reaches the table
    pub travel_time: f64,
}

/// One party sent to a table, one agent per chair
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedParty {
    pub table: TableNumber,
    pub customers: Vec<CustomerAgent>,
}

#[derive(Debug, Clone)]
pub struct CustomerSpawner {
    next_spawn: Countdown,
    rate_min: f64,
    rate_max: f64,
    travel_min: f64,
    travel_max: f64,
    archetypes: Vec<String>,
    enabled: bool,
    parties_spawned: u64,
}

impl CustomerSpawner {
    /// The first spawn attempt happens on the first cycle
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            next_spawn: Countdown::new(0.0),
            rate_min: config.spawn_rate_min,
            rate_max: config.spawn_rate_max,
            travel_min: config.travel_time_min,
            travel_max: config.travel_time_max,
            archetypes: config.archetypes.clone(),
            enabled: config.enabled,
            parties_spawned: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Seconds until the next spawn attempt
    pub fn next_spawn_in(&self) -> f64 {
        self.next_spawn.remaining()
    }

    pub fn parties_spawned(&self) -> u64 {
        self.parties_spawned
    }

    /// Advance the spawn interval. When it expires the interval is re-rolled
    /// and, if some table is free, a party is sent to one chosen uniformly
    /// among the free tables. The chosen table is reserved for that party.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        tables: &mut [Table],
        rng: &mut R,
        events: &mut EventBus,
    ) -> Option<SpawnedParty> {
        if !self.enabled || !self.next_spawn.advance(dt) {
            return None;
        }
        self.next_spawn = Countdown::new(uniform_seconds(rng, self.rate_min, self.rate_max));

        let candidates: Vec<usize> = tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.is_available_for_party())
            .map(|(index, _)| index)
            .collect();
        let Some(&index) = candidates.choose(rng) else {
            debug!(
                "[Spawner] No free table, next attempt in {:.1}s",
                self.next_spawn.duration()
            );
            return None;
        };

        let table = &mut tables[index];
        let customers: Vec<CustomerAgent> = (0..table.chair_count())
            .map(|_| CustomerAgent {
                handle: CustomerHandle::new(),
                table: table.number(),
                archetype: self
                    .archetypes
                    .choose(rng)
                    .cloned()
                    .unwrap_or_else(|| "regular".to_string()),
                travel_time: uniform_seconds(rng, self.travel_min, self.travel_max),
            })
            .collect();

        let party: Vec<CustomerHandle> = customers.iter().map(|agent| agent.handle).collect();
        if let Err(error) = table.reserve(party) {
            debug!("[Spawner] {}", error);
            return None;
        }

        self.parties_spawned += 1;
        info!(
            "[Spawner] Sending {} customers to table {}",
            customers.len(),
            table.number()
        );
        events.emit(EventKind::CustomersSpawned {
            table: table.number(),
            customers: customers.clone(),
        });

        Some(SpawnedParty {
            table: table.number(),
            customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DinerConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(chairs: &[usize]) -> (CustomerSpawner, Vec<Table>, StdRng, EventBus) {
        let config = DinerConfig::new()
            .with_tables(chairs)
            .with_spawn_rate(10.0, 10.0)
            .with_travel_time(1.0, 3.0)
            .validated()
            .unwrap();
        let tables = config
            .tables
            .iter()
            .enumerate()
            .map(|(i, layout)| Table::new(TableNumber(i), layout.chairs, &config))
            .collect();
        (
            CustomerSpawner::new(&config.spawn),
            tables,
            StdRng::seed_from_u64(7),
            EventBus::new(),
        )
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let (mut spawner, mut tables, mut rng, mut events) = setup(&[3]);

        let party = spawner.update(0.1, &mut tables, &mut rng, &mut events).unwrap();
        assert_eq!(party.table, TableNumber(0));
        assert_eq!(party.customers.len(), 3);
        assert!(party.customers.iter().all(|c| c.table == TableNumber(0)));
        assert!(party
            .customers
            .iter()
            .all(|c| (1.0..3.0).contains(&c.travel_time)));
        assert!(tables[0].is_reserved());
        assert_eq!(spawner.next_spawn_in(), 10.0);
    }

    #[test]
    fn test_reserved_tables_are_not_chosen_again() {
        let (mut spawner, mut tables, mut rng, mut events) = setup(&[2, 2]);

        let first = spawner.update(0.1, &mut tables, &mut rng, &mut events).unwrap();
        let second = spawner.update(10.0, &mut tables, &mut rng, &mut events).unwrap();
        assert_ne!(first.table, second.table);

        // Every table is taken; the interval is still re-rolled
        assert!(spawner.update(10.0, &mut tables, &mut rng, &mut events).is_none());
        assert_eq!(spawner.next_spawn_in(), 10.0);
        assert_eq!(spawner.parties_spawned(), 2);
    }

    #[test]
    fn test_waits_for_interval() {
        let (mut spawner, mut tables, mut rng, mut events) = setup(&[2, 2]);
        spawner.update(0.1, &mut tables, &mut rng, &mut events).unwrap();

        assert!(spawner.update(9.0, &mut tables, &mut rng, &mut events).is_none());
        assert!(spawner.update(1.0, &mut tables, &mut rng, &mut events).is_some());
    }

    #[test]
    fn test_disabled_spawner_is_silent() {
        let (mut spawner, mut tables, mut rng, mut events) = setup(&[2]);
        spawner.set_enabled(false);
        assert!(spawner.update(100.0, &mut tables, &mut rng, &mut events).is_none());
        assert!(events.drain().is_empty());
    }
}
