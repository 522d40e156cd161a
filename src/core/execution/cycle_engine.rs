use crate::core::components::prep::PrepStation;
use crate::core::components::spawner::CustomerSpawner;
use crate::core::components::table::{Table, TableOutcome};
use crate::core::components::traits::{Cycle, CycleContext, InteractTarget, Interactable, Interaction};
use crate::core::components::waiter::Waiter;
use crate::core::config::DinerConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::event::{EventBus, EventKind, EventProbe, SimEvent};
use crate::core::event_scheduler::EventScheduler;
use crate::core::food::{FoodCatalog, FoodSlot, PreparedFood};
use crate::core::input::Input;
use crate::core::score::ScoreBoard;
use crate::core::types::{CustomerHandle, DeliveryHandle, FoodId, TableNumber};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Customer on its way to a table, tagged with the table's epoch at spawn time
#[derive(Debug, Clone, PartialEq)]
struct PendingArrival {
    table: TableNumber,
    customer: CustomerHandle,
    epoch: u64,
}

/// One restaurant session
///
/// Owns every table, the prep station, the spawner, the waiter and the
/// score. Each call to [`CycleEngine::cycle`] advances all timers first and
/// then applies the inputs queued since the previous cycle, in FIFO order.
pub struct CycleEngine {
    config: DinerConfig,
    rng: StdRng,
    catalog: FoodCatalog,
    tables: Vec<Table>,
    station: PrepStation,
    spawner: CustomerSpawner,
    arrivals: EventScheduler<PendingArrival>,
    waiter: Waiter,
    score: ScoreBoard,
    events: EventBus,
    inputs: VecDeque<Input>,
    /// Current cycle number
    current_cycle: u64,
    /// Session time in seconds
    clock: f64,
}

impl CycleEngine {
    /// Create a session from a configuration; the configuration is validated first
    pub fn new(config: DinerConfig) -> SimResult<Self> {
        let config = config.validated()?;
        let catalog = config.catalog()?;
        let tables: Vec<Table> = config
            .tables
            .iter()
            .enumerate()
            .map(|(index, layout)| Table::new(TableNumber(index), layout.chairs, &config))
            .collect();

        info!(
            "[Session] {} tables, {} menu items, {} prep slots, seed {}",
            tables.len(),
            catalog.len(),
            config.kitchen.prep_slot_count,
            config.seed
        );

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            station: PrepStation::new(config.kitchen.prep_slot_count),
            spawner: CustomerSpawner::new(&config.spawn),
            arrivals: EventScheduler::new(),
            waiter: Waiter::new(),
            score: ScoreBoard::new(),
            events: EventBus::new(),
            inputs: VecDeque::new(),
            current_cycle: 0,
            clock: 0.0,
            catalog,
            tables,
            config,
        })
    }

    /// Queue an input for the next cycle
    pub fn submit(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    pub fn notify_customer_arrived(&mut self, table: TableNumber, customer: CustomerHandle) {
        self.submit(Input::CustomerArrived { table, customer });
    }

    pub fn notify_food_delivered(&mut self, table: TableNumber, food: FoodId, delivery: DeliveryHandle) {
        self.submit(Input::FoodDelivered {
            table,
            food,
            delivery,
        });
    }

    /// Take a single order line
    pub fn notify_order_taken(&mut self, table: TableNumber, food: FoodId) {
        self.take_orders(table, vec![food]);
    }

    /// Take several order lines in one action
    pub fn take_orders(&mut self, table: TableNumber, foods: Vec<FoodId>) {
        self.submit(Input::OrderTaken { table, foods });
    }

    pub fn notify_pay_requested(&mut self, table: TableNumber) {
        self.submit(Input::PayRequested { table });
    }

    /// Resolve what interacting with `target` does and queue the resulting input.
    /// `ShowOrders` queues nothing; the caller answers with [`CycleEngine::take_orders`].
    pub fn interact(&mut self, target: InteractTarget) -> SimResult<Interaction> {
        let interaction = match target {
            InteractTarget::Table(number) => self.table(number)?.interaction(&self.waiter),
            InteractTarget::PrepStation => self.station.interaction(&self.waiter),
            InteractTarget::PrepSlot(index) => self.station.slot(index)?.interaction(&self.waiter),
        };
        if let Interaction::Submit(input) = &interaction {
            self.submit(input.clone());
        }
        Ok(interaction)
    }

    /// Throw away whatever the waiter is holding
    pub fn discard_held_food(&mut self) -> Option<PreparedFood> {
        let food = self.waiter.put_down();
        if let Some(food) = &food {
            debug!("[Waiter] Discarded {} for table {}", food.food(), food.table());
        }
        food
    }

    /// Return a table to `Available` immediately, without payment
    pub fn reset_table(&mut self, table: TableNumber) -> SimResult<()> {
        let table = table_at(&mut self.tables, table)?;
        info!("[Table {}] Manual reset while {}", table.number(), table.state());
        table.reset(&mut self.events);
        Ok(())
    }

    /// Return a prep slot to `Idle` immediately, discarding its food
    pub fn reset_slot(&mut self, slot: usize) -> SimResult<Option<FoodSlot>> {
        self.station.reset_slot(slot, &mut self.events)
    }

    pub fn set_spawning(&mut self, enabled: bool) {
        self.spawner.set_enabled(enabled);
    }

    /// Execute one cycle of `dt` seconds
    pub fn cycle(&mut self, dt: f64) -> SimResult<()> {
        if !(dt >= 0.0) || !dt.is_finite() {
            return Err(SimError::InvalidTimestep(dt));
        }
        self.current_cycle += 1;
        self.clock += dt;
        self.events.set_time(self.clock);

        self.advance_timers(dt);
        self.spawn_customers(dt);
        self.release_arrivals();
        self.apply_inputs();

        Ok(())
    }

    /// Alias of [`CycleEngine::cycle`]
    pub fn tick(&mut self, dt: f64) -> SimResult<()> {
        self.cycle(dt)
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    pub fn add_probe(&mut self, probe: Box<dyn EventProbe>) {
        self.events.add_probe(probe);
    }

    pub fn config(&self) -> &DinerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, number: TableNumber) -> SimResult<&Table> {
        self.tables
            .get(number.index())
            .ok_or(SimError::UnknownTable(number))
    }

    /// Tip adjustments are applied through the table directly
    pub fn table_mut(&mut self, number: TableNumber) -> SimResult<&mut Table> {
        table_at(&mut self.tables, number)
    }

    pub fn station(&self) -> &PrepStation {
        &self.station
    }

    pub fn spawner(&self) -> &CustomerSpawner {
        &self.spawner
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn current_cycle(&self) -> u64 {
        self.current_cycle
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Customers still walking to their table
    pub fn pending_arrivals(&self) -> usize {
        self.arrivals.len()
    }

    fn advance_timers(&mut self, dt: f64) {
        let mut ctx = CycleContext {
            rng: &mut self.rng,
            catalog: &self.catalog,
            events: &mut self.events,
        };

        for table in self.tables.iter_mut() {
            let customers = table.occupied_chairs();
            if table.cycle(dt, &mut ctx) == TableOutcome::PatienceExhausted {
                self.score.record_lost(customers);
            }
        }
        self.station.cycle(dt, &mut ctx);
    }

    fn spawn_customers(&mut self, dt: f64) {
        let Some(party) = self
            .spawner
            .update(dt, &mut self.tables, &mut self.rng, &mut self.events)
        else {
            return;
        };
        if !self.config.spawn.simulate_arrivals {
            return;
        }

        let epoch = self.tables[party.table.index()].epoch();
        for agent in party.customers {
            self.arrivals.schedule_event(
                PendingArrival {
                    table: agent.table,
                    customer: agent.handle,
                    epoch,
                },
                self.clock + agent.travel_time,
            );
        }
    }

    fn release_arrivals(&mut self) {
        if self.arrivals.is_empty() {
            return;
        }
        for arrival in self.arrivals.pop_due(self.clock) {
            let current = self.tables.get(arrival.table.index()).map(Table::epoch);
            if current == Some(arrival.epoch) {
                self.inputs.push_back(Input::CustomerArrived {
                    table: arrival.table,
                    customer: arrival.customer,
                });
            } else {
                debug!(
                    "[Table {}] Dropping arrival of {} scheduled before a reset",
                    arrival.table, arrival.customer
                );
            }
        }
    }

    fn apply_inputs(&mut self) {
        while let Some(input) = self.inputs.pop_front() {
            if let Err(error) = self.apply(input) {
                warn!("[Session] Input rejected: {}", error);
                self.events.emit(EventKind::InputRejected { error });
            }
        }
    }

    fn apply(&mut self, input: Input) -> SimResult<()> {
        match input {
            Input::CustomerArrived { table, customer } => {
                if let Some(seated) = self.tables.iter().find(|other| {
                    other.number() != table && other.customers().any(|c| c == customer)
                }) {
                    return Err(SimError::CustomerAlreadySeated {
                        customer,
                        table: seated.number(),
                    });
                }
                table_at(&mut self.tables, table)?.seat_customer(
                    customer,
                    &mut self.rng,
                    &mut self.events,
                )?;
            }
            Input::FoodDelivered {
                table,
                food,
                delivery,
            } => {
                table_at(&mut self.tables, table)?.deliver_food(
                    &food,
                    &mut self.rng,
                    &mut self.events,
                )?;
                self.score.record_served();
                if self.waiter.hands().map(PreparedFood::handle) == Some(delivery) {
                    self.waiter.put_down();
                }
            }
            Input::OrderTaken { table, foods } => {
                table_at(&mut self.tables, table)?.take_orders(
                    &foods,
                    self.waiter.memory_mut(),
                    &mut self.events,
                )?;
            }
            Input::PayRequested { table } => {
                let table = table_at(&mut self.tables, table)?;
                let customers = table.occupied_chairs();
                let payment = table.pay(&mut self.events)?;
                self.score.record_payment(&payment, customers);
            }
            Input::QueueMemorizedOrders => {
                let queued = self
                    .station
                    .queue_from_memory(self.waiter.memory_mut(), &mut self.events);
                debug!("[Waiter] Handed {} orders to the kitchen", queued);
            }
            Input::TakeFood { slot } => {
                if let Some(held) = self.waiter.hands() {
                    return Err(SimError::HandsFull(held.food().clone()));
                }
                if let Some(food) = self.station.take_food(slot, &mut self.events)? {
                    self.waiter.pick_up(food)?;
                }
            }
            Input::ResetTable { table } => self.reset_table(table)?,
        }
        Ok(())
    }
}

fn table_at(tables: &mut [Table], number: TableNumber) -> SimResult<&mut Table> {
    tables
        .get_mut(number.index())
        .ok_or(SimError::UnknownTable(number))
}
