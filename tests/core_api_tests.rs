use rdiner::core::{
    components::{InteractTarget, Interaction},
    config::DinerConfig,
    execution::{BatchRunner, ConcurrencyMode, CycleEngine, SimulationConfig, SimulationEngine},
    food::MenuItem,
};
use rdiner::{EventKind, SimError, TableNumber, TableState};

const RESTAURANT_TOML: &str = r#"
seed = 5
tables = [{ chairs = 2 }, { chairs = 3 }]
menu = [
    { id = "ramen", price = 11.0, prep_time = 4.0 },
    { id = "gyoza", price = 6.0, prep_time = 2.0 },
]

[order]
min_order_amount = 3
max_order_amount = 1

[kitchen]
prep_slot_count = 2

[spawn]
spawn_rate_min = 15.0
spawn_rate_max = 25.0
"#;

#[test]
fn test_toml_config_drives_a_session() {
    let config = DinerConfig::from_toml_str(RESTAURANT_TOML).unwrap();
    assert_eq!(config.order.min_order_amount, 1);
    assert_eq!(config.order.max_order_amount, 3);
    assert_eq!(config.tip.base_tip, 0.15);

    let engine = CycleEngine::new(config).unwrap();
    assert_eq!(engine.tables().len(), 2);
    assert_eq!(engine.table(TableNumber(1)).unwrap().chair_count(), 3);
    assert_eq!(engine.station().slots().len(), 2);
    assert_eq!(engine.catalog().len(), 2);
}

#[test]
fn test_out_of_range_config_is_rejected() {
    let err = DinerConfig::from_toml_str("[tip]\nbase_tip = 1.5\n").unwrap_err();
    assert!(matches!(err, SimError::ConfigurationRange(_)));

    let err = DinerConfig::from_toml_str("tables = \"four\"").unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
}

#[test]
fn test_manual_waiter_takes_an_order() {
    let config = DinerConfig::new()
        .with_tables(&[1])
        .with_menu(vec![MenuItem::new("pie", 5.0, 1.0)])
        .with_order_time(1.0, 1.0)
        .with_order_amount(1, 1)
        .with_spawning(false);
    let mut engine = CycleEngine::new(config).unwrap();

    engine.notify_customer_arrived(TableNumber(0), rdiner::CustomerHandle::new());
    engine.tick(0.1).unwrap();
    engine.tick(1.0).unwrap();

    let lines = match engine.interact(InteractTarget::Table(TableNumber(0))).unwrap() {
        Interaction::ShowOrders(lines) => lines,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(lines.len(), 1);
    engine.notify_order_taken(TableNumber(0), lines[0].food().clone());
    engine.tick(0.1).unwrap();

    assert_eq!(
        engine.table(TableNumber(0)).unwrap().state(),
        TableState::WaitingForFood
    );
    assert!(engine.drain_events().iter().any(|e| matches!(
        &e.kind,
        EventKind::OrderLineTaken { food, .. } if food.as_str() == "pie"
    )));
}

#[test]
fn test_autopilot_session_report() {
    let config = DinerConfig::from_toml_str(RESTAURANT_TOML).unwrap();
    let settings = SimulationConfig::new().with_timestep(0.5).with_max_cycles(600);
    let mut simulation = SimulationEngine::new(CycleEngine::new(config).unwrap(), &settings)
        .unwrap()
        .with_autopilot();

    simulation.run().unwrap();
    let report = simulation.report();
    assert_eq!(report.seed, 5);
    assert_eq!(report.cycles, 600);
    assert!((report.elapsed - 300.0).abs() < 1e-6);
    assert!(report.parties_spawned > 0);
}

#[test]
fn test_batch_runs_are_reproducible() {
    let config = DinerConfig::from_toml_str(RESTAURANT_TOML).unwrap();
    let settings = SimulationConfig::new()
        .with_timestep(0.5)
        .with_max_cycles(300)
        .with_concurrency(ConcurrencyMode::Rayon);

    let runner = BatchRunner::new(config, settings);
    let first = runner.run(&[10, 20, 30]).unwrap();
    let second = runner.run(&[10, 20, 30]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
