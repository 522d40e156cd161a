use rdiner::core::config::DinerConfig;
use rdiner::core::event::{EventProbe, SimEvent};
use rdiner::core::execution::{BatchRunner, ConcurrencyMode, CycleEngine, SimulationConfig, SimulationEngine};
use rdiner::EventKind;

/// Prints payments and walk-outs as they happen
struct ServiceLog;

impl EventProbe for ServiceLog {
    fn probe(&mut self, event: &SimEvent) {
        match &event.kind {
            EventKind::Paid { table, amount } => {
                println!("  [{:>7.1}s] 💰 table {} paid {:.2}", event.timestamp, table, amount)
            }
            EventKind::PatienceExhausted { table } => {
                println!("  [{:>7.1}s] 😠 table {} walked out", event.timestamp, table)
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DinerConfig::from_file(path)?,
        None => DinerConfig::default(),
    };

    println!("🍽️  Starting restaurant service");
    println!("Configuration:");
    println!(
        "  Tables: {:?}",
        config.tables.iter().map(|t| t.chairs).collect::<Vec<_>>()
    );
    println!(
        "  Menu: {}",
        config
            .menu
            .iter()
            .map(|item| item.id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Prep slots: {}", config.kitchen.prep_slot_count);
    println!(
        "  Tip: base {:.2}, bonus x{:.2}",
        config.tip.base_tip, config.tip.bonus_multiplier
    );
    println!();

    let settings = SimulationConfig::new()
        .with_timestep(0.5)
        .with_max_cycles(2400);

    println!("Running one session with the autopilot waiter...");
    let mut engine = CycleEngine::new(config.clone())?;
    engine.add_probe(Box::new(ServiceLog));
    let mut simulation = SimulationEngine::new(engine, &settings)?.with_autopilot();
    simulation.run()?;
    let report = simulation.report();
    println!(
        "  Score {:.2} from {} tables, {} customers lost",
        report.score.score, report.score.tables_paid, report.score.customers_lost
    );
    println!("{}", toml::to_string(&report)?);

    println!("Running a batch of seeds in parallel...");
    let seeds: Vec<u64> = (1..=8).collect();
    let runner = BatchRunner::new(
        config,
        settings.with_concurrency(ConcurrencyMode::Rayon),
    );
    for report in runner.run(&seeds)? {
        println!(
            "  seed {:>2}: score {:>8.2}  paid {:>3}  served {:>3}  lost {:>3}  avg tip {:.2}",
            report.seed,
            report.score.score,
            report.score.tables_paid,
            report.score.orders_served,
            report.score.customers_lost,
            report.score.average_tip()
        );
    }

    Ok(())
}
