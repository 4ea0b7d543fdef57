use anyhow::Result;
use clap::Parser;
use log::info;

use toll_sim::{
    config::SimulationConfig,
    report::SimulationReport,
    simulation::{EventKind, ScenarioGenerator, Scheduler, TollPricingPolicy},
};

#[derive(Parser)]
#[command(name = "toll-sim")]
#[command(about = "Discrete-event toll road simulation with dynamic pricing")]
struct Args {
    /// Simulation configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Random seed for reproducible simulations
    #[arg(short, long)]
    seed: Option<u64>,

    /// Time bound in ticks (overrides the configuration)
    #[arg(short, long)]
    until: Option<u64>,

    /// Where to write the JSON report
    #[arg(short, long, default_value = "toll_report.json")]
    report: String,

    /// Enable verbose logging for detailed simulation progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting Toll Road Simulator");

    // Load configuration
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            SimulationConfig::load_from_file(path)?
        }
        None => SimulationConfig::default(),
    };

    // Use seed from args or config
    let seed = args.seed.or(config.scenario.random.seed);
    let until = args.until.unwrap_or(config.scenario.simulation.until);

    info!("=== Simulation Configuration ===");
    info!("Vehicles: {}, toll zones: {}", config.scenario.simulation.vehicle_count, config.scenario.simulation.zone_count);
    info!("Time bound: {} ticks", until);
    info!("Pricing: {:.2}/km + {:.2} fixed, clock {:?}", config.pricing.per_km_rate, config.pricing.fixed_fee, config.pricing.clock);
    if let Some(seed) = seed {
        info!("Random Seed: {}", seed);
    }

    let scenario = ScenarioGenerator::new(config.scenario.clone(), seed)?.generate()?;

    let policy = TollPricingPolicy::new(config.pricing.clone());
    let mut scheduler = Scheduler::new(policy, config.road.clone(), seed)?;
    for vehicle in scenario.vehicles {
        scheduler.register(vehicle);
    }

    let summary = scheduler.run_until(until);

    for event in scheduler.events_mut().drain() {
        match event.kind {
            EventKind::SpeedAdvisory { .. } | EventKind::Congestion => log::debug!("{}", event),
            EventKind::PricingRejected { .. } => log::warn!("{}", event),
            _ => info!("{}", event),
        }
    }

    let report = SimulationReport::from_scheduler(&scheduler);
    report.log_summary();
    report.write_json(&args.report)?;

    info!("Simulation completed!");
    info!(
        "Completed: {}, halted: {}, unfinished: {}",
        summary.completed, summary.halted, summary.unfinished
    );
    info!("Number of vehicles on the toll road: {}", report.vehicles_on_road);

    Ok(())
}
