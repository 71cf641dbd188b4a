use anyhow::Result;
use clap::Parser;
use closure_delay::cli::{Cli, OutputFormat};
use closure_delay::config::EngineConfig;
use closure_delay::measurement::Scenario;
use closure_delay::report::DelayReport;
use closure_delay::simulation::MonteCarlo;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(args: &Cli) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(flex) = args.flex {
        config.flex = flex;
    }
    if let Some(certainty) = args.certainty {
        config.threshold_certainty = certainty;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

/// Scenario file (or the A3-0413A reference record) with closure overrides
fn resolve_scenario(args: &Cli) -> Result<Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::default(),
    };

    let closure = &mut scenario.closure;
    if let Some(lanes_closed) = args.lanes_closed {
        closure.lanes_closed = lanes_closed;
    }
    if let Some(length) = args.closure_length {
        closure.length_metres = length;
    }
    if let Some(duration) = args.duration {
        closure.duration_minutes = duration;
    }
    if let Some(speed) = args.closure_speed {
        closure.speed_mph = speed;
    }

    scenario.validate()?;
    Ok(scenario)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = resolve_config(&args)?;
    let scenario = resolve_scenario(&args)?;

    let distribution = MonteCarlo::new(&config)
        .run_configured(&scenario.measurement, &scenario.closure)?;

    let mut report = DelayReport::build(
        &scenario.measurement,
        &scenario.closure,
        &config,
        &distribution,
    )?;
    if args.histogram {
        report = report.with_histogram(&distribution);
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
