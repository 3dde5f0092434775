use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use vatsim_hours::api::VatsimClient;
use vatsim_hours::config::AppConfig;
use vatsim_hours::enrich::HoursCache;
use vatsim_hours::geo::Airport;
use vatsim_hours::logging;
use vatsim_hours::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(author, version, about = "Cumulative hours of VATSIM pilots near an airport")]
struct Args {
    /// Airport to monitor the area around (ICAO code, e.g. KSAN)
    airport: Option<String>,

    /// Show supported airports and exit
    #[arg(long)]
    show_airports: bool,

    /// Override the configured range around the airport
    #[arg(short, long)]
    distance: Option<u32>,

    /// Keep refreshing until interrupted, reusing looked-up hours
    #[arg(short, long)]
    watch: bool,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.show_airports {
        for airport in Airport::all() {
            println!("{}", airport);
        }
        return ExitCode::SUCCESS;
    }

    let Some(airport) = args.airport.clone() else {
        eprintln!("No airport specified. Run with --show-airports to list supported airports.");
        return ExitCode::FAILURE;
    };

    // Before logging is up, stderr is the only channel
    let config = match AppConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let _logging_guard =
        match logging::init_logging(&config.log_dir, "vatsim-hours", &config.log_level) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return ExitCode::FAILURE;
            }
        };

    // Logged while the guard is alive so it reaches the file as well as stderr
    match run(args, &config, &airport).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: &AppConfig, airport: &str) -> Result<()> {
    tracing::info!("vatsim-hours {} starting", env!("CARGO_PKG_VERSION"));

    let client = VatsimClient::new(config).context("Failed to set up access to VATSIM API")?;
    let mut pipeline = Pipeline::new(client, config, airport)?;
    if let Some(distance) = args.distance {
        pipeline = pipeline.with_max_distance(distance);
    }
    tracing::info!("Monitoring {}", pipeline.airport());

    let cache = HoursCache::new();

    if !args.watch {
        let report = pipeline.run(&cache).await?;
        print!("{}", report.render(config.alert_hours));
        return Ok(());
    }

    let interval = Duration::from_secs(config.refresh_interval_secs);
    loop {
        let report = pipeline.run(&cache).await?;
        print!("{}", report.render(config.alert_hours));
        println!();
        tracing::debug!("{} pilots cached", cache.len().await);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received.");
                return Ok(());
            }
        }
    }
}
