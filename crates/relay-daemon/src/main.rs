use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use alert_core::{AlertCategory, AlertEvent};
use alert_pipeline::{AlertPipeline, PipelineConfig};
use station_index::{CsvStationRegistry, StationIndex, StationRegistry};
use telnet_dispatch::{build_command, DispatcherConfig, TelnetDispatcher};

mod report;
mod source;

use report::LogReportSink;
use source::{OrefAlertSource, DEFAULT_ALERTS_URL};

#[derive(Debug, Parser)]
#[command(name = "relay-daemon")]
#[command(about = "Relay public alerts to field stations over the station protocol")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll the public alert feed and dispatch continuously
    Run(RunArgs),
    /// Inject one hand-built alert and show what would be (or was) sent
    Simulate(SimulateArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Station registry CSV
    #[arg(long)]
    stations: PathBuf,

    /// Alert feed URL
    #[arg(long, default_value = DEFAULT_ALERTS_URL)]
    url: String,

    /// Poll interval in seconds
    #[arg(long, default_value_t = 3)]
    interval_secs: u64,

    /// Resolve and report only, never open station connections
    #[arg(long)]
    dry_run: bool,

    /// Categories to mute (wire names, repeatable)
    #[arg(long)]
    mute: Vec<String>,

    /// Stop after this many seconds (default: run until Ctrl-C)
    #[arg(long)]
    duration_secs: Option<u64>,
}

#[derive(Debug, Parser)]
struct SimulateArgs {
    /// Station registry CSV
    #[arg(long)]
    stations: PathBuf,

    /// Alert category (wire name)
    #[arg(long, default_value = "missiles")]
    category: String,

    /// Affected area names
    #[arg(long, value_delimiter = ',', required = true)]
    areas: Vec<String>,

    /// Actually open station connections instead of the default dry run
    #[arg(long)]
    send: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Simulate(args) => simulate(args).await,
    }
}

fn load_index(path: &Path) -> Result<StationIndex, Box<dyn std::error::Error>> {
    let registry = CsvStationRegistry::new(path);
    let index = StationIndex::build(registry.load_stations()?)?;
    info!(stations = index.len(), path = %path.display(), "station registry loaded");
    Ok(index)
}

fn parse_category(name: &str) -> Result<AlertCategory, Box<dyn std::error::Error>> {
    let category = AlertCategory::from_wire(name);
    // from_wire never fails; catch typos by round-tripping the wire name
    if category == AlertCategory::Unknown && name != "unknown" {
        return Err(format!("unrecognized alert category: {name}").into());
    }
    Ok(category)
}

async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(&args.stations)?;

    let mut config = PipelineConfig {
        poll_interval: Duration::from_secs(args.interval_secs),
        dry_run: args.dry_run,
        ..PipelineConfig::default()
    };
    for name in &args.mute {
        let category = parse_category(name)?;
        info!(category = %category, "category muted");
        config.muted_categories.insert(category);
    }

    let source = Arc::new(OrefAlertSource::new(&args.url)?);
    let dispatcher = TelnetDispatcher::new(DispatcherConfig::default());
    let mut pipeline = AlertPipeline::new(source, index, dispatcher, config);
    pipeline.subscribe(Arc::new(LogReportSink));

    let handle = pipeline.handle();
    let runner = tokio::spawn(pipeline.run());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, stopping");
        }
        _ = sleep_or_forever(args.duration_secs) => {
            info!("duration elapsed, stopping");
        }
    }
    handle.stop();
    runner.await?;

    let stats = handle.stats().await;
    info!(
        scans = stats.scan_count,
        alerts = stats.alert_count,
        sent_ok = stats.sent_ok,
        sent_failed = stats.sent_failed,
        "final statistics"
    );
    Ok(())
}

async fn sleep_or_forever(secs: Option<u64>) {
    match secs {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => std::future::pending().await,
    }
}

async fn simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(&args.stations)?;
    let category = parse_category(&args.category)?;
    let dry_run = !args.send;

    println!(
        "Simulating {} alert for {} ({})",
        category.wire_name(),
        args.areas.join(", "),
        if dry_run { "dry run" } else { "LIVE SEND" },
    );

    let config = PipelineConfig {
        dry_run,
        ..PipelineConfig::default()
    };
    let dispatcher = TelnetDispatcher::new(DispatcherConfig::default());
    let mut pipeline = AlertPipeline::new(
        Arc::new(source::IdleSource),
        index,
        dispatcher,
        config,
    );

    let event = AlertEvent::new(category, args.areas, "simulated alert");
    let report = pipeline.inject(event, dry_run).await?;

    if report.outcomes.is_empty() {
        println!("No stations resolved for the given areas.");
        return Ok(());
    }

    println!("Resolved {} station(s):", report.outcomes.len());
    for outcome in &report.outcomes {
        let command = build_command(&outcome.station.station_code, category)
            .unwrap_or_else(|| "(no protocol code, skipped)".to_string());
        let status = if outcome.success {
            "sent"
        } else if outcome.skipped {
            "skipped"
        } else {
            "FAILED"
        };
        println!(
            "  {:<30} cluster {}  {:<20} {}",
            outcome.station.display_name, outcome.station.cluster, command, status,
        );
    }
    println!(
        "Summary: {} total, {} sent, {} failed, {} skipped",
        report.summary.total, report.summary.success, report.summary.failed, report.summary.skipped,
    );
    Ok(())
}
