use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use hoverreel_config::PreviewConfig;
use hoverreel_preview::replay::{ReplayReport, Scenario, replay};
use hoverreel_preview::{SystemTimeProvider, TimeProvider};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Replay a hover preview scenario on a virtual clock and print every
/// preview event with its timestamp.
#[derive(Debug, Parser)]
#[command(name = "hoverreel-sim", version)]
struct Cli {
    /// Scenario file (TOML or JSON).
    scenario: PathBuf,

    /// Preview configuration file. Without it the usual environment and
    /// default-file lookup applies.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        Builder::from_default_env().target(Target::Stderr).init();
    } else {
        Builder::new()
            .target(Target::Stderr)
            .filter_level(LevelFilter::Warn)
            .filter_module("hoverreel_preview", LevelFilter::Info)
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PreviewConfig> {
    match path {
        Some(path) => PreviewConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let (config, source) = PreviewConfig::load_from_env()
                .context("loading preview configuration")?;
            log::info!("preview configuration from {source:?}");
            Ok(config)
        }
    }
}

fn print_report(
    report: &ReplayReport,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            for timed in &report.events {
                writeln!(out, "{}", serde_json::to_string(timed)?)?;
            }
        }
        OutputFormat::Text => {
            writeln!(out, "{:>8}  event", "at_ms")?;
            for timed in &report.events {
                let mut value = serde_json::to_value(&timed.event)?;
                let name = value
                    .as_object_mut()
                    .and_then(|fields| fields.remove("event"))
                    .and_then(|name| name.as_str().map(str::to_owned))
                    .unwrap_or_default();
                let detail = match value.as_object() {
                    Some(fields) if !fields.is_empty() => value.to_string(),
                    _ => String::new(),
                };
                writeln!(out, "{:>8}  {name} {detail}", timed.at_ms)?;
            }
            writeln!(
                out,
                "navigations: {}  details: {}",
                report.navigations.len(),
                report.details_requests
            )?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let scenario = Scenario::load(&cli.scenario)?;

    let wall_clock = SystemTimeProvider;
    let started = wall_clock.now();
    let report = replay(&scenario, config).await?;
    log::info!(
        "replayed {} steps into {} events in {:?}",
        scenario.steps.len(),
        report.events.len(),
        wall_clock.now().saturating_duration_since(started)
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_report(&report, cli.format, &mut out)?;
    Ok(())
}
