//! pingtool binary entry point.
//!
//! Startup resolves everything fatal up front — access point, user,
//! log file — then hands a fixed context to the sample loop. Ctrl+C
//! cancels the loop cooperatively and the process exits 0.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pingtool::{
    ConsoleSink, IcmpProber, MultiSink, ProbeConfig, RunContext, SampleLoop, ap, effective_user,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Ping hosts and append results to the console and a CSV log.
#[derive(Parser, Debug)]
#[command(name = "pingtool", version, about, long_about = None)]
struct Cli {
    /// Hosts to ping (default: local gateway and google.com)
    #[arg(value_name = "HOST")]
    hosts: Vec<String>,

    /// Log file path, opened in append mode
    #[arg(long, default_value = pingtool::config::DEFAULT_LOG_FILE, env = "PINGTOOL_LOG_FILE")]
    log_file: PathBuf,

    /// Per-probe timeout
    #[arg(long, default_value = "3s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Pause between rounds
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    interval: Duration,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr; stdout carries the CSV stream.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ProbeConfig::resolve(cli.hosts)
        .with_timeout(cli.timeout)
        .with_interval(cli.interval)
        .with_log_file(cli.log_file);
    config.validate()?;

    // Everything fatal is resolved before the first probe.
    let inspector = ap::detect();
    let info = inspector.inspect()?;
    let user = effective_user()?;
    tracing::info!(
        strategy = inspector.name(),
        ssid = %info.ssid,
        bssid = %info.bssid,
        user = %user,
        "Startup context resolved"
    );

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let console = ConsoleSink::new();
    let sink = MultiSink::new(vec![Box::new(console.clone()), Box::new(file)]);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::debug!("Interrupt received, stopping");
        signal_cancel.cancel();
    });

    let context = RunContext { user, info };
    let looper = SampleLoop::new(config, context, IcmpProber::new(), console);
    looper.run(sink, cancel).await?;

    Ok(())
}
