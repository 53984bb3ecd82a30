//! License monitor CLI - reports Calendly seat usage to Slack.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use license_monitor::{LicenseMonitor, MonitorConfig, StdoutChannel};

/// Reconcile Calendly members against an Okta group and report license usage.
#[derive(Parser)]
#[command(name = "license-monitor")]
#[command(about = "Monitor Calendly license usage and send Slack alerts")]
struct Cli {
    /// Licensed seat count (overrides `CALENDLY_TOTAL_LICENSES`).
    #[arg(long)]
    total_licenses: Option<u32>,

    /// Print the report instead of posting it to Slack.
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = MonitorConfig::from_env().context("Failed to load configuration")?;
    if let Some(total) = cli.total_licenses {
        config.total_licenses = total;
    }

    let mut monitor =
        LicenseMonitor::from_config(&config).context("Failed to create license monitor")?;
    if cli.dry_run {
        info!("Dry run: report will be printed, not posted");
        monitor = monitor.with_channel(Arc::new(StdoutChannel));
    }

    let summary = monitor.run().await.context("License monitoring run failed")?;

    info!(
        calendly_members = summary.calendly_members,
        okta_members = summary.okta_members,
        used = summary.tally.used,
        total = summary.tally.total,
        "License monitoring complete"
    );

    Ok(())
}
