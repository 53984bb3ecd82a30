//! End-to-end monitoring run.

use std::sync::Arc;

use tracing::info;

use crate::channels::slack::SlackChannel;
use crate::channels::AlertChannel;
use crate::config::MonitorConfig;
use crate::error::Result;
use crate::reconcile::{reconcile, LicenseTally};
use crate::report::LicenseReport;
use crate::sources::calendly::CalendlySource;
use crate::sources::okta::OktaSource;
use crate::sources::MemberSource;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Distinct Calendly organization members.
    pub calendly_members: usize,
    /// Distinct Okta group members.
    pub okta_members: usize,
    pub tally: LicenseTally,
    pub report: LicenseReport,
}

/// Wires the two member sources, the reconciler and an alert channel.
pub struct LicenseMonitor {
    calendly: Arc<dyn MemberSource>,
    okta: Arc<dyn MemberSource>,
    channel: Arc<dyn AlertChannel>,
    total_licenses: u32,
}

impl LicenseMonitor {
    /// Build a monitor that posts to the configured Slack webhook.
    ///
    /// # Errors
    /// Returns error if either source client cannot be built.
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Ok(Self::with_parts(
            Arc::new(CalendlySource::new(&config.calendly)?),
            Arc::new(OktaSource::new(&config.okta)?),
            Arc::new(SlackChannel::new(config.slack_webhook_url.clone())),
            config.total_licenses,
        ))
    }

    /// Build a monitor from explicit parts.
    #[must_use]
    pub fn with_parts(
        calendly: Arc<dyn MemberSource>,
        okta: Arc<dyn MemberSource>,
        channel: Arc<dyn AlertChannel>,
        total_licenses: u32,
    ) -> Self {
        Self {
            calendly,
            okta,
            channel,
            total_licenses,
        }
    }

    /// Replace the alert channel.
    #[must_use]
    pub fn with_channel(mut self, channel: Arc<dyn AlertChannel>) -> Self {
        self.channel = channel;
        self
    }

    /// Fetch both directories, reconcile them and deliver the report.
    ///
    /// Nothing is sent if either fetch fails.
    ///
    /// # Errors
    /// Returns the first fetch or delivery error encountered.
    pub async fn run(&self) -> Result<RunSummary> {
        info!(source = self.calendly.name(), "Fetching Calendly users...");
        let calendly = self.calendly.fetch_emails().await?;

        info!(source = self.okta.name(), "Fetching Okta group members...");
        let okta = self.okta.fetch_emails().await?;

        info!("Calculating license counts...");
        let tally = reconcile(&calendly, &okta, self.total_licenses);
        let report = LicenseReport::from_tally(tally);
        info!(
            total = tally.total,
            used = tally.used,
            available = tally.available,
            report = report.title(),
            "License counts calculated"
        );

        info!(channel = self.channel.name(), "Sending alert...");
        self.channel.send(&report.render()).await?;

        Ok(RunSummary {
            calendly_members: calendly.len(),
            okta_members: okta.len(),
            tally,
            report,
        })
    }
}
