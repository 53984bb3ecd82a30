//! Calendly license usage monitor.
//!
//! Reconciles Calendly organization members against the members of an Okta
//! group and posts a usage report to Slack.
//!
//! # Usage
//!
//! ```no_run
//! use license_monitor::{LicenseMonitor, MonitorConfig};
//!
//! # async fn run() -> license_monitor::Result<()> {
//! let config = MonitorConfig::from_env()?;
//! let summary = LicenseMonitor::from_config(&config)?.run().await?;
//! println!("{} licenses in use", summary.tally.used);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Required environment variables:
//!
//! - `CALENDLY_API_TOKEN`: Calendly API token with org member access
//! - `CALENDLY_ORG_URL`: Calendly organization URI
//! - `OKTA_API_TOKEN`: Okta API token with group member access
//! - `OKTA_BASE_URL`: Okta API base URL
//! - `OKTA_CALENDLY_GROUP_ID`: Okta group ID for Calendly users
//! - `SLACK_WEBHOOK_URL`: Slack incoming webhook
//!
//! Optional: `CALENDLY_TOTAL_LICENSES` (default 65) and
//! `CALENDLY_API_BASE_URL`.
//!
//! # Architecture
//!
//! - [`MemberSource`] lists a directory's members; [`CalendlySource`] and
//!   [`OktaSource`] follow their API's pagination to the end
//! - [`reconcile`] intersects the two sets into a [`LicenseTally`]
//! - [`LicenseReport`] picks the overage or within-limit message
//! - [`AlertChannel`] delivers it; [`SlackChannel`] posts to a webhook

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod config;
pub mod error;
pub mod monitor;
pub mod reconcile;
pub mod report;
pub mod sources;

pub use channels::slack::SlackChannel;
pub use channels::stdout::StdoutChannel;
pub use channels::AlertChannel;
pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use monitor::{LicenseMonitor, RunSummary};
pub use reconcile::{reconcile, LicenseTally};
pub use report::LicenseReport;
pub use sources::calendly::CalendlySource;
pub use sources::okta::OktaSource;
pub use sources::MemberSource;
