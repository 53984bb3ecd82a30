//! Configuration for the license monitor.
//!
//! All values are read once at startup into [`MonitorConfig`] and passed to
//! the components explicitly.

use std::env;

use crate::error::{MonitorError, Result};

/// Calendly API token with org member access.
pub const ENV_CALENDLY_API_TOKEN: &str = "CALENDLY_API_TOKEN";
/// Calendly organization URI.
pub const ENV_CALENDLY_ORG_URL: &str = "CALENDLY_ORG_URL";
/// Okta API token with group member access.
pub const ENV_OKTA_API_TOKEN: &str = "OKTA_API_TOKEN";
/// Okta API base URL (e.g. `https://acme.okta.com/api/v1`).
pub const ENV_OKTA_BASE_URL: &str = "OKTA_BASE_URL";
/// Okta group holding Calendly users.
pub const ENV_OKTA_GROUP_ID: &str = "OKTA_CALENDLY_GROUP_ID";
/// Slack incoming webhook for alerts.
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
/// Optional override for the licensed seat count.
pub const ENV_TOTAL_LICENSES: &str = "CALENDLY_TOTAL_LICENSES";
/// Optional override for the Calendly API host.
pub const ENV_CALENDLY_API_BASE_URL: &str = "CALENDLY_API_BASE_URL";

/// Seats purchased when nothing overrides it.
pub const DEFAULT_TOTAL_LICENSES: u32 = 65;

/// Public Calendly API host.
pub const DEFAULT_CALENDLY_API_BASE_URL: &str = "https://api.calendly.com";

/// Calendly connection settings.
#[derive(Debug, Clone)]
pub struct CalendlyConfig {
    pub api_token: String,
    pub org_url: String,
    pub api_base_url: String,
}

/// Okta connection settings.
#[derive(Debug, Clone)]
pub struct OktaConfig {
    pub api_token: String,
    pub base_url: String,
    pub group_id: String,
}

/// Complete configuration for one monitoring run.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub calendly: CalendlyConfig,
    pub okta: OktaConfig,
    /// Slack incoming webhook URL.
    pub slack_webhook_url: String,
    /// Licensed seat count compared against usage.
    pub total_licenses: u32,
}

impl MonitorConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`MonitorError::MissingConfig`] naming the first required
    /// variable that is unset or empty, or [`MonitorError::InvalidConfig`]
    /// if an optional override cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Same as [`MonitorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| MonitorError::MissingConfig(key.to_string()))
        };

        let calendly_token = required(ENV_CALENDLY_API_TOKEN)?;
        let calendly_org_url = required(ENV_CALENDLY_ORG_URL)?;
        let okta_token = required(ENV_OKTA_API_TOKEN)?;
        let okta_base_url = required(ENV_OKTA_BASE_URL)?;
        let okta_group_id = required(ENV_OKTA_GROUP_ID)?;
        let slack_webhook_url = required(ENV_SLACK_WEBHOOK_URL)?;

        let total_licenses = match lookup(ENV_TOTAL_LICENSES).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                MonitorError::InvalidConfig(format!(
                    "{ENV_TOTAL_LICENSES} must be a non-negative integer, got {raw:?}"
                ))
            })?,
            None => DEFAULT_TOTAL_LICENSES,
        };

        let api_base_url = lookup(ENV_CALENDLY_API_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CALENDLY_API_BASE_URL.to_string());

        Ok(Self {
            calendly: CalendlyConfig {
                api_token: calendly_token,
                org_url: calendly_org_url,
                api_base_url,
            },
            okta: OktaConfig {
                api_token: okta_token,
                base_url: okta_base_url,
                group_id: okta_group_id,
            },
            slack_webhook_url,
            total_licenses,
        })
    }
}
