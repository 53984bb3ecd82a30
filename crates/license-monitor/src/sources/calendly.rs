//! Calendly organization membership source.
//!
//! API Documentation: <https://developer.calendly.com/api-docs>

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{normalize_email, MemberSource};
use crate::config::CalendlyConfig;
use crate::error::{MonitorError, Result};

const SOURCE_NAME: &str = "calendly";

/// Calendly organization members.
#[derive(Clone)]
pub struct CalendlySource {
    client: Client,
    api_base_url: String,
    org_url: String,
}

impl CalendlySource {
    /// Create a new Calendly source.
    ///
    /// # Errors
    /// Returns error if the token is not a valid header value or the HTTP
    /// client cannot be created.
    pub fn new(config: &CalendlyConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| MonitorError::InvalidConfig("Invalid Calendly API token".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            org_url: config.org_url.clone(),
        })
    }

    /// Fetch one page of memberships.
    async fn get_page(&self, url: &str, first: bool) -> Result<MembershipPage> {
        debug!(url = %url, "GET request");

        let request = if first {
            self.client
                .get(url)
                .query(&[("organization", self.org_url.as_str())])
        } else {
            self.client.get(url)
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            let err = MonitorError::from_response(SOURCE_NAME, response).await;
            warn!(error = %err, "Calendly request failed");
            return Err(err);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Failed to parse Calendly response");
            MonitorError::Serialization(e)
        })
    }
}

#[async_trait]
impl MemberSource for CalendlySource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    #[instrument(skip(self), fields(source = SOURCE_NAME))]
    async fn fetch_emails(&self) -> Result<BTreeSet<String>> {
        let mut emails = BTreeSet::new();
        let mut url = format!("{}/organization_memberships", self.api_base_url);
        let mut first = true;
        let mut pages = 0usize;

        loop {
            let page = self.get_page(&url, first).await?;
            pages += 1;
            first = false;

            for membership in &page.collection {
                emails.insert(normalize_email(&membership.user.email));
            }

            match page.pagination.and_then(|p| p.next_page).filter(|n| !n.is_empty()) {
                Some(next) => url = next,
                None => break,
            }
        }

        info!(pages, members = emails.len(), "Fetched Calendly organization members");
        Ok(emails)
    }
}

// =============================================================================
// Calendly API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct MembershipPage {
    #[serde(default)]
    collection: Vec<Membership>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Membership {
    user: MembershipUser,
}

#[derive(Debug, Deserialize)]
struct MembershipUser {
    email: String,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    next_page: Option<String>,
}
