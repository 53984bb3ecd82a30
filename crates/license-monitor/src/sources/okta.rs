//! Okta group membership source.
//!
//! API Documentation: <https://developer.okta.com/docs/reference/api/groups/>
//!
//! Okta paginates with `Link` response headers rather than body fields:
//!
//! ```text
//! Link: <https://acme.okta.com/api/v1/groups/00g1/users?limit=200>; rel="self"
//! Link: <https://acme.okta.com/api/v1/groups/00g1/users?after=00u9&limit=200>; rel="next"
//! ```

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{normalize_email, MemberSource};
use crate::config::OktaConfig;
use crate::error::{MonitorError, Result};

const SOURCE_NAME: &str = "okta";

/// Members of a single Okta group.
#[derive(Clone)]
pub struct OktaSource {
    client: Client,
    base_url: String,
    group_id: String,
}

impl OktaSource {
    /// Create a new Okta source.
    ///
    /// # Errors
    /// Returns error if the token is not a valid header value or the HTTP
    /// client cannot be created.
    pub fn new(config: &OktaConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("SSWS {}", config.api_token))
                .map_err(|_| MonitorError::InvalidConfig("Invalid Okta API token".into()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            group_id: config.group_id.clone(),
        })
    }

    /// Fetch every group member keyed by normalized email.
    ///
    /// Both `ACTIVE` and `SUSPENDED` users are kept; a later record with the
    /// same email replaces an earlier one.
    ///
    /// # Errors
    /// Returns error on transport failure, a non-success status, or an
    /// undecodable page.
    #[instrument(skip(self), fields(source = SOURCE_NAME, group_id = %self.group_id))]
    pub async fn fetch_members(&self) -> Result<BTreeMap<String, GroupMember>> {
        let mut members = BTreeMap::new();
        let mut next = Some(format!("{}/groups/{}/users", self.base_url, self.group_id));
        let mut pages = 0usize;

        while let Some(url) = next {
            debug!(url = %url, "GET request");

            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                let err = MonitorError::from_response(SOURCE_NAME, response).await;
                warn!(error = %err, "Okta request failed");
                return Err(err);
            }

            next = next_link(response.headers());

            let text = response.text().await?;
            let page: Vec<GroupMember> = serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, "Failed to parse Okta response");
                MonitorError::Serialization(e)
            })?;
            pages += 1;

            for member in page {
                debug!(user_id = %member.id, status = %member.status, "Okta group member");
                members.insert(normalize_email(&member.profile.email), member);
            }
        }

        let suspended = members
            .values()
            .filter(|m| m.status.eq_ignore_ascii_case("SUSPENDED"))
            .count();
        debug!(active = members.len() - suspended, suspended, "Okta member statuses");
        info!(pages, members = members.len(), "Fetched Okta group members");

        Ok(members)
    }
}

#[async_trait]
impl MemberSource for OktaSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_emails(&self) -> Result<BTreeSet<String>> {
        Ok(self.fetch_members().await?.into_keys().collect())
    }
}

/// Extract the `rel="next"` target from all `Link` headers of a response.
fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next)
}

/// Find the `rel="next"` target in a `<url>; rel="..."` link list.
///
/// Targets are delimited by `<...>` so commas inside a URL are not treated
/// as link separators.
fn parse_next(value: &str) -> Option<String> {
    let mut rest = value;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = &after[..end];
        let params = &after[end + 1..];
        let params_end = top_level_comma(params).unwrap_or(params.len());

        if !target.is_empty() && has_next_rel(&params[..params_end]) {
            return Some(target.to_string());
        }
        rest = &params[params_end..];
    }

    None
}

/// Position of the first comma outside a quoted parameter value.
fn top_level_comma(params: &str) -> Option<usize> {
    let mut quoted = false;
    params.char_indices().find_map(|(i, c)| match c {
        '"' => {
            quoted = !quoted;
            None
        }
        ',' if !quoted => Some(i),
        _ => None,
    })
}

/// Whether a `; rel="..."` parameter list names the `next` relation.
fn has_next_rel(params: &str) -> bool {
    params.split(';').any(|param| {
        param.split_once('=').is_some_and(|(key, value)| {
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        })
    })
}

// =============================================================================
// Okta API types
// =============================================================================

/// A user record returned by the group members endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMember {
    /// Okta user ID.
    #[serde(default)]
    pub id: String,
    /// Lifecycle status (`ACTIVE`, `SUSPENDED`, ...).
    #[serde(default)]
    pub status: String,
    pub profile: GroupMemberProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupMemberProfile {
    pub email: String,
}
