//! Member directories that licenses are reconciled across.

pub mod calendly;
pub mod okta;

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::Result;

/// A directory that can list its members' email addresses.
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &'static str;

    /// Fetch every member across all pages as normalized emails.
    async fn fetch_emails(&self) -> Result<BTreeSet<String>>;
}

/// Normalize an email for case-insensitive matching.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
