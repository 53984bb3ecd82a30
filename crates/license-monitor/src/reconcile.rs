//! License usage reconciliation.

use std::collections::BTreeSet;

/// License counts for one monitoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseTally {
    /// Seats purchased.
    pub total: u32,
    /// Members present in both directories.
    pub used: u32,
    /// `total - used`; negative when over the limit.
    pub available: i64,
}

impl LicenseTally {
    /// Build a tally from a seat count and a usage count.
    #[must_use]
    pub fn new(total: u32, used: u32) -> Self {
        Self {
            total,
            used,
            available: i64::from(total) - i64::from(used),
        }
    }

    /// Whether more seats are in use than were purchased.
    #[must_use]
    pub const fn is_over_limit(&self) -> bool {
        self.used > self.total
    }

    /// Seats in use beyond the total, zero when within the limit.
    #[must_use]
    pub const fn overage(&self) -> u32 {
        self.used.saturating_sub(self.total)
    }
}

/// Count the members present in both sets and compare against `total`.
#[must_use]
pub fn reconcile(
    calendly: &BTreeSet<String>,
    okta: &BTreeSet<String>,
    total: u32,
) -> LicenseTally {
    let used = calendly.intersection(okta).count();
    LicenseTally::new(total, u32::try_from(used).unwrap_or(u32::MAX))
}
