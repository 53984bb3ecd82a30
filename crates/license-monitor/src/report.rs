//! Slack-formatted license usage reports.

use std::fmt;

use crate::reconcile::LicenseTally;

/// Alert chosen for a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseReport {
    /// More seats in use than purchased.
    Overage(LicenseTally),
    /// Usage at or below the purchased seat count.
    WithinLimit(LicenseTally),
}

impl LicenseReport {
    /// Select the template for a tally.
    #[must_use]
    pub const fn from_tally(tally: LicenseTally) -> Self {
        if tally.is_over_limit() {
            Self::Overage(tally)
        } else {
            Self::WithinLimit(tally)
        }
    }

    /// Short title, used in logs.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Overage(_) => "Calendly License Alert",
            Self::WithinLimit(_) => "Calendly License Report",
        }
    }

    /// Render the Slack message text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LicenseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overage(tally) => write!(
                f,
                ":rotating_light:calendly: *{}* :calendly::rotating_light:\n\
                 Used Licenses: {}\n\
                 Total Licenses: {}\n\
                 Overage: {}\n\
                 *Immediate action required to resolve the overage.*",
                self.title(),
                tally.used,
                tally.total,
                tally.overage(),
            ),
            Self::WithinLimit(tally) => write!(
                f,
                ":calendly: *{}* :calendly:\n\
                 Used Licenses: {}\n\
                 Total Licenses: {}\n\
                 Available Licenses: {}\n\
                 *All licenses are within the allocated limit.*",
                self.title(),
                tally.used,
                tally.total,
                tally.available,
            ),
        }
    }
}
