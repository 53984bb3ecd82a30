//! Dry-run channel that prints alerts instead of posting them.

use std::io::Write;

use async_trait::async_trait;

use super::AlertChannel;
use crate::error::Result;

/// Writes the alert text to standard output.
#[derive(Debug, Default)]
pub struct StdoutChannel;

#[async_trait]
impl AlertChannel for StdoutChannel {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn send(&self, message: &str) -> Result<()> {
        writeln!(std::io::stdout(), "{message}")?;
        Ok(())
    }
}
