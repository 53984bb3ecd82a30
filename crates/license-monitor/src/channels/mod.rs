//! Alert channel implementations.

pub mod slack;
pub mod stdout;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for alert delivery channels (Slack, stdout, etc.).
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver a rendered message.
    async fn send(&self, message: &str) -> Result<()>;
}
