//! Notifier that only writes to the tracing log.

use async_trait::async_trait;

use mowwatch_core::{Notifier, NotifyError};

/// Logs every message at `info` level. Never fails.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        tracing::info!(message, "Notification (no delivery channel configured)");
        Ok(())
    }
}
