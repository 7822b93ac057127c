// src/notify/mod.rs

//! Notification sinks.
//!
//! The monitor only depends on the `Notifier` capability; the concrete
//! channel is chosen from configuration at start-up.

pub mod twilio;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::NotifierConfig;

// Re-export for convenience
pub use twilio::TwilioNotifier;

/// Trait for anything that can deliver an alert message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one human-readable message.
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Build the configured notifier.
pub fn from_config(config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
    match config {
        NotifierConfig::Console => Ok(Arc::new(ConsoleNotifier)),
        NotifierConfig::Twilio(twilio) => Ok(Arc::new(TwilioNotifier::new(twilio.clone())?)),
    }
}

/// Notifier that only writes the alert to the log. Useful for dry runs.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        log::info!("ALERT: {}", message);
        Ok(())
    }
}
