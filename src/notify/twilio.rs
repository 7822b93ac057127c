// src/notify/twilio.rs

//! SMS delivery via the Twilio Messages API.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::TwilioConfig;
use crate::notify::Notifier;

/// Notifier that sends the alert as an SMS through Twilio.
pub struct TwilioNotifier {
    config: TwilioConfig,
    client: Client,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let params = [
            ("Body", message),
            ("From", self.config.from_number.as_str()),
            ("To", self.config.to_number.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::notify(format!("SMS request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::notify(format!(
                "SMS delivery rejected ({status}): {body}"
            )));
        }

        log::debug!("SMS delivered to {}", self.config.to_number);
        Ok(())
    }
}
