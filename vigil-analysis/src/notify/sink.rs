//! Notification sink over HTTPS.

use std::time::Duration;

use serde_json::json;

use vigil_core::errors::NotifyError;

use super::credentials::NotifyCredentials;

/// Where condensed alerts go.
pub trait NotificationSink {
    fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Bot API sink: `POST {api_base}/bot{token}/sendMessage` with `{chat_id, text}`.
pub struct TelegramSink {
    client: reqwest::blocking::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(api_base: &str, credentials: &NotifyCredentials, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifyError::Request(e.without_url().to_string()))?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                credentials.bot_token
            ),
            chat_id: credentials.chat_id.clone(),
        })
    }
}

impl NotificationSink for TelegramSink {
    fn send(&self, text: &str) -> Result<(), NotifyError> {
        // The endpoint embeds the token; errors are reported without the URL.
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .map_err(|e| NotifyError::Request(e.without_url().to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        tracing::info!(chars = text.chars().count(), "notification sent");
        Ok(())
    }
}
