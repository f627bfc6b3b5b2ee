use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::TelegramConfig;
use crate::submission::Submission;

use super::{Notifier, NotifyError};

pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, api_base: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build reqwest client"),
            config,
            api_base,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base, self.config.bot_token
        );

        let resp = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.config.chat_id,
                "text": submission.notification_text(),
                "parse_mode": "Markdown",
            }))
            .send()
            .await
            .map_err(|e| NotifyError::from(format!("sendMessage request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(NotifyError::from(format!(
                "sendMessage returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
