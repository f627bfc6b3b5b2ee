use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::GithubConfig;
use crate::submission::Submission;

use super::{Notifier, NotifyError};

/// Fires a `repository_dispatch` event so a workflow in the target repo can
/// append the registration to its CSV.
pub struct GithubDispatchNotifier {
    client: reqwest::Client,
    config: GithubConfig,
    api_base: String,
}

impl GithubDispatchNotifier {
    pub fn new(config: GithubConfig, api_base: String, timeout: Duration) -> Self {
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
impl Notifier for GithubDispatchNotifier {
    fn name(&self) -> &'static str {
        "github-dispatch"
    }

    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let url = format!("{}/repos/{}/dispatches", self.api_base, self.config.repo);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github.v3+json")
            // GitHub rejects requests without a User-Agent
            .header("User-Agent", "earlybird")
            .json(&json!({
                "event_type": "email_registered",
                "client_payload": {
                    "email": submission.email,
                    "idea": submission.idea,
                    "timestamp": submission.timestamp.to_rfc3339(),
                },
            }))
            .send()
            .await
            .map_err(|e| NotifyError::from(format!("dispatch request failed: {e}")))?;

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
                "dispatch returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
