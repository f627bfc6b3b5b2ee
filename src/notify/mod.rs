pub mod github;
pub mod telegram;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::submission::Submission;

#[derive(Debug)]
pub struct NotifyError {
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for NotifyError {
    fn from(s: String) -> Self {
        NotifyError { message: s }
    }
}

impl From<&str> for NotifyError {
    fn from(s: &str) -> Self {
        NotifyError {
            message: s.to_string(),
        }
    }
}

/// A best-effort notification sink. Implementations own their HTTP client
/// and credentials; a sink with missing credentials is never constructed.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}

pub struct NotifierSet {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn register(&mut self, sink: Arc<dyn Notifier>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Fan a submission out to every registered sink concurrently. Each
    /// sink runs in its own error boundary: a failure is logged and
    /// swallowed, and cannot affect the other sinks or the HTTP response.
    pub async fn fan_out(&self, submission: &Submission) {
        let attempts = self.sinks.iter().map(|sink| async move {
            match sink.notify(submission).await {
                Ok(()) => {
                    tracing::info!(sink = sink.name(), email = %submission.email, "Notification delivered");
                }
                Err(e) => {
                    tracing::warn!(sink = sink.name(), "Notification delivery failed: {e}");
                }
            }
        });

        join_all(attempts).await;
    }
}

impl Default for NotifierSet {
    fn default() -> Self {
        Self::new()
    }
}
