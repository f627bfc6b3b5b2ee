use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::error::AppError;

/// Syntactic pre-filter, not RFC validation: one non-whitespace/non-`@`
/// run, an `@`, another run, a `.`, another run.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Raw request payload. Fields are optional so a missing key fails
/// validation with a 400 instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A validated submission. Exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Submission {
    pub email: String,
    pub idea: String,
    pub timestamp: DateTime<Utc>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a raw payload into a `Submission`, substituting the receipt
/// time when no timestamp was supplied. Invalid payloads never reach the
/// notification sinks.
pub fn validate(req: SubmitRequest, received_at: DateTime<Utc>) -> Result<Submission, AppError> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let idea = req.idea.as_deref().map(str::trim).unwrap_or_default();

    if email.is_empty() || idea.is_empty() {
        return Err(AppError::Validation(
            "Email and idea are required".to_string(),
        ));
    }

    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email".to_string()));
    }

    Ok(Submission {
        email: email.to_string(),
        idea: idea.to_string(),
        timestamp: req.timestamp.unwrap_or(received_at),
    })
}

impl Submission {
    /// Human-readable notification text for the chat sink.
    pub fn notification_text(&self) -> String {
        format!(
            "🎉 NEW REGISTRATION\n\n\
             📧 Email: {}\n\
             💡 Idea: {}\n\
             📅 {}\n\n\
             Someone wants early access!",
            self.email,
            self.idea,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}
