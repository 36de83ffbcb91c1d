use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NAME_COLUMN: &str = "Name";
pub const EMAIL_COLUMN: &str = "E-mail";
pub const PHONE_COLUMN: &str = "PhoneNumber";

pub const WHATSAPP_COLUMN: &str = "whatsapp-message";
pub const SUBJECT_COLUMN: &str = "Email_Subject";
pub const BODY_COLUMN: &str = "Email_Body";

/// One person to contact, read from an input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A lead together with every original cell of its row, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub lead: Lead,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSheet {
    pub headers: Vec<String>,
    pub rows: Vec<LeadRow>,
}

impl LeadSheet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three generated fields for a lead. Every field is already sanitized
/// for delimited output; a missing section leaves its field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub whatsapp_message: String,
    pub email_subject: String,
    pub email_body: String,
}

impl ParsedMessage {
    pub fn is_empty(&self) -> bool {
        self.whatsapp_message.is_empty()
            && self.email_subject.is_empty()
            && self.email_body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub row: LeadRow,
    pub message: ParsedMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub generated: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct OutreachResult {
    pub headers: Vec<String>,
    pub rows: Vec<OutputRow>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

/// Linear backoff: the wait after failed attempt `k` is `k * backoff_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_policy_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
    }

    #[test]
    fn test_retry_policy_always_allows_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
