// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Notification formatting and the mail transport boundary.
//!
//! Formatting is pure and tested here; actually speaking a wire mail
//! protocol is behind the [`MailTransport`] trait so the pipeline never
//! depends on a concrete transport. The shipped [`LogTransport`] emits the
//! composed message through tracing, which doubles as the dry-run sink.

use crate::error::MoodResult;
use crate::extract::MoodRecord;
use async_trait::async_trait;

/// A composed, ready-to-send notification.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
    pub cc: Vec<String>,
}

impl EmailMessage {
    /// All recipients, primary first.
    pub fn recipients(&self) -> Vec<&str> {
        std::iter::once(self.to.as_str())
            .chain(self.cc.iter().map(String::as_str))
            .collect()
    }
}

/// Subject line: the entry date rides along so a mailbox listing already
/// tells the days apart.
pub fn format_subject(record: &MoodRecord) -> String {
    format!("BLC Stimmungsbarometer | {}", record.date)
}

/// Body: one `label: value` line per field in preserved order, then a
/// blank-line-separated `Bemerkung` trailer. A missing picker value is
/// rendered as `-`.
pub fn format_body(record: &MoodRecord) -> String {
    let mut body = String::new();
    for field in &record.fields {
        body.push_str(&field.label);
        body.push_str(": ");
        body.push_str(field.value.as_deref().unwrap_or("-"));
        body.push('\n');
    }
    body.push_str("\nBemerkung: ");
    body.push_str(&record.remark);
    body
}

/// Compose the notification for a record.
pub fn compose(record: &MoodRecord, from: &str, to: &str, cc: &[String]) -> EmailMessage {
    EmailMessage {
        subject: format_subject(record),
        body: format_body(record),
        from: from.to_string(),
        to: to.to_string(),
        cc: cc.to_vec(),
    }
}

/// Parse a comma-separated CC list, trimming entries and dropping empties.
pub fn parse_cc_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Black-box delivery capability. Implementations own the wire mechanics;
/// the pipeline only ever calls `deliver`.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: &EmailMessage) -> MoodResult<()>;
}

/// Transport that logs the message instead of sending it.
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn deliver(&self, message: &EmailMessage) -> MoodResult<()> {
        tracing::info!(
            subject = %message.subject,
            to = %message.to,
            cc = message.cc.len(),
            "delivering mood notification"
        );
        tracing::debug!(body = %message.body, "notification body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MoodField;

    fn sample_record() -> MoodRecord {
        MoodRecord {
            date: "2024-05-01".to_string(),
            fields: vec![
                MoodField {
                    label: "Stimmung".to_string(),
                    value: Some("gut".to_string()),
                },
                MoodField {
                    label: "Energie".to_string(),
                    value: None,
                },
            ],
            remark: "Guter Tag".to_string(),
        }
    }

    #[test]
    fn subject_carries_the_date() {
        assert_eq!(
            format_subject(&sample_record()),
            "BLC Stimmungsbarometer | 2024-05-01"
        );
    }

    #[test]
    fn body_lists_fields_in_order_with_remark_trailer() {
        let body = format_body(&sample_record());
        assert_eq!(body, "Stimmung: gut\nEnergie: -\n\nBemerkung: Guter Tag");
    }

    #[test]
    fn empty_record_still_has_the_remark_trailer() {
        let body = format_body(&MoodRecord::default());
        assert_eq!(body, "\nBemerkung: ");
    }

    #[test]
    fn cc_list_trims_and_drops_empties() {
        assert_eq!(
            parse_cc_list(" oma@example.com , , opa@example.com,"),
            ["oma@example.com", "opa@example.com"]
        );
        assert!(parse_cc_list("").is_empty());
    }

    #[test]
    fn recipients_put_primary_first() {
        let msg = compose(
            &sample_record(),
            "bot@example.com",
            "eltern@example.com",
            &["oma@example.com".to_string()],
        );
        assert_eq!(msg.recipients(), ["eltern@example.com", "oma@example.com"]);
    }

    #[test]
    fn log_transport_accepts_any_message() {
        let msg = compose(&sample_record(), "a@example.com", "b@example.com", &[]);
        tokio_test::block_on(LogTransport.deliver(&msg)).unwrap();
    }
}
