//! Notification system for the GUI
//!
//! Keeps a short history of clear outcomes for the notification strip.

use crate::view_state::BulkReport;
use std::collections::VecDeque;

/// Oldest entries are dropped past this many
pub const MAX_NOTIFICATIONS: usize = 20;

/// A notification entry with message and timestamp
#[derive(Clone)]
pub struct NotificationEntry {
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, chrono::Local::now())
    }

    pub fn at(message: impl Into<String>, timestamp: chrono::DateTime<chrono::Local>) -> Self {
        Self {
            message: message.into(),
            timestamp,
        }
    }

    pub fn time_ago(&self) -> String {
        self.time_ago_from(chrono::Local::now())
    }

    fn time_ago_from(&self, now: chrono::DateTime<chrono::Local>) -> String {
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

pub fn push_notification(notifications: &mut VecDeque<NotificationEntry>, message: impl Into<String>) {
    notifications.push_back(NotificationEntry::new(message));
    while notifications.len() > MAX_NOTIFICATIONS {
        notifications.pop_front();
    }
}

/// One line for the notification strip, plus one per failed transaction
pub fn bulk_report_messages(report: &BulkReport) -> Vec<String> {
    let mut messages = vec![report.summary()];
    for (id, error) in &report.failed {
        let short_error = if error.chars().count() > 60 {
            format!("{}...", error.chars().take(60).collect::<String>())
        } else {
            error.clone()
        };
        messages.push(format!("[!!] Tx #{} not cleared: {}", id, short_error));
    }
    messages
}
