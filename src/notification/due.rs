use chrono::{DateTime, Utc};

use crate::notification::notification_models::NotificationType;

/// Tasks due within this window get a "due soon" notification.
pub const DUE_WINDOW_MINUTES: i64 = 24 * 60;

/// A classified due/overdue alert ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueNotice {
    pub kind: NotificationType,
    pub description: String,
}

/// Whole minutes from `now` until `due_date`; negative once the due date has
/// passed.
pub fn minute_difference(now: DateTime<Utc>, due_date: DateTime<Utc>) -> i64 {
    (due_date - now).num_minutes()
}

/// Maps a minute delta to the notification it warrants, if any. Overdue wins
/// at exactly zero; anything beyond 24 hours out is silent.
pub fn classify(minutes_difference: i64) -> Option<DueNotice> {
    let hours = minutes_difference.abs() as f64 / 60.0;
    if minutes_difference <= 0 {
        Some(DueNotice {
            kind: NotificationType::TaskOverDue,
            description: format!("Task overdue by {hours:.2} hours."),
        })
    } else if minutes_difference <= DUE_WINDOW_MINUTES {
        Some(DueNotice {
            kind: NotificationType::TaskDue,
            description: format!("Task due in {hours:.2} hours."),
        })
    } else {
        None
    }
}
