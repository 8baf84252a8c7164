use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    TaskCreated,
    TaskDue,
    TaskOverDue,
    TaskUpdated,
}

/// A stored notification. Immutable after insert except for the read flag;
/// notifications are never deleted and carry no update timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "notificationId")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: NotificationType,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationType::TaskCreated).unwrap(),
            "\"taskCreated\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::TaskDue).unwrap(),
            "\"taskDue\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::TaskOverDue).unwrap(),
            "\"taskOverDue\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::TaskUpdated).unwrap(),
            "\"taskUpdated\""
        );
    }

    #[test]
    fn notification_serializes_with_caller_facing_field_names() {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            description: "Task due in 2.00 hours.".to_string(),
            kind: NotificationType::TaskDue,
            is_read: false,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(notification).unwrap();

        for key in [
            "notificationId",
            "userId",
            "taskId",
            "description",
            "type",
            "isRead",
            "createdAt",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value.get("id").is_none());
        assert!(value.get("kind").is_none());
    }
}
