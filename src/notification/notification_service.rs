use crate::error::{AppError, Result};
use crate::notification::due::classify;
use crate::notification::notification_models::{Notification, NotificationType};
use crate::notification::notification_repository::NotificationRepository;
use uuid::Uuid;

const DEFAULT_PAGE_LIMIT: i64 = 25;

/// Service layer over the notification store.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn get_notification(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification> {
        self.repo.find_by_id(notification_id, user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Notification not found for notificationId: {notification_id}"
            ))
        })
    }

    /// Page of a user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        user_id: Uuid,
        start: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>> {
        self.repo
            .find_all_by_user(
                user_id,
                start.unwrap_or(0),
                limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            )
            .await
    }

    pub async fn insert(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        kind: NotificationType,
        description: &str,
    ) -> Result<Notification> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(vec![
                "Key - description cannot be empty!".to_string(),
            ]));
        }
        self.repo.create(user_id, task_id, kind, description).await
    }

    /// Stores the due/overdue notification warranted by `minutes_difference`,
    /// or nothing when the due date is more than a day out.
    pub async fn add_due_over_due(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        minutes_difference: i64,
    ) -> Result<Option<Notification>> {
        match classify(minutes_difference) {
            Some(notice) => {
                let stored = self
                    .insert(user_id, task_id, notice.kind, &notice.description)
                    .await?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    /// Idempotent; an unknown id is a no-op.
    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> Result<()> {
        self.repo.mark_as_read(notification_id, user_id).await?;
        Ok(())
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        self.repo.unread_count(user_id).await
    }
}
