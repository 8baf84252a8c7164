use crate::clock::Clock;
use crate::error::{AppError, Result};
use crate::notification::due::minute_difference;
use crate::notification::notification_models::NotificationType;
use crate::notification::notification_service::NotificationService;
use crate::task::task_dto::{TaskDraft, TaskFilters, TaskPatch};
use crate::task::task_models::{Task, TaskPage, TaskStatus};
use crate::task::task_repository::TaskRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Service layer for task business logic: storage writes plus the
/// notification side-effects that accompany them. There is no transaction
/// spanning a task write and its notifications; a crash between the two
/// leaves the task mutation without the notification.
#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    notifications: NotificationService,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(
        repo: TaskRepository,
        notifications: NotificationService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            notifications,
            clock,
        }
    }

    pub async fn get_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Task> {
        self.repo
            .find_by_id(task_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task not found for taskId: {task_id}")))
    }

    pub async fn get_tasks_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Result<Vec<Task>> {
        self.repo.find_by_ids(ids, user_id).await
    }

    pub async fn list_tasks(&self, user_id: Uuid, filters: TaskFilters) -> Result<TaskPage> {
        let query = filters.validate(user_id).map_err(AppError::Validation)?;
        self.repo.find_all(&query).await
    }

    /// Creates the task, then records the creation notification and, for
    /// tasks that are not already done, the due/overdue notification.
    pub async fn create_task(&self, user_id: Uuid, draft: TaskDraft) -> Result<Task> {
        draft.validate_fields().map_err(AppError::Validation)?;

        let task = self.repo.create(user_id, &draft).await?;

        self.notifications
            .insert(user_id, task.id, NotificationType::TaskCreated, &task.name)
            .await?;

        if task.status != TaskStatus::Done {
            let minutes = minute_difference(self.clock.now(), task.due_date);
            self.notifications
                .add_due_over_due(user_id, task.id, minutes)
                .await?;
        }

        Ok(task)
    }

    /// Applies the fields present in the patch and records one notification
    /// per applied field. A due-date change on a task that is not done also
    /// re-runs due/overdue classification.
    pub async fn update_task(&self, user_id: Uuid, task_id: Uuid, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(AppError::NothingToUpdate);
        }
        patch.validate_fields().map_err(AppError::Validation)?;

        let before = self
            .repo
            .find_by_id(task_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task not found for taskId: {task_id}")))?;

        let task = self
            .repo
            .update(task_id, user_id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task not found for taskId: {task_id}")))?;

        for description in change_descriptions(&before, &task, &patch) {
            self.notifications
                .insert(user_id, task_id, NotificationType::TaskUpdated, &description)
                .await?;
        }

        if patch.due_date.is_some() && task.status != TaskStatus::Done {
            let minutes = minute_difference(self.clock.now(), task.due_date);
            self.notifications
                .add_due_over_due(user_id, task_id, minutes)
                .await?;
        }

        Ok(task)
    }

    /// Soft delete; the row is kept and excluded from all reads from here on.
    pub async fn delete_task(&self, task_id: Uuid) -> Result<()> {
        self.repo.soft_delete(task_id).await
    }
}

/// One notification line per field the patch touched, in field order.
fn change_descriptions(before: &Task, after: &Task, patch: &TaskPatch) -> Vec<String> {
    let mut descriptions = Vec::new();

    if patch.name.is_some() {
        descriptions.push("Task name updated.".to_string());
    }
    if patch.description.is_some() {
        descriptions.push("Task description updated.".to_string());
    }
    if patch.status.is_some() {
        descriptions.push(format!(
            "Task status updated from {} to {}",
            before.status.label(),
            after.status.label()
        ));
    }
    if patch.due_date.is_some() {
        descriptions.push(format!(
            "Task due date updated from {} to {}",
            before.due_date.format("%b %-d, %Y"),
            after.due_date.format("%b %-d, %Y")
        ));
    }

    descriptions
}
