use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Human-readable label used in notification descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "taskId")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of task rows plus an explicit signal that more rows exist beyond
/// it. Pagination decisions key off the flag, never off the page length.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Quarterly report".to_string(),
            description: "Draft the quarterly report".to_string(),
            status: TaskStatus::ToDo,
            due_date: now,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_labels() {
        assert_eq!(TaskStatus::ToDo.label(), "To Do");
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
        assert_eq!(TaskStatus::Done.label(), "Done");
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::ToDo).unwrap(), "\"toDo\"");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn task_serializes_with_caller_facing_field_names() {
        let value = serde_json::to_value(sample_task()).unwrap();

        for key in [
            "taskId",
            "userId",
            "name",
            "description",
            "status",
            "dueDate",
            "deleted",
            "createdAt",
            "updatedAt",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(value.get("id").is_none());
        assert!(value.get("user_id").is_none());
    }
}
