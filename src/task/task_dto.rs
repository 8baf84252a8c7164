use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::validation_messages;
use crate::task::task_models::TaskStatus;

/// Interactive listings page at most this many rows.
pub const MAX_PAGE_LIMIT: i64 = 25;
pub const DEFAULT_PAGE_LIMIT: i64 = 25;

/// Input for creating a task. Status is explicit; callers supply `toDo` for
/// fresh tasks.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[validate(length(max = 250, message = "Key - name length must be <= 250 characters."))]
    pub name: String,
    #[validate(length(
        max = 1000,
        message = "Key - description length must be <= 1000 characters."
    ))]
    pub description: String,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
}

impl TaskDraft {
    /// Collects every field violation instead of stopping at the first.
    pub fn validate_fields(&self) -> Result<(), Vec<String>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation_messages(&e),
        };
        if self.name.trim().is_empty() {
            errors.push("Key - name cannot be empty!".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Key - description cannot be empty!".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial update; only fields present are applied. Absent and "unchanged"
/// are the same thing here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[validate(length(max = 250, message = "Key - name length must be <= 250 characters."))]
    pub name: Option<String>,
    #[validate(length(
        max = 1000,
        message = "Key - description length must be <= 1000 characters."
    ))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }

    pub fn validate_fields(&self) -> Result<(), Vec<String>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation_messages(&e),
        };
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            errors.push("Key - name cannot be empty!".to_string());
        }
        if matches!(&self.description, Some(description) if description.trim().is_empty()) {
            errors.push("Key - description cannot be empty!".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Raw listing filters as a caller supplies them. Date bounds arrive as
/// strings and are only trusted after `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilters {
    pub search_text: Option<String>,
    pub due_date_min: Option<String>,
    pub due_date_max: Option<String>,
    pub created_date_min: Option<String>,
    pub created_date_max: Option<String>,
    pub start: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated listing query consumed by the repository. Due-date and
/// created-date bounds are independent predicates on their own columns.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    pub user_id: Option<Uuid>,
    pub search_text: Option<String>,
    pub due_date_min: Option<DateTime<Utc>>,
    pub due_date_max: Option<DateTime<Utc>>,
    pub created_date_min: Option<DateTime<Utc>>,
    pub created_date_max: Option<DateTime<Utc>>,
    pub start: i64,
    pub limit: i64,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            search_text: None,
            due_date_min: None,
            due_date_max: None,
            created_date_min: None,
            created_date_max: None,
            start: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl TaskFilters {
    /// Checks pagination bounds and date formats, collecting every violation
    /// rather than failing on the first.
    pub fn validate(&self, user_id: Uuid) -> Result<TaskQuery, Vec<String>> {
        let mut errors = Vec::new();

        let start = self.start.unwrap_or(0);
        if start < 0 {
            errors.push("Key - start must be a number and >= 0.".to_string());
        }

        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit <= 0 || limit > MAX_PAGE_LIMIT {
            errors.push("Key - limit must be a number and > 0 and <= 25.".to_string());
        }

        let due_date_min = parse_date_bound(&self.due_date_min, "dueDateMin", &mut errors);
        let due_date_max = parse_date_bound(&self.due_date_max, "dueDateMax", &mut errors);
        let created_date_min = parse_date_bound(&self.created_date_min, "createdDateMin", &mut errors);
        let created_date_max = parse_date_bound(&self.created_date_max, "createdDateMax", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let search_text = self
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(TaskQuery {
            user_id: Some(user_id),
            search_text,
            due_date_min,
            due_date_max,
            created_date_min,
            created_date_max,
            start,
            limit,
        })
    }
}

fn parse_date_bound(
    value: &Option<String>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<DateTime<Utc>> {
    let raw = value.as_deref()?.trim();
    match parse_date(raw) {
        Some(ts) => Some(ts),
        None => {
            errors.push(format!("Key - {key} must be a date."));
            None
        }
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, description: &str) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            description: description.to_string(),
            status: TaskStatus::ToDo,
            due_date: Utc::now(),
        }
    }

    #[test]
    fn draft_accepts_reasonable_fields() {
        assert!(draft("Pay rent", "Transfer before the 5th").validate_fields().is_ok());
    }

    #[test]
    fn draft_rejects_blank_name_and_description() {
        let errors = draft("   ", "\t").validate_fields().unwrap_err();
        assert!(errors.contains(&"Key - name cannot be empty!".to_string()));
        assert!(errors.contains(&"Key - description cannot be empty!".to_string()));
    }

    #[test]
    fn draft_rejects_oversized_fields() {
        let errors = draft(&"x".repeat(251), &"y".repeat(1001)).validate_fields().unwrap_err();
        assert!(errors.contains(&"Key - name length must be <= 250 characters.".to_string()));
        assert!(errors
            .contains(&"Key - description length must be <= 1000 characters.".to_string()));
    }

    #[test]
    fn patch_is_empty_only_without_fields() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_rejects_blank_replacement_name() {
        let patch = TaskPatch {
            name: Some("  ".to_string()),
            ..TaskPatch::default()
        };
        let errors = patch.validate_fields().unwrap_err();
        assert_eq!(errors, vec!["Key - name cannot be empty!".to_string()]);
    }

    #[test]
    fn filters_default_to_first_page_of_25() {
        let query = TaskFilters::default().validate(Uuid::new_v4()).unwrap();
        assert_eq!(query.start, 0);
        assert_eq!(query.limit, 25);
    }

    #[test]
    fn filters_reject_negative_start() {
        let filters = TaskFilters {
            start: Some(-1),
            ..TaskFilters::default()
        };
        let errors = filters.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(errors, vec!["Key - start must be a number and >= 0.".to_string()]);
    }

    #[test]
    fn filters_reject_limit_outside_window() {
        for limit in [0, 26, -3] {
            let filters = TaskFilters {
                limit: Some(limit),
                ..TaskFilters::default()
            };
            let errors = filters.validate(Uuid::new_v4()).unwrap_err();
            assert_eq!(
                errors,
                vec!["Key - limit must be a number and > 0 and <= 25.".to_string()],
                "limit {limit} should be rejected"
            );
        }
    }

    #[test]
    fn filters_accept_limit_at_cap() {
        let filters = TaskFilters {
            limit: Some(25),
            ..TaskFilters::default()
        };
        assert_eq!(filters.validate(Uuid::new_v4()).unwrap().limit, 25);
    }

    #[test]
    fn filters_collect_every_bad_date() {
        let filters = TaskFilters {
            due_date_min: Some("not-a-date".to_string()),
            created_date_max: Some("also bad".to_string()),
            ..TaskFilters::default()
        };
        let errors = filters.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Key - dueDateMin must be a date.".to_string(),
                "Key - createdDateMax must be a date.".to_string(),
            ]
        );
    }

    #[test]
    fn filters_parse_both_date_shapes() {
        let filters = TaskFilters {
            due_date_min: Some("2026-08-01".to_string()),
            due_date_max: Some("2026-08-06T12:30:00Z".to_string()),
            created_date_min: Some("2026-07-01".to_string()),
            created_date_max: Some("2026-07-31".to_string()),
            ..TaskFilters::default()
        };
        let query = filters.validate(Uuid::new_v4()).unwrap();
        assert_eq!(
            query.due_date_min.unwrap().to_rfc3339(),
            "2026-08-01T00:00:00+00:00"
        );
        assert_eq!(
            query.due_date_max.unwrap().to_rfc3339(),
            "2026-08-06T12:30:00+00:00"
        );
        // Due and created bounds stay independent of each other.
        assert_eq!(
            query.created_date_min.unwrap().to_rfc3339(),
            "2026-07-01T00:00:00+00:00"
        );
        assert_eq!(
            query.created_date_max.unwrap().to_rfc3339(),
            "2026-07-31T00:00:00+00:00"
        );
    }

    #[test]
    fn blank_search_text_is_dropped() {
        let filters = TaskFilters {
            search_text: Some("   ".to_string()),
            ..TaskFilters::default()
        };
        assert!(filters.validate(Uuid::new_v4()).unwrap().search_text.is_none());
    }
}
