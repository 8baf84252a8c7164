use crate::error::Result;
use crate::task::task_dto::{TaskDraft, TaskPatch, TaskQuery};
use crate::task::task_models::{Task, TaskPage};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE id = $1 AND user_id = $2 AND deleted = FALSE",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid], user_id: Uuid) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE id = ANY($1) AND user_id = $2 AND deleted = FALSE",
        )
        .bind(ids)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    /// Filtered, paginated listing. Fetches one row past the limit so the
    /// returned page carries an explicit has-more flag.
    pub async fn find_all(&self, query: &TaskQuery) -> Result<TaskPage> {
        let mut sql = "SELECT * FROM tasks WHERE deleted = FALSE".to_string();
        let mut params_count = 0;

        if query.user_id.is_some() {
            params_count += 1;
            sql.push_str(&format!(" AND user_id = ${params_count}"));
        }

        let patterns = query.search_text.as_deref().map(like_patterns);
        if patterns.is_some() {
            params_count += 1;
            sql.push_str(&format!(
                " AND (name ILIKE ANY(${params_count}) OR description ILIKE ANY(${params_count}))"
            ));
        }

        if query.due_date_min.is_some() {
            params_count += 1;
            sql.push_str(&format!(" AND due_date >= ${params_count}"));
        }
        if query.due_date_max.is_some() {
            params_count += 1;
            sql.push_str(&format!(" AND due_date <= ${params_count}"));
        }
        if query.created_date_min.is_some() {
            params_count += 1;
            sql.push_str(&format!(" AND created_at >= ${params_count}"));
        }
        if query.created_date_max.is_some() {
            params_count += 1;
            sql.push_str(&format!(" AND created_at <= ${params_count}"));
        }

        sql.push_str(" ORDER BY created_at, id");
        sql.push_str(&format!(" OFFSET ${}", params_count + 1));
        sql.push_str(&format!(" LIMIT ${}", params_count + 2));

        let mut db_query = sqlx::query_as::<_, Task>(&sql);

        if let Some(user_id) = query.user_id {
            db_query = db_query.bind(user_id);
        }
        if let Some(patterns) = patterns {
            db_query = db_query.bind(patterns);
        }
        if let Some(ts) = query.due_date_min {
            db_query = db_query.bind(ts);
        }
        if let Some(ts) = query.due_date_max {
            db_query = db_query.bind(ts);
        }
        if let Some(ts) = query.created_date_min {
            db_query = db_query.bind(ts);
        }
        if let Some(ts) = query.created_date_max {
            db_query = db_query.bind(ts);
        }
        db_query = db_query.bind(query.start).bind(query.limit + 1);

        let mut tasks = db_query.fetch_all(&self.pool).await?;
        let has_more = tasks.len() as i64 > query.limit;
        tasks.truncate(query.limit as usize);

        Ok(TaskPage { tasks, has_more })
    }

    /// Unscoped page over every live task in stable insertion order. Used by
    /// the sweep; the interactive page-size cap does not apply here.
    pub async fn page(&self, start: i64, limit: i64) -> Result<TaskPage> {
        let mut tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE deleted = FALSE ORDER BY created_at, id OFFSET $1 LIMIT $2",
        )
        .bind(start)
        .bind(limit + 1)
        .fetch_all(&self.pool)
        .await?;
        let has_more = tasks.len() as i64 > limit;
        tasks.truncate(limit as usize);

        Ok(TaskPage { tasks, has_more })
    }

    pub async fn create(&self, user_id: Uuid, draft: &TaskDraft) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, name, description, status, due_date, deleted)
             VALUES ($1, $2, $3, $4, $5, FALSE)
             RETURNING *",
        )
        .bind(user_id)
        .bind(draft.name.trim())
        .bind(draft.description.trim())
        .bind(draft.status)
        .bind(draft.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(&self, id: Uuid, user_id: Uuid, patch: &TaskPatch) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                due_date = COALESCE($4, due_date),
                updated_at = NOW()
             WHERE id = $5 AND user_id = $6 AND deleted = FALSE
             RETURNING *",
        )
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.description.as_deref().map(str::trim))
        .bind(patch.status)
        .bind(patch.due_date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Idempotent soft delete; a missing id is a no-op.
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE tasks SET deleted = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Tokenizes a search phrase on whitespace, dashes, and underscores and turns
/// each token into an escaped ILIKE substring pattern. A row matches when any
/// token matches its name or description.
fn like_patterns(search_text: &str) -> Vec<String> {
    search_text
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let escaped = token.replace('\\', "\\\\").replace('%', "\\%");
            format!("%{escaped}%")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_patterns_split_on_every_separator() {
        assert_eq!(
            like_patterns("alpha-beta gamma_delta"),
            vec!["%alpha%", "%beta%", "%gamma%", "%delta%"]
        );
    }

    #[test]
    fn like_patterns_collapse_repeated_separators() {
        assert_eq!(like_patterns("  weekly -- report__ "), vec!["%weekly%", "%report%"]);
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(like_patterns("50% \\done"), vec!["%50\\%%", "%\\\\done%"]);
    }
}
