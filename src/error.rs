use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

#[derive(Error, Debug)]
pub enum AppError {
    // Storage failures stay opaque to callers; the source is kept for logs.
    #[error("Something went wrong.")]
    Database(#[from] sqlx::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),

    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("Nothing to update!")]
    NothingToUpdate,
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(validation_messages(&err))
    }
}

/// Flattens derive-produced validation errors into the field-tagged message
/// list callers receive. Sorted so the order is stable.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Key - {field} is invalid."),
            })
        })
        .collect();
    messages.sort();
    messages
}

pub type Result<T> = std::result::Result<T, AppError>;
