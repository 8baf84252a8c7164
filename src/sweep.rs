use crate::clock::Clock;
use crate::error::Result;
use crate::notification::due::minute_difference;
use crate::state::AppState;
use crate::task::task_models::{TaskPage, TaskStatus};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Storage surface the sweep needs: a page of live tasks and a way to record
/// a due/overdue notification for one of them.
#[allow(async_fn_in_trait)]
pub trait SweepStore {
    async fn task_page(&self, start: i64, limit: i64) -> Result<TaskPage>;

    /// Returns true when a notification was actually stored.
    async fn record_due_over_due(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        minutes_difference: i64,
    ) -> Result<bool>;
}

impl SweepStore for AppState {
    async fn task_page(&self, start: i64, limit: i64) -> Result<TaskPage> {
        self.task_repository.page(start, limit).await
    }

    async fn record_due_over_due(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        minutes_difference: i64,
    ) -> Result<bool> {
        let stored = self
            .notification_service
            .add_due_over_due(user_id, task_id, minutes_difference)
            .await?;
        Ok(stored.is_some())
    }
}

/// Outcome of one sweep run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub pages: u64,
    pub scanned: u64,
    pub notified: u64,
    pub failed: u64,
}

/// One full pass over every live task. Pages run sequentially and advance on
/// the store's has-more flag. A failure for a single task is logged and
/// skipped; a failed page fetch aborts the run.
pub async fn run_sweep<S: SweepStore>(
    store: &S,
    clock: &dyn Clock,
    page_size: i64,
) -> Result<SweepSummary> {
    let mut summary = SweepSummary::default();
    let mut start = 0;

    loop {
        let page = store.task_page(start, page_size).await?;
        summary.pages += 1;

        for task in &page.tasks {
            summary.scanned += 1;
            if task.status == TaskStatus::Done {
                continue;
            }

            let minutes = minute_difference(clock.now(), task.due_date);
            match store.record_due_over_due(task.user_id, task.id, minutes).await {
                Ok(true) => summary.notified += 1,
                Ok(false) => {}
                Err(err) => {
                    summary.failed += 1;
                    warn!(task_id = %task.id, error = %err, "skipping task after notification failure");
                }
            }
        }

        if !page.has_more {
            break;
        }
        start += page_size;
    }

    Ok(summary)
}

/// Handle to the recurring sweep; owns the underlying scheduler so the
/// process lifecycle can stop it.
pub struct SweepScheduler {
    scheduler: JobScheduler,
}

impl SweepScheduler {
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

/// Schedules the sweep every `sweep_interval_hours` and fires one run
/// immediately so a fresh process catches up on due tasks.
pub async fn start_sweep(state: AppState) -> Result<SweepScheduler> {
    let scheduler = JobScheduler::new().await?;

    let schedule = format!("0 0 */{} * * *", state.config.sweep_interval_hours);
    let job_state = state.clone();
    let job = Job::new_async(schedule.as_str(), move |_uuid, _l| {
        let state = job_state.clone();
        Box::pin(async move {
            sweep_once(&state).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    info!(
        interval_hours = state.config.sweep_interval_hours,
        "sweep scheduled"
    );

    tokio::spawn(async move {
        sweep_once(&state).await;
    });

    Ok(SweepScheduler { scheduler })
}

async fn sweep_once(state: &AppState) {
    info!("executing notifications sweep");
    match run_sweep(state, state.clock.as_ref(), state.config.sweep_page_size).await {
        Ok(summary) => info!(
            pages = summary.pages,
            scanned = summary.scanned,
            notified = summary.notified,
            failed = summary.failed,
            "executed notifications sweep"
        ),
        Err(err) => error!(error = %err, "notifications sweep aborted"),
    }
}
