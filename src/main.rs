use std::sync::Arc;

use task_notifier::clock::{Clock, SystemClock};
use task_notifier::db::{create_pool, run_migrations};
use task_notifier::notification::notification_repository::NotificationRepository;
use task_notifier::notification::notification_service::NotificationService;
use task_notifier::state::{AppState, Config};
use task_notifier::sweep;
use task_notifier::task::task_repository::TaskRepository;
use task_notifier::task::task_service::TaskService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,task_notifier=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    tracing::info!("Connecting to database...");
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Create repositories
    let task_repository = TaskRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());

    // Create services
    let notification_service = NotificationService::new(notification_repository.clone());
    let task_service = TaskService::new(
        task_repository.clone(),
        notification_service.clone(),
        clock.clone(),
    );

    let state = AppState {
        db,
        config,
        clock,
        task_repository,
        notification_repository,
        task_service,
        notification_service,
    };

    // Start the recurring due/overdue sweep
    let mut sweeper = sweep::start_sweep(state).await?;

    tracing::info!("Sweep service running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    sweeper.shutdown().await?;

    Ok(())
}
