use crate::clock::Clock;
use crate::db::DbPool;
use crate::notification::notification_repository::NotificationRepository;
use crate::notification::notification_service::NotificationService;
use crate::task::task_repository::TaskRepository;
use crate::task::task_service::TaskService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub task_repository: TaskRepository,
    pub notification_repository: NotificationRepository,
    pub task_service: TaskService,
    pub notification_service: NotificationService,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub sweep_interval_hours: u32,
    pub sweep_page_size: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("DATABASE_MAX_CONNECTIONS must be a number"),
            sweep_interval_hours: std::env::var("SWEEP_INTERVAL_HOURS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .expect("SWEEP_INTERVAL_HOURS must be a number"),
            sweep_page_size: std::env::var("SWEEP_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("SWEEP_PAGE_SIZE must be a number"),
        }
    }
}
