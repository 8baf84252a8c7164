pub mod due;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;

pub use due::{classify, minute_difference, DueNotice};
pub use notification_models::{Notification, NotificationType};
pub use notification_repository::NotificationRepository;
pub use notification_service::NotificationService;
