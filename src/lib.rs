//! Task/notification backend core: task and notification stores backed by
//! Postgres, due/overdue classification, and the recurring sweep that keeps
//! due-date notifications fresh. Callers are expected to hand every operation
//! an already-authenticated user id.

pub mod clock;
pub mod db;
pub mod error;
pub mod notification;
pub mod state;
pub mod sweep;
pub mod task;
