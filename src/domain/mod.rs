//! Domain layer - core business types.
//!
//! This layer contains pure domain models, the phone mask and error types
//! without any external dependencies (DB, IO, etc.).

pub mod config;
pub mod error;
pub mod models;
pub mod phone;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use models::{Notification, NotificationKind, Visitor, VisitorFormData};
pub use phone::{digits_only, format_phone};
