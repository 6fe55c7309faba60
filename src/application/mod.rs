// src/application/mod.rs
//
// Application Layer
//
// - Boundary between the webview (Tauri) and the services
// - Translates between DTOs and domain types
// - Forwards domain events to the webview as notifications
//
// Commands need the Tauri runtime and only build with the `desktop` feature.

#[cfg(feature = "desktop")]
pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod notifications;
pub mod state;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use notifications::{register_notification_handlers, Notification, NotificationLevel};
pub use state::AppState;
