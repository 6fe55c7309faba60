// src/application/commands/mod.rs
//
// Tauri Command Handlers
//
// - Commands are thin adapters between the webview and services
// - Commands handle error conversion for Tauri (ErrorResponse JSON)
// - Commands NEVER contain business logic

pub mod asset_commands;
pub mod deployment_commands;
pub mod fee_commands;
pub mod operation_commands;
pub mod profile_commands;
pub mod transfer_commands;

pub use asset_commands::*;
pub use deployment_commands::*;
pub use fee_commands::*;
pub use operation_commands::*;
pub use profile_commands::*;
pub use transfer_commands::*;
