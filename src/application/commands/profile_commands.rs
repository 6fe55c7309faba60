// src/application/commands/profile_commands.rs
//
// Profile, dashboard and outbound links

use tauri::{AppHandle, State};
use tauri_plugin_shell::ShellExt;

use crate::application::dto::AssetLinksDto;
use crate::application::error_handling::{ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::validation::validate_url;
use crate::domain::SortOption;
use crate::error::AppError;
use crate::services::{Dashboard, Profile};

#[tauri::command]
pub async fn get_profile(state: State<'_, AppState>) -> Result<Profile, String> {
    state.profile_service.profile().await.to_error_response()
}

/// Dashboard lists use their own sort selectors, not the persisted one
#[tauri::command]
pub async fn get_dashboard(
    token_sort: Option<SortOption>,
    nft_sort: Option<SortOption>,
    state: State<'_, AppState>,
) -> Result<Dashboard, String> {
    state
        .profile_service
        .dashboard(token_sort.unwrap_or_default(), nft_sort.unwrap_or_default())
        .to_error_response()
}

#[tauri::command]
pub async fn get_asset_links(
    name: String,
    symbol: String,
    address: String,
    state: State<'_, AppState>,
) -> Result<AssetLinksDto, String> {
    AssetLinksDto::build(&state.links, &name, &symbol, &address).to_error_response()
}

/// Open an http(s) link in the system browser
#[tauri::command]
#[allow(deprecated)]
pub async fn open_link(url: String, app: AppHandle) -> Result<(), String> {
    validate_url("link", &url)
        .map_err(AppError::from)
        .to_error_response()?;
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        let response = ErrorResponse::validation("Only web links can be opened".to_string());
        return Err(serde_json::to_string(&response).unwrap_or_else(|_| response.message));
    }

    app.shell()
        .open(url, None)
        .map_err(|e| AppError::Other(format!("Failed to open link: {}", e)))
        .to_error_response()
}
