// src/application/commands/asset_commands.rs
//
// Deployed-asset listing, favorites and listing preferences

use tauri::State;

use crate::application::dto::{sort_options, PageDto, PreferencesDto, SortOptionDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::{NftCollection, SortOption, Token, ViewMode};

/// Tokens under the current sort option
#[tauri::command]
pub async fn list_tokens(state: State<'_, AppState>) -> Result<Vec<Token>, String> {
    state.asset_cache.tokens().to_error_response()
}

#[tauri::command]
pub async fn list_nfts(state: State<'_, AppState>) -> Result<Vec<NftCollection>, String> {
    state.asset_cache.nfts().to_error_response()
}

#[tauri::command]
pub async fn get_token_page(
    page: usize,
    state: State<'_, AppState>,
) -> Result<PageDto<Token>, String> {
    state
        .asset_cache
        .token_page(page)
        .map(PageDto::from)
        .to_error_response()
}

#[tauri::command]
pub async fn get_nft_page(
    page: usize,
    state: State<'_, AppState>,
) -> Result<PageDto<NftCollection>, String> {
    state
        .asset_cache
        .nft_page(page)
        .map(PageDto::from)
        .to_error_response()
}

#[tauri::command]
pub async fn list_favorite_tokens(state: State<'_, AppState>) -> Result<Vec<Token>, String> {
    state.asset_cache.favorite_tokens().to_error_response()
}

#[tauri::command]
pub async fn list_favorite_nfts(
    state: State<'_, AppState>,
) -> Result<Vec<NftCollection>, String> {
    state.asset_cache.favorite_nfts().to_error_response()
}

/// Returns the new favorite flag
#[tauri::command]
pub async fn toggle_token_favorite(
    address: String,
    state: State<'_, AppState>,
) -> Result<bool, String> {
    state
        .asset_cache
        .toggle_token_favorite(&address)
        .to_error_response()
}

#[tauri::command]
pub async fn toggle_nft_favorite(
    address: String,
    state: State<'_, AppState>,
) -> Result<bool, String> {
    state
        .asset_cache
        .toggle_nft_favorite(&address)
        .to_error_response()
}

#[tauri::command]
pub async fn get_preferences(state: State<'_, AppState>) -> Result<PreferencesDto, String> {
    let view_mode = state.asset_cache.view_mode().to_error_response()?;
    let sort_option = state.asset_cache.sort_option().to_error_response()?;
    Ok(PreferencesDto {
        view_mode,
        sort_option,
    })
}

#[tauri::command]
pub async fn set_view_mode(mode: ViewMode, state: State<'_, AppState>) -> Result<(), String> {
    state.asset_cache.set_view_mode(mode).to_error_response()
}

#[tauri::command]
pub async fn set_sort_option(
    option: SortOption,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state.asset_cache.set_sort_option(option).to_error_response()
}

#[tauri::command]
pub async fn list_sort_options() -> Result<Vec<SortOptionDto>, String> {
    Ok(sort_options())
}
