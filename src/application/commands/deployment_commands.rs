// src/application/commands/deployment_commands.rs

use tauri::State;

use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::{NftCollection, Token};
use crate::services::{DeployNftCollectionRequest, DeployTokenRequest, FeeScope};

#[tauri::command]
pub async fn deploy_token(
    request: DeployTokenRequest,
    state: State<'_, AppState>,
) -> Result<Token, String> {
    state
        .deployment_service
        .deploy_token(request)
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn deploy_nft_collection(
    request: DeployNftCollectionRequest,
    state: State<'_, AppState>,
) -> Result<NftCollection, String> {
    state
        .deployment_service
        .deploy_nft_collection(request)
        .await
        .to_error_response()
}

/// Whether a deployment for `scope` is currently running
#[tauri::command]
pub async fn is_deploying(scope: FeeScope, state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.deployment_service.is_deploying(&scope))
}
