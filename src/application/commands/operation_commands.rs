// src/application/commands/operation_commands.rs
//
// Mint/Burn on deployed assets

use tauri::State;

use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::NftMetadata;
use crate::integrations::TransactionReceipt;
use crate::services::OperationStatus;

#[tauri::command]
pub async fn get_operation_status(
    address: String,
    state: State<'_, AppState>,
) -> Result<OperationStatus, String> {
    state
        .operations_service
        .operation_status(&address)
        .to_error_response()
}

#[tauri::command]
pub async fn mint_tokens(
    address: String,
    amount: String,
    state: State<'_, AppState>,
) -> Result<TransactionReceipt, String> {
    state
        .operations_service
        .mint_tokens(&address, &amount)
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn burn_tokens(
    address: String,
    amount: String,
    state: State<'_, AppState>,
) -> Result<TransactionReceipt, String> {
    state
        .operations_service
        .burn_tokens(&address, &amount)
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn mint_nft(
    address: String,
    state: State<'_, AppState>,
) -> Result<TransactionReceipt, String> {
    state
        .operations_service
        .mint_nft(&address)
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn burn_nft(
    address: String,
    token_id: String,
    state: State<'_, AppState>,
) -> Result<TransactionReceipt, String> {
    state
        .operations_service
        .burn_nft(&address, &token_id)
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn get_nft_metadata(
    address: String,
    state: State<'_, AppState>,
) -> Result<Vec<NftMetadata>, String> {
    state
        .operations_service
        .nft_metadata(&address)
        .await
        .to_error_response()
}
