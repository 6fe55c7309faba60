// src/application/commands/transfer_commands.rs

use tauri::State;

use crate::application::dto::SendAssetDto;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::AssetKind;
use crate::integrations::TransactionReceipt;
use crate::services::ReceiveInfo;

#[tauri::command]
pub async fn send_asset(
    dto: SendAssetDto,
    state: State<'_, AppState>,
) -> Result<TransactionReceipt, String> {
    let transfers = &state.transfer_service;
    let result = match dto.kind {
        AssetKind::Token => {
            transfers
                .send_token(&dto.address, &dto.recipient, &dto.quantity)
                .await
        }
        AssetKind::NftCollection => {
            transfers
                .send_nft(&dto.address, &dto.recipient, &dto.quantity)
                .await
        }
    };
    result.to_error_response()
}

#[tauri::command]
pub async fn get_receive_info(state: State<'_, AppState>) -> Result<ReceiveInfo, String> {
    state.transfer_service.receive_info().await.to_error_response()
}
