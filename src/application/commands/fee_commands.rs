// src/application/commands/fee_commands.rs

use tauri::State;

use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::services::{FeeQuote, FeeScope};

#[tauri::command]
pub async fn get_fee_quote(scope: FeeScope, state: State<'_, AppState>) -> Result<FeeQuote, String> {
    state.fee_service.quote(&scope).to_error_response()
}

/// Pay the flat fee for `scope`; resolves once the transfer is confirmed
#[tauri::command]
pub async fn pay_fee(scope: FeeScope, state: State<'_, AppState>) -> Result<FeeQuote, String> {
    state.fee_service.pay(scope).await.to_error_response()
}
