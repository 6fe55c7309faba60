// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors → responses the webview can show as a toast
// - Operation failures keep the raw wallet/SDK message
// - Storage internals are logged, not exposed

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Unknown asset address
    NotFound,

    /// Form input rejected
    Validation,

    /// Record invariant violated (duplicate address)
    DomainError,

    /// No wallet connected
    Wallet,

    /// Gated action attempted before paying
    FeeRequired,

    /// Same operation already pending
    Busy,

    /// Wallet or SDK rejected the operation
    ExternalService,

    /// Local store failure
    Database,

    FileSystem,

    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message,
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Asset not found".to_string(), None),

            AppError::Domain(DomainError::Validation(message)) => Self::validation(message),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                domain_error.to_string(),
                None,
            ),

            e @ AppError::WalletNotConnected => Self::new(ErrorType::Wallet, e.to_string(), None),

            e @ AppError::FeeNotPaid => Self::new(ErrorType::FeeRequired, e.to_string(), None),

            AppError::OperationInProgress(target) => Self::new(
                ErrorType::Busy,
                "Operation already in progress".to_string(),
                Some(target),
            ),

            e @ (AppError::PaymentFailed(_)
            | AppError::DeploymentFailed(_)
            | AppError::MintFailed(_)
            | AppError::BurnFailed(_)
            | AppError::TransferFailed(_)
            | AppError::MetadataFailed(_)) => {
                Self::new(ErrorType::ExternalService, e.to_string(), None)
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed".to_string(), None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed".to_string(), None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed".to_string(),
                    Some(io_error.to_string()),
                )
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, "Configuration error".to_string(), Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert!(!error.success);
    }

    #[test]
    fn test_validation_message_is_shown() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::Validation(
            "Please enter a valid amount".to_string(),
        )));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Please enter a valid amount");
    }

    #[test]
    fn test_gates() {
        let error = ErrorResponse::from_app_error(AppError::WalletNotConnected);
        assert_eq!(error.error_type, ErrorType::Wallet);
        assert_eq!(error.message, "Please connect your wallet first");

        let error = ErrorResponse::from_app_error(AppError::FeeNotPaid);
        assert_eq!(error.error_type, ErrorType::FeeRequired);
        assert_eq!(error.message, "Please pay the fee first");

        let error = ErrorResponse::from_app_error(AppError::OperationInProgress("0xabc".to_string()));
        assert_eq!(error.error_type, ErrorType::Busy);
        assert_eq!(error.details.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_operation_failure_keeps_raw_message() {
        let error = ErrorResponse::from_app_error(AppError::MintFailed(
            "execution reverted: not minter".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::ExternalService);
        assert_eq!(error.message, "Failed to mint: execution reverted: not minter");
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        let error = ErrorResponse::from_app_error(AppError::Pool("timed out".to_string()));
        assert_eq!(error.error_type, ErrorType::Database);
        assert!(!error.message.contains("timed out"));
    }

    #[test]
    fn test_to_error_response() {
        let result: Result<(), AppError> = Err(AppError::FeeNotPaid);
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("fee_required"));
        assert!(json.contains("Please pay the fee first"));
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Token");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Token not found"));
    }
}
