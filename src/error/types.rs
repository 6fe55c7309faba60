// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("Please pay the fee first")]
    FeeNotPaid,

    #[error("An operation is already in progress for {0}")]
    OperationInProgress(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Failed to deploy: {0}")]
    DeploymentFailed(String),

    #[error("Failed to mint: {0}")]
    MintFailed(String),

    #[error("Failed to burn: {0}")]
    BurnFailed(String),

    #[error("Failed to send: {0}")]
    TransferFailed(String),

    #[error("Failed to load NFTs: {0}")]
    MetadataFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AppError::Other(format!("Lock poisoned: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_carry_raw_cause() {
        let err = AppError::PaymentFailed("user rejected transaction".to_string());
        assert_eq!(err.to_string(), "Payment failed: user rejected transaction");

        let err = AppError::MintFailed("execution reverted".to_string());
        assert_eq!(err.to_string(), "Failed to mint: execution reverted");
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err = AppError::from(DomainError::Validation("Token name is required".to_string()));
        assert_eq!(err.to_string(), "Token name is required");
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::FeeNotPaid).unwrap();
        assert_eq!(json, "\"Please pay the fee first\"");
    }
}
