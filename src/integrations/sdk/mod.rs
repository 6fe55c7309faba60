// src/integrations/sdk/mod.rs
//
// Wallet and contract SDK boundary.
//
// The wallet connection and contract deployment live in an external SDK.
// Services only see these two traits, so tests swap in mocks and the
// desktop shell wires in the HTTP gateway.
//
// Amounts travel as decimal strings, exactly as entered by the user.

pub mod http_gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::NftMetadata;

pub use http_gateway::HttpSdkGateway;

/// Failures reported by the wallet or SDK, carrying the raw message
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SdkError {
    /// The wallet or contract rejected the request (user denial, revert)
    #[error("{0}")]
    Rejected(String),

    /// The bridge could not be reached or answered garbage
    #[error("SDK bridge unavailable: {0}")]
    Transport(String),
}

pub type SdkResult<T> = Result<T, SdkError>;

/// Confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
}

/// Native balance as the wallet formats it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub display_value: String,
    pub symbol: String,
}

/// Burn capability of a deployed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnType {
    Burnable,
    None,
}

/// Mint capability of a deployed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintType {
    Mintable,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDeployParams {
    pub name: String,
    pub symbol: String,
    pub primary_sale_recipient: String,
    pub platform_fee_recipient: String,
    pub platform_fee_basis_points: u32,
    pub burn_type: BurnType,
    pub mint_type: MintType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollectionDeployParams {
    pub name: String,
    pub symbol: String,
    pub primary_sale_recipient: String,
    pub platform_fee_recipient: String,
    pub platform_fee_basis_points: u32,
    /// Royalty receiver
    pub fee_recipient: String,
    pub seller_fee_basis_points: u32,
}

/// Metadata attached to a freshly minted NFT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMintMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
}

/// The connected wallet
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Address of the connected account, `None` when disconnected
    async fn connected_address(&self) -> SdkResult<Option<String>>;

    async fn balance(&self) -> SdkResult<WalletBalance>;

    /// Send native currency and wait for the receipt
    async fn send_native(&self, to: &str, amount: &str) -> SdkResult<TransactionReceipt>;
}

/// Contract deployment and the ERC-20 / ERC-721 calls the dashboard uses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractSdk: Send + Sync {
    /// Deploy a token contract, returning its address
    async fn deploy_token(&self, params: &TokenDeployParams) -> SdkResult<String>;

    /// Deploy an NFT collection contract, returning its address
    async fn deploy_nft_collection(&self, params: &NftCollectionDeployParams)
        -> SdkResult<String>;

    async fn erc20_mint(&self, contract: &str, amount: &str) -> SdkResult<TransactionReceipt>;
    async fn erc20_burn(&self, contract: &str, amount: &str) -> SdkResult<TransactionReceipt>;
    async fn erc20_transfer(
        &self,
        contract: &str,
        to: &str,
        amount: &str,
    ) -> SdkResult<TransactionReceipt>;

    async fn erc721_mint(
        &self,
        contract: &str,
        metadata: &NftMintMetadata,
    ) -> SdkResult<TransactionReceipt>;
    async fn erc721_burn(&self, contract: &str, token_id: &str) -> SdkResult<TransactionReceipt>;
    async fn erc721_transfer(
        &self,
        contract: &str,
        to: &str,
        token_id: &str,
    ) -> SdkResult<TransactionReceipt>;
    async fn erc721_get_all(&self, contract: &str) -> SdkResult<Vec<NftMetadata>>;

    async fn set_approval_for_all(
        &self,
        contract: &str,
        operator: &str,
        approved: bool,
    ) -> SdkResult<TransactionReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_keeps_raw_message() {
        let err = SdkError::Rejected("user rejected transaction".to_string());
        assert_eq!(err.to_string(), "user rejected transaction");
    }

    #[test]
    fn test_deploy_params_wire_format() {
        let params = TokenDeployParams {
            name: "Magic".to_string(),
            symbol: "MGC".to_string(),
            primary_sale_recipient: "0xabc".to_string(),
            platform_fee_recipient: "0xabc".to_string(),
            platform_fee_basis_points: 0,
            burn_type: BurnType::Burnable,
            mint_type: MintType::Fixed,
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["primarySaleRecipient"], "0xabc");
        assert_eq!(json["burnType"], "burnable");
        assert_eq!(json["mintType"], "fixed");
    }
}
