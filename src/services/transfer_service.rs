// src/services/transfer_service.rs
//
// Send deployed assets to another address, and expose the connected
// address for receiving.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::validation::{parse_positive_amount, validate_evm_address, validate_token_id};
use crate::domain::{AssetKind, DomainError};
use crate::error::{AppError, AppResult};
use crate::events::{AssetTransferred, EventBus, OperationFailed, OperationKind};
use crate::integrations::{ContractSdk, ExplorerLinks, SdkError, TransactionReceipt, WalletProvider};
use crate::services::asset_cache_service::AssetCacheService;
use crate::services::session::require_wallet;

/// What the receive tab shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveInfo {
    pub address: String,
    pub explorer_url: String,
}

fn require_recipient(recipient: &str) -> AppResult<&str> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(DomainError::Validation("Please fill in all required fields".to_string()).into());
    }
    validate_evm_address(recipient)?;
    Ok(recipient)
}

pub struct TransferService {
    wallet: Arc<dyn WalletProvider>,
    sdk: Arc<dyn ContractSdk>,
    cache: Arc<AssetCacheService>,
    links: ExplorerLinks,
    event_bus: Arc<EventBus>,
}

impl TransferService {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        sdk: Arc<dyn ContractSdk>,
        cache: Arc<AssetCacheService>,
        links: ExplorerLinks,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wallet,
            sdk,
            cache,
            links,
            event_bus,
        }
    }

    pub async fn send_token(
        &self,
        address: &str,
        recipient: &str,
        amount: &str,
    ) -> AppResult<TransactionReceipt> {
        require_wallet(self.wallet.as_ref()).await?;
        self.cache.find_token(address)?.ok_or(AppError::NotFound)?;
        let recipient = require_recipient(recipient)?;
        parse_positive_amount(amount)?;
        let amount = amount.trim();

        log::info!("Sending {} of {} to {}", amount, address, recipient);
        let result = self.sdk.erc20_transfer(address, recipient, amount).await;
        self.settle(result, AssetKind::Token, address, recipient, amount)
    }

    pub async fn send_nft(
        &self,
        address: &str,
        recipient: &str,
        token_id: &str,
    ) -> AppResult<TransactionReceipt> {
        require_wallet(self.wallet.as_ref()).await?;
        self.cache.find_nft(address)?.ok_or(AppError::NotFound)?;
        let recipient = require_recipient(recipient)?;
        validate_token_id(token_id)?;
        let token_id = token_id.trim();

        log::info!("Sending token #{} of {} to {}", token_id, address, recipient);
        let result = self.sdk.erc721_transfer(address, recipient, token_id).await;
        self.settle(result, AssetKind::NftCollection, address, recipient, token_id)
    }

    pub async fn receive_info(&self) -> AppResult<ReceiveInfo> {
        let address = require_wallet(self.wallet.as_ref()).await?;
        Ok(ReceiveInfo {
            explorer_url: self.links.address_url(&address),
            address,
        })
    }

    fn settle(
        &self,
        result: Result<TransactionReceipt, SdkError>,
        kind: AssetKind,
        address: &str,
        recipient: &str,
        quantity: &str,
    ) -> AppResult<TransactionReceipt> {
        match result {
            Ok(receipt) => {
                self.event_bus.emit(AssetTransferred::new(
                    kind,
                    address.to_string(),
                    recipient.to_string(),
                    quantity.to_string(),
                ));
                Ok(receipt)
            }
            Err(e) => {
                log::error!("Transfer from {} failed: {}", address, e);
                let err = AppError::TransferFailed(e.to_string());
                self.event_bus.emit(OperationFailed::new(
                    OperationKind::Transfer,
                    Some(address.to_string()),
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }
}
