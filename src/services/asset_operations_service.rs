// src/services/asset_operations_service.rs
//
// Mint/Burn orchestration on deployed assets.
//
// Every operation requires a connected wallet and a paid asset-operation
// fee for the address. At most one mint and one burn run per address; a
// second request while one is pending fails with `OperationInProgress`.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::validation::{parse_positive_amount, validate_token_id};
use crate::domain::{NftCollection, NftMetadata, Token};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, NftBurned, NftMinted, OperationFailed, OperationKind, TokensBurned, TokensMinted,
};
use crate::integrations::{ContractSdk, NftMintMetadata, SdkError, TransactionReceipt, WalletProvider};
use crate::services::asset_cache_service::AssetCacheService;
use crate::services::fee_service::{FeeScope, FeeService};
use crate::services::session::{require_wallet, InFlight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Busy {
    Minting,
    Burning,
}

fn busy_key(address: &str, busy: Busy) -> (String, Busy) {
    (address.trim().to_ascii_lowercase(), busy)
}

/// Per-asset state shown next to the mint/burn controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    pub address: String,
    pub paid: bool,
    pub paying: bool,
    pub minting: bool,
    pub burning: bool,
}

pub struct AssetOperationsService {
    wallet: Arc<dyn WalletProvider>,
    sdk: Arc<dyn ContractSdk>,
    fees: Arc<FeeService>,
    cache: Arc<AssetCacheService>,
    busy: InFlight<(String, Busy)>,
    event_bus: Arc<EventBus>,
}

impl AssetOperationsService {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        sdk: Arc<dyn ContractSdk>,
        fees: Arc<FeeService>,
        cache: Arc<AssetCacheService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wallet,
            sdk,
            fees,
            cache,
            busy: InFlight::new(),
            event_bus,
        }
    }

    pub fn operation_status(&self, address: &str) -> AppResult<OperationStatus> {
        let quote = self.fees.quote(&FeeScope::AssetOperations(address.to_string()))?;
        Ok(OperationStatus {
            address: address.to_string(),
            paid: quote.paid,
            paying: quote.paying,
            minting: self.busy.is_active(&busy_key(address, Busy::Minting)),
            burning: self.busy.is_active(&busy_key(address, Busy::Burning)),
        })
    }

    // ========================================================================
    // TOKENS
    // ========================================================================

    pub async fn mint_tokens(&self, address: &str, amount: &str) -> AppResult<TransactionReceipt> {
        let token = self.gated_token(address).await?;
        let address = token.address.as_str();
        parse_positive_amount(amount)?;
        let amount = amount.trim();

        let _guard = self
            .busy
            .try_acquire(busy_key(address, Busy::Minting), address)?;

        log::info!("Minting {} {} on {}", amount, token.symbol, address);
        match self.sdk.erc20_mint(address, amount).await {
            Ok(receipt) => {
                self.event_bus.emit(TokensMinted::new(
                    address.to_string(),
                    token.symbol,
                    amount.to_string(),
                ));
                Ok(receipt)
            }
            Err(e) => Err(self.failed(OperationKind::Mint, address, e, AppError::MintFailed)),
        }
    }

    pub async fn burn_tokens(&self, address: &str, amount: &str) -> AppResult<TransactionReceipt> {
        let token = self.gated_token(address).await?;
        let address = token.address.as_str();
        parse_positive_amount(amount)?;
        let amount = amount.trim();

        let _guard = self
            .busy
            .try_acquire(busy_key(address, Busy::Burning), address)?;

        log::info!("Burning {} {} on {}", amount, token.symbol, address);
        match self.sdk.erc20_burn(address, amount).await {
            Ok(receipt) => {
                self.event_bus.emit(TokensBurned::new(
                    address.to_string(),
                    token.symbol,
                    amount.to_string(),
                ));
                Ok(receipt)
            }
            Err(e) => Err(self.failed(OperationKind::Burn, address, e, AppError::BurnFailed)),
        }
    }

    // ========================================================================
    // NFT COLLECTIONS
    // ========================================================================

    /// Mint one item carrying the collection's artwork
    pub async fn mint_nft(&self, address: &str) -> AppResult<TransactionReceipt> {
        let nft = self.gated_nft(address).await?;
        let address = nft.address.as_str();

        let _guard = self
            .busy
            .try_acquire(busy_key(address, Busy::Minting), address)?;

        let metadata = NftMintMetadata {
            name: format!("{} #{}", nft.name, Utc::now().timestamp_millis()),
            description: nft.description.clone().unwrap_or_default(),
            image: nft.image_url.clone(),
        };

        log::info!("Minting {} on {}", metadata.name, address);
        match self.sdk.erc721_mint(address, &metadata).await {
            Ok(receipt) => {
                self.event_bus
                    .emit(NftMinted::new(address.to_string(), nft.name));
                Ok(receipt)
            }
            Err(e) => Err(self.failed(OperationKind::Mint, address, e, AppError::MintFailed)),
        }
    }

    pub async fn burn_nft(&self, address: &str, token_id: &str) -> AppResult<TransactionReceipt> {
        let nft = self.gated_nft(address).await?;
        let address = nft.address.as_str();
        validate_token_id(token_id)?;
        let token_id = token_id.trim();

        let _guard = self
            .busy
            .try_acquire(busy_key(address, Busy::Burning), address)?;

        log::info!("Burning token #{} on {}", token_id, address);
        match self.sdk.erc721_burn(address, token_id).await {
            Ok(receipt) => {
                self.event_bus
                    .emit(NftBurned::new(address.to_string(), token_id.to_string()));
                Ok(receipt)
            }
            Err(e) => Err(self.failed(OperationKind::Burn, address, e, AppError::BurnFailed)),
        }
    }

    /// Items minted so far in a collection
    pub async fn nft_metadata(&self, address: &str) -> AppResult<Vec<NftMetadata>> {
        self.sdk
            .erc721_get_all(address)
            .await
            .map_err(|e| self.failed(OperationKind::Metadata, address, e, AppError::MetadataFailed))
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    async fn gated_token(&self, address: &str) -> AppResult<Token> {
        require_wallet(self.wallet.as_ref()).await?;
        let token = self.cache.find_token(address)?.ok_or(AppError::NotFound)?;
        self.fees
            .ensure_paid(&FeeScope::AssetOperations(address.to_string()))?;
        Ok(token)
    }

    async fn gated_nft(&self, address: &str) -> AppResult<NftCollection> {
        require_wallet(self.wallet.as_ref()).await?;
        let nft = self.cache.find_nft(address)?.ok_or(AppError::NotFound)?;
        self.fees
            .ensure_paid(&FeeScope::AssetOperations(address.to_string()))?;
        Ok(nft)
    }

    fn failed(
        &self,
        operation: OperationKind,
        address: &str,
        cause: SdkError,
        wrap: fn(String) -> AppError,
    ) -> AppError {
        log::error!("{} on {} failed: {}", operation, address, cause);
        let err = wrap(cause.to_string());
        self.event_bus.emit(OperationFailed::new(
            operation,
            Some(address.to_string()),
            err.to_string(),
        ));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeeConfig;
    use crate::integrations::sdk::{
        MockContractSdk, MockWalletProvider, NftCollectionDeployParams, SdkResult,
        TokenDeployParams,
    };
    use crate::repositories::{InMemoryKeyValueRepository, KvAssetRepository};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    const WALLET: &str = "0x1111111111111111111111111111111111111111";
    const TOKEN_ADDR: &str = "0x2222222222222222222222222222222222222222";
    const NFT_ADDR: &str = "0x3333333333333333333333333333333333333333";

    fn receipt() -> TransactionReceipt {
        TransactionReceipt {
            tx_hash: "0xfeed".to_string(),
        }
    }

    fn wallet() -> Arc<dyn WalletProvider> {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_connected_address()
            .returning(|| Ok(Some(WALLET.to_string())));
        wallet.expect_send_native().returning(|_, _| Ok(receipt()));
        Arc::new(wallet)
    }

    struct Fixture {
        bus: Arc<EventBus>,
        fees: Arc<FeeService>,
        service: Arc<AssetOperationsService>,
    }

    fn fixture(sdk: Arc<dyn ContractSdk>) -> Fixture {
        let bus = Arc::new(EventBus::new());
        let wallet = wallet();
        let fees = Arc::new(FeeService::new(
            wallet.clone(),
            FeeConfig::default(),
            "POL".to_string(),
            bus.clone(),
        ));
        let repo = Arc::new(KvAssetRepository::new(Arc::new(InMemoryKeyValueRepository::new())));
        let cache = Arc::new(AssetCacheService::new(repo, bus.clone(), 6).unwrap());

        let mut token = Token::new(
            TOKEN_ADDR.to_string(),
            "Magic".to_string(),
            "MGC".to_string(),
            "1000".to_string(),
        );
        token.is_mintable = true;
        cache.add_token(token).unwrap();

        let mut nft = NftCollection::new(
            NFT_ADDR.to_string(),
            "Wizards".to_string(),
            "WIZ".to_string(),
            "https://example.com/wiz.png".to_string(),
        );
        nft.description = Some("Spellcasters".to_string());
        cache.add_nft(nft).unwrap();

        let service = Arc::new(AssetOperationsService::new(
            wallet,
            sdk,
            fees.clone(),
            cache,
            bus.clone(),
        ));
        Fixture { bus, fees, service }
    }

    async fn paid_fixture(sdk: Arc<dyn ContractSdk>) -> Fixture {
        let f = fixture(sdk);
        f.fees
            .pay(FeeScope::AssetOperations(TOKEN_ADDR.to_string()))
            .await
            .unwrap();
        f.fees
            .pay(FeeScope::AssetOperations(NFT_ADDR.to_string()))
            .await
            .unwrap();
        f.bus.clear_event_log();
        f
    }

    #[tokio::test]
    async fn test_mint_requires_fee() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc20_mint().never();
        let f = fixture(Arc::new(sdk));

        let err = f.service.mint_tokens(TOKEN_ADDR, "10").await.unwrap_err();
        assert!(matches!(err, AppError::FeeNotPaid));
        assert!(!f.service.operation_status(TOKEN_ADDR).unwrap().paid);
    }

    #[tokio::test]
    async fn test_burn_and_nft_operations_require_fee() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc20_burn().never();
        sdk.expect_erc721_mint().never();
        sdk.expect_erc721_burn().never();
        let f = fixture(Arc::new(sdk));

        assert!(matches!(
            f.service.burn_tokens(TOKEN_ADDR, "1").await,
            Err(AppError::FeeNotPaid)
        ));
        assert!(matches!(
            f.service.mint_nft(NFT_ADDR).await,
            Err(AppError::FeeNotPaid)
        ));
        assert!(matches!(
            f.service.burn_nft(NFT_ADDR, "1").await,
            Err(AppError::FeeNotPaid)
        ));
        assert!(f.bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_address_case_does_not_matter() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc20_mint().times(1).returning(|contract, _| {
            assert_eq!(contract, TOKEN_ADDR);
            Ok(receipt())
        });
        let f = fixture(Arc::new(sdk));
        let shouted = TOKEN_ADDR.to_uppercase();

        f.fees
            .pay(FeeScope::AssetOperations(shouted.clone()))
            .await
            .unwrap();
        assert!(f.service.operation_status(TOKEN_ADDR).unwrap().paid);

        f.service.mint_tokens(&shouted, "3").await.unwrap();
    }

    #[tokio::test]
    async fn test_mint_and_burn_tokens_after_payment() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc20_mint().times(1).returning(|_, amount| {
            assert_eq!(amount, "10");
            Ok(receipt())
        });
        sdk.expect_erc20_burn().times(1).returning(|_, _| Ok(receipt()));
        let f = paid_fixture(Arc::new(sdk)).await;

        f.service.mint_tokens(TOKEN_ADDR, " 10 ").await.unwrap();
        f.service.burn_tokens(TOKEN_ADDR, "2.5").await.unwrap();

        let events: Vec<String> = f.bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(events, vec!["TokensMinted", "TokensBurned"]);

        let status = f.service.operation_status(TOKEN_ADDR).unwrap();
        assert!(status.paid);
        assert!(!status.minting);
        assert!(!status.burning);
    }

    #[tokio::test]
    async fn test_invalid_amount() {
        let f = paid_fixture(Arc::new(MockContractSdk::new())).await;
        for amount in ["", "0", "-1", "abc"] {
            let err = f.service.mint_tokens(TOKEN_ADDR, amount).await.unwrap_err();
            assert!(matches!(err, AppError::Domain(_)), "amount {:?}", amount);
        }
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let f = paid_fixture(Arc::new(MockContractSdk::new())).await;
        assert!(matches!(
            f.service.burn_tokens(NFT_ADDR, "1").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_failure_clears_flag_and_reports_raw_message() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc20_burn()
            .returning(|_, _| Err(SdkError::Rejected("burn amount exceeds balance".to_string())));
        let f = paid_fixture(Arc::new(sdk)).await;

        let err = f.service.burn_tokens(TOKEN_ADDR, "5").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to burn: burn amount exceeds balance");
        assert!(!f.service.operation_status(TOKEN_ADDR).unwrap().burning);
        assert_eq!(f.bus.get_event_log()[0].event_type, "OperationFailed");
    }

    #[tokio::test]
    async fn test_mint_nft_uses_collection_metadata() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc721_mint().times(1).returning(|contract, metadata| {
            assert_eq!(contract, NFT_ADDR);
            assert!(metadata.name.starts_with("Wizards #"));
            assert_eq!(metadata.description, "Spellcasters");
            assert_eq!(metadata.image, "https://example.com/wiz.png");
            Ok(receipt())
        });
        let f = paid_fixture(Arc::new(sdk)).await;

        f.service.mint_nft(NFT_ADDR).await.unwrap();
        assert_eq!(f.bus.get_event_log()[0].event_type, "NftMinted");
    }

    #[tokio::test]
    async fn test_burn_nft_requires_token_id() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc721_burn().times(1).returning(|_, token_id| {
            assert_eq!(token_id, "7");
            Ok(receipt())
        });
        let f = paid_fixture(Arc::new(sdk)).await;

        let err = f.service.burn_nft(NFT_ADDR, "  ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a token ID");
        f.service.burn_nft(NFT_ADDR, "7").await.unwrap();
    }

    #[tokio::test]
    async fn test_metadata_failure() {
        let mut sdk = MockContractSdk::new();
        sdk.expect_erc721_get_all()
            .returning(|_| Err(SdkError::Transport("connection refused".to_string())));
        let f = fixture(Arc::new(sdk));

        let err = f.service.nft_metadata(NFT_ADDR).await.unwrap_err();
        assert!(matches!(err, AppError::MetadataFailed(_)));
    }

    /// Mint that stays pending until released
    struct PendingMintSdk {
        release: Notify,
    }

    #[async_trait]
    impl ContractSdk for PendingMintSdk {
        async fn deploy_token(&self, _: &TokenDeployParams) -> SdkResult<String> {
            unimplemented!()
        }
        async fn deploy_nft_collection(&self, _: &NftCollectionDeployParams) -> SdkResult<String> {
            unimplemented!()
        }
        async fn erc20_mint(&self, _: &str, _: &str) -> SdkResult<TransactionReceipt> {
            self.release.notified().await;
            Ok(receipt())
        }
        async fn erc20_burn(&self, _: &str, _: &str) -> SdkResult<TransactionReceipt> {
            Ok(receipt())
        }
        async fn erc20_transfer(&self, _: &str, _: &str, _: &str) -> SdkResult<TransactionReceipt> {
            unimplemented!()
        }
        async fn erc721_mint(&self, _: &str, _: &NftMintMetadata) -> SdkResult<TransactionReceipt> {
            unimplemented!()
        }
        async fn erc721_burn(&self, _: &str, _: &str) -> SdkResult<TransactionReceipt> {
            unimplemented!()
        }
        async fn erc721_transfer(&self, _: &str, _: &str, _: &str) -> SdkResult<TransactionReceipt> {
            unimplemented!()
        }
        async fn erc721_get_all(&self, _: &str) -> SdkResult<Vec<NftMetadata>> {
            unimplemented!()
        }
        async fn set_approval_for_all(
            &self,
            _: &str,
            _: &str,
            _: bool,
        ) -> SdkResult<TransactionReceipt> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_concurrent_mint_on_same_address_rejected() {
        let sdk = Arc::new(PendingMintSdk {
            release: Notify::new(),
        });
        let f = paid_fixture(sdk.clone()).await;

        let service = f.service.clone();
        let first = tokio::spawn(async move { service.mint_tokens(TOKEN_ADDR, "1").await });

        while !f.service.operation_status(TOKEN_ADDR).unwrap().minting {
            tokio::task::yield_now().await;
        }

        let err = f.service.mint_tokens(TOKEN_ADDR, "1").await.unwrap_err();
        assert!(matches!(err, AppError::OperationInProgress(_)));

        // Burning is tracked separately
        f.service.burn_tokens(TOKEN_ADDR, "1").await.unwrap();

        sdk.release.notify_one();
        first.await.unwrap().unwrap();
        assert!(!f.service.operation_status(TOKEN_ADDR).unwrap().minting);
    }
}
