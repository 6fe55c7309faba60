// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{ContractSdk, ExplorerLinks, WalletProvider};
use crate::repositories::{KeyValueRepository, KvAssetRepository};
use crate::services::{
    AssetCacheService, AssetOperationsService, DeploymentService, FeeService, ProfileService,
    TransferService,
};

/// Application state managed by Tauri.
/// All services are Arc-wrapped for sharing across concurrent commands.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub links: ExplorerLinks,
    pub asset_cache: Arc<AssetCacheService>,
    pub fee_service: Arc<FeeService>,
    pub deployment_service: Arc<DeploymentService>,
    pub operations_service: Arc<AssetOperationsService>,
    pub transfer_service: Arc<TransferService>,
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    /// Wire every service over one store and one wallet/SDK pair
    pub fn build(
        config: AppConfig,
        store: Arc<dyn KeyValueRepository>,
        wallet: Arc<dyn WalletProvider>,
        sdk: Arc<dyn ContractSdk>,
    ) -> AppResult<Self> {
        config.validate()?;

        let event_bus = Arc::new(EventBus::new());
        let links = ExplorerLinks::new(&config.network, &config.share);

        let asset_repo = Arc::new(KvAssetRepository::new(store));
        let asset_cache = Arc::new(AssetCacheService::new(
            asset_repo,
            event_bus.clone(),
            config.ui.page_size,
        )?);

        let fee_service = Arc::new(FeeService::new(
            wallet.clone(),
            config.fees.clone(),
            config.network.currency_symbol.clone(),
            event_bus.clone(),
        ));

        let deployment_service = Arc::new(DeploymentService::new(
            wallet.clone(),
            sdk.clone(),
            fee_service.clone(),
            asset_cache.clone(),
            event_bus.clone(),
        ));

        let operations_service = Arc::new(AssetOperationsService::new(
            wallet.clone(),
            sdk.clone(),
            fee_service.clone(),
            asset_cache.clone(),
            event_bus.clone(),
        ));

        let transfer_service = Arc::new(TransferService::new(
            wallet.clone(),
            sdk,
            asset_cache.clone(),
            links.clone(),
            event_bus.clone(),
        ));

        let profile_service = Arc::new(ProfileService::new(
            wallet,
            asset_cache.clone(),
            links.clone(),
            config.ui.clone(),
            config.network.currency_symbol.clone(),
        ));

        Ok(Self {
            config,
            event_bus,
            links,
            asset_cache,
            fee_service,
            deployment_service,
            operations_service,
            transfer_service,
            profile_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notifications::{register_notification_handlers, Notification};
    use crate::integrations::sdk::{MockContractSdk, MockWalletProvider};
    use crate::integrations::TransactionReceipt;
    use crate::repositories::InMemoryKeyValueRepository;
    use crate::services::{DeployTokenRequest, FeeScope};
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_pay_then_deploy_through_state() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_connected_address()
            .returning(|| Ok(Some("0x1111111111111111111111111111111111111111".to_string())));
        wallet.expect_send_native().returning(|_, _| {
            Ok(TransactionReceipt {
                tx_hash: "0x01".to_string(),
            })
        });

        let mut sdk = MockContractSdk::new();
        sdk.expect_deploy_token()
            .returning(|_| Ok("0x2222222222222222222222222222222222222222".to_string()));
        sdk.expect_erc20_mint().returning(|_, _| {
            Ok(TransactionReceipt {
                tx_hash: "0x02".to_string(),
            })
        });

        let state = AppState::build(
            AppConfig::default(),
            Arc::new(InMemoryKeyValueRepository::new()),
            Arc::new(wallet),
            Arc::new(sdk),
        )
        .unwrap();

        let received = Arc::new(Mutex::new(Vec::new()));
        let store = received.clone();
        register_notification_handlers(
            &state.event_bus,
            Arc::new(move |n: Notification| store.lock().unwrap().push(n.message)),
        );

        state.fee_service.pay(FeeScope::TokenDeployment).await.unwrap();
        state
            .deployment_service
            .deploy_token(DeployTokenRequest {
                name: "Magic".to_string(),
                symbol: "MGC".to_string(),
                initial_supply: "100".to_string(),
                ..DeployTokenRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(state.asset_cache.tokens().unwrap().len(), 1);
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[1], "Successfully deployed Magic token!");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.ui.page_size = 0;
        let result = AppState::build(
            config,
            Arc::new(InMemoryKeyValueRepository::new()),
            Arc::new(MockWalletProvider::new()),
            Arc::new(MockContractSdk::new()),
        );
        assert!(result.is_err());
    }
}
