// src/services/deployment_service.rs
//
// Deployment forms → contract SDK → asset cache.
//
// Gate order: connected wallet, paid fee, form validation. A deployment
// that fails after payment keeps the fee paid.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::validation::{
    parse_non_negative_integer, parse_non_negative_number, parse_royalty_bps, require_text,
    validate_optional_url, validate_url,
};
use crate::domain::{NftCollection, Token};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, NftCollectionDeployed, OperationFailed, OperationKind, TokenDeployed};
use crate::integrations::{
    BurnType, ContractSdk, MintType, NftCollectionDeployParams, SdkError, TokenDeployParams,
    WalletProvider,
};
use crate::services::asset_cache_service::AssetCacheService;
use crate::services::fee_service::{FeeScope, FeeService};
use crate::services::session::{require_wallet, InFlight};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployTokenRequest {
    pub name: String,
    pub symbol: String,
    pub initial_supply: String,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_burnable: bool,
    pub is_mintable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployNftCollectionRequest {
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub description: Option<String>,
    pub max_supply: Option<String>,
    pub mint_price: String,
    /// Percentage, 0-100
    pub royalty_percent: String,
    pub is_lazy: bool,
    pub is_delayed_reveal: bool,
    pub is_restricted_transfer: bool,
}

impl Default for DeployNftCollectionRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            image_url: String::new(),
            description: None,
            max_supply: None,
            mint_price: "0".to_string(),
            royalty_percent: "0".to_string(),
            is_lazy: false,
            is_delayed_reveal: false,
            is_restricted_transfer: false,
        }
    }
}

/// Empty optional text is treated as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct DeploymentService {
    wallet: Arc<dyn WalletProvider>,
    sdk: Arc<dyn ContractSdk>,
    fees: Arc<FeeService>,
    cache: Arc<AssetCacheService>,
    deploying: InFlight<FeeScope>,
    event_bus: Arc<EventBus>,
}

impl DeploymentService {
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
            deploying: InFlight::new(),
            event_bus,
        }
    }

    pub fn is_deploying(&self, scope: &FeeScope) -> bool {
        self.deploying.is_active(scope)
    }

    pub async fn deploy_token(&self, request: DeployTokenRequest) -> AppResult<Token> {
        let wallet_address = require_wallet(self.wallet.as_ref()).await?;
        self.fees.ensure_paid(&FeeScope::TokenDeployment)?;

        require_text("Token name", &request.name)?;
        require_text("Token symbol", &request.symbol)?;
        parse_non_negative_number("Initial supply", &request.initial_supply)?;
        validate_optional_url("icon URL", request.icon_url.as_deref())?;
        validate_optional_url("website URL", request.website.as_deref())?;

        let _guard = self
            .deploying
            .try_acquire(FeeScope::TokenDeployment, "token deployment")?;

        let params = TokenDeployParams {
            name: request.name.trim().to_string(),
            symbol: request.symbol.trim().to_string(),
            primary_sale_recipient: wallet_address.clone(),
            platform_fee_recipient: wallet_address,
            platform_fee_basis_points: 0,
            burn_type: if request.is_burnable { BurnType::Burnable } else { BurnType::None },
            mint_type: if request.is_mintable { MintType::Mintable } else { MintType::Fixed },
        };

        log::info!("Deploying token {} ({})", params.name, params.symbol);
        let address = match self.submit_token(&params, &request.initial_supply).await {
            Ok(address) => address,
            Err(e) => return Err(self.deployment_failed(e)),
        };

        let mut token = Token::new(address, params.name, params.symbol, request.initial_supply);
        token.icon_url = non_blank(request.icon_url);
        token.description = non_blank(request.description);
        token.website = non_blank(request.website);
        token.is_burnable = request.is_burnable;
        token.is_mintable = request.is_mintable;

        let address = token.address.clone();
        let token = self
            .cache
            .add_token(token)
            .map_err(|e| self.record_failed(&address, e))?;
        self.fees.consume(&FeeScope::TokenDeployment)?;

        self.event_bus.emit(TokenDeployed::new(
            token.address.clone(),
            token.name.clone(),
            token.symbol.clone(),
        ));
        Ok(token)
    }

    pub async fn deploy_nft_collection(
        &self,
        request: DeployNftCollectionRequest,
    ) -> AppResult<NftCollection> {
        let wallet_address = require_wallet(self.wallet.as_ref()).await?;
        self.fees.ensure_paid(&FeeScope::NftDeployment)?;

        require_text("Collection name", &request.name)?;
        require_text("Collection symbol", &request.symbol)?;
        validate_url("image URL", &request.image_url)?;
        let royalty_bps = parse_royalty_bps(&request.royalty_percent)?;
        let max_supply = non_blank(request.max_supply);
        if let Some(max_supply) = max_supply.as_deref() {
            parse_non_negative_integer("Max supply", max_supply)?;
        }
        parse_non_negative_number("Mint price", &request.mint_price)?;

        let _guard = self
            .deploying
            .try_acquire(FeeScope::NftDeployment, "NFT deployment")?;

        let params = NftCollectionDeployParams {
            name: request.name.trim().to_string(),
            symbol: request.symbol.trim().to_string(),
            primary_sale_recipient: wallet_address.clone(),
            platform_fee_recipient: wallet_address.clone(),
            platform_fee_basis_points: 0,
            fee_recipient: wallet_address.clone(),
            seller_fee_basis_points: royalty_bps,
        };

        log::info!("Deploying NFT collection {} ({})", params.name, params.symbol);
        let address = match self
            .submit_collection(&params, &wallet_address, request.is_restricted_transfer)
            .await
        {
            Ok(address) => address,
            Err(e) => return Err(self.deployment_failed(e)),
        };

        let mut nft = NftCollection::new(
            address,
            params.name,
            params.symbol,
            request.image_url.trim().to_string(),
        );
        nft.description = non_blank(request.description);
        nft.max_supply = max_supply;
        nft.mint_price = request.mint_price.trim().to_string();
        nft.royalty_bps = request.royalty_percent.trim().to_string();
        nft.is_lazy = request.is_lazy;
        nft.is_delayed_reveal = request.is_delayed_reveal;
        nft.is_restricted_transfer = request.is_restricted_transfer;

        let address = nft.address.clone();
        let nft = self
            .cache
            .add_nft(nft)
            .map_err(|e| self.record_failed(&address, e))?;
        self.fees.consume(&FeeScope::NftDeployment)?;

        self.event_bus.emit(NftCollectionDeployed::new(
            nft.address.clone(),
            nft.name.clone(),
            nft.symbol.clone(),
        ));
        Ok(nft)
    }

    // ========================================================================
    // INTERNAL: SDK sequences
    // ========================================================================

    /// Deploy, then mint the initial supply to the deployer
    async fn submit_token(
        &self,
        params: &TokenDeployParams,
        initial_supply: &str,
    ) -> Result<String, SdkError> {
        let address = self.sdk.deploy_token(params).await?;
        self.sdk.erc20_mint(&address, initial_supply.trim()).await?;
        Ok(address)
    }

    async fn submit_collection(
        &self,
        params: &NftCollectionDeployParams,
        wallet_address: &str,
        restricted_transfer: bool,
    ) -> Result<String, SdkError> {
        let address = self.sdk.deploy_nft_collection(params).await?;
        if restricted_transfer {
            self.sdk
                .set_approval_for_all(&address, wallet_address, true)
                .await?;
        }
        Ok(address)
    }

    fn deployment_failed(&self, cause: SdkError) -> AppError {
        log::error!("Deployment failed: {}", cause);
        let err = AppError::DeploymentFailed(cause.to_string());
        self.event_bus
            .emit(OperationFailed::new(OperationKind::Deployment, None, err.to_string()));
        err
    }

    /// The contract is live but missing from the local cache
    fn record_failed(&self, address: &str, cause: AppError) -> AppError {
        log::error!("Deployed contract {} could not be recorded: {}", address, cause);
        self.event_bus.emit(OperationFailed::new(
            OperationKind::Deployment,
            Some(address.to_string()),
            format!("Deployed at {} but could not save it locally: {}", address, cause),
        ));
        cause
    }
}
