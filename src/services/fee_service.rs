// src/services/fee_service.rs
//
// Flat-fee payments that unlock gated actions.
//
// - Deployment fees are consumed by a successful deployment and survive a
//   failed one, so the user can retry without paying twice
// - Asset-operation fees unlock mint/burn on one address for the session
// - Payment state lives in memory only

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::config::FeeConfig;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FeePaid, OperationFailed, OperationKind};
use crate::integrations::WalletProvider;
use crate::services::session::{require_wallet, InFlight};

/// What a payment unlocks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "snake_case")]
pub enum FeeScope {
    TokenDeployment,
    NftDeployment,
    /// Mint/burn on the asset at this address
    AssetOperations(String),
}

impl FeeScope {
    /// Same scope with the address lowercased; asset addresses match
    /// case-insensitively
    pub fn canonical(&self) -> FeeScope {
        match self {
            FeeScope::AssetOperations(address) => {
                FeeScope::AssetOperations(address.to_ascii_lowercase())
            }
            other => other.clone(),
        }
    }

    fn address(&self) -> Option<String> {
        match self {
            FeeScope::AssetOperations(address) => Some(address.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for FeeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeScope::TokenDeployment => write!(f, "token deployment"),
            FeeScope::NftDeployment => write!(f, "NFT deployment"),
            FeeScope::AssetOperations(address) => write!(f, "operations on {}", address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub scope: FeeScope,
    pub amount: String,
    pub currency: String,
    pub recipient: String,
    pub paid: bool,
    pub paying: bool,
}

pub struct FeeService {
    wallet: Arc<dyn WalletProvider>,
    fees: FeeConfig,
    currency: String,
    paid: Mutex<HashSet<FeeScope>>,
    paying: InFlight<FeeScope>,
    event_bus: Arc<EventBus>,
}

impl FeeService {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        fees: FeeConfig,
        currency: String,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wallet,
            fees,
            currency,
            paid: Mutex::new(HashSet::new()),
            paying: InFlight::new(),
            event_bus,
        }
    }

    pub fn amount_for(&self, scope: &FeeScope) -> &str {
        match scope {
            FeeScope::TokenDeployment => &self.fees.token_deployment,
            FeeScope::NftDeployment => &self.fees.nft_deployment,
            FeeScope::AssetOperations(_) => &self.fees.asset_operation,
        }
    }

    pub fn quote(&self, scope: &FeeScope) -> AppResult<FeeQuote> {
        let scope = scope.canonical();
        Ok(FeeQuote {
            amount: self.amount_for(&scope).to_string(),
            currency: self.currency.clone(),
            recipient: self.fees.recipient.clone(),
            paid: self.is_paid(&scope)?,
            paying: self.paying.is_active(&scope),
            scope,
        })
    }

    pub fn is_paid(&self, scope: &FeeScope) -> AppResult<bool> {
        Ok(self.paid.lock()?.contains(&scope.canonical()))
    }

    /// Fails with `FeeNotPaid` unless `scope` is paid
    pub fn ensure_paid(&self, scope: &FeeScope) -> AppResult<()> {
        if self.is_paid(scope)? {
            Ok(())
        } else {
            Err(AppError::FeeNotPaid)
        }
    }

    /// Send the fee for `scope` and wait for confirmation.
    ///
    /// An already-paid scope is not charged again.
    pub async fn pay(&self, scope: FeeScope) -> AppResult<FeeQuote> {
        let scope = scope.canonical();
        require_wallet(self.wallet.as_ref()).await?;

        if self.is_paid(&scope)? {
            log::info!("Fee for {} already paid", scope);
            return self.quote(&scope);
        }

        let guard = self.paying.try_acquire(scope.clone(), &scope.to_string())?;
        let amount = self.amount_for(&scope).to_string();

        log::info!("Paying {} {} for {}", amount, self.currency, scope);
        match self.wallet.send_native(&self.fees.recipient, &amount).await {
            Ok(receipt) => {
                self.paid.lock()?.insert(scope.clone());
                self.event_bus.emit(FeePaid::new(
                    scope.to_string(),
                    amount,
                    self.currency.clone(),
                    receipt.tx_hash,
                ));
            }
            Err(e) => {
                log::error!("Payment for {} failed: {}", scope, e);
                let err = AppError::PaymentFailed(e.to_string());
                self.event_bus.emit(OperationFailed::new(
                    OperationKind::Payment,
                    scope.address(),
                    err.to_string(),
                ));
                return Err(err);
            }
        }

        drop(guard);
        self.quote(&scope)
    }

    /// Use up a paid scope; returns whether it was paid
    pub fn consume(&self, scope: &FeeScope) -> AppResult<bool> {
        Ok(self.paid.lock()?.remove(&scope.canonical()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::sdk::{MockWalletProvider, SdkError};
    use crate::integrations::TransactionReceipt;

    fn connected_wallet() -> MockWalletProvider {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_connected_address()
            .returning(|| Ok(Some("0x1111111111111111111111111111111111111111".to_string())));
        wallet
    }

    fn setup(wallet: MockWalletProvider) -> (Arc<EventBus>, FeeService) {
        let bus = Arc::new(EventBus::new());
        let service = FeeService::new(
            Arc::new(wallet),
            FeeConfig::default(),
            "POL".to_string(),
            bus.clone(),
        );
        (bus, service)
    }

    #[test]
    fn test_quotes_use_configured_amounts() {
        let (_, service) = setup(MockWalletProvider::new());

        let quote = service.quote(&FeeScope::TokenDeployment).unwrap();
        assert_eq!(quote.amount, "10.0");
        assert_eq!(quote.currency, "POL");
        assert_eq!(quote.recipient, "0xe99919afd85beBbadAa63B940b090328b6Ad3653");
        assert!(!quote.paid);

        assert_eq!(service.amount_for(&FeeScope::NftDeployment), "5.0");
        assert_eq!(
            service.amount_for(&FeeScope::AssetOperations("0xabc".to_string())),
            "0.1"
        );
    }

    #[tokio::test]
    async fn test_pay_marks_scope_paid() {
        let mut wallet = connected_wallet();
        wallet.expect_send_native().times(1).returning(|to, amount| {
            assert_eq!(to, "0xe99919afd85beBbadAa63B940b090328b6Ad3653");
            assert_eq!(amount, "10.0");
            Ok(TransactionReceipt {
                tx_hash: "0xfee".to_string(),
            })
        });
        let (bus, service) = setup(wallet);

        let quote = service.pay(FeeScope::TokenDeployment).await.unwrap();
        assert!(quote.paid);
        assert!(!quote.paying);
        assert!(service.ensure_paid(&FeeScope::TokenDeployment).is_ok());
        assert!(matches!(
            service.ensure_paid(&FeeScope::NftDeployment),
            Err(AppError::FeeNotPaid)
        ));
        assert_eq!(bus.get_event_log()[0].event_type, "FeePaid");

        // Second pay is free
        assert!(service.pay(FeeScope::TokenDeployment).await.unwrap().paid);
    }

    #[tokio::test]
    async fn test_failed_payment_leaves_scope_unpaid() {
        let mut wallet = connected_wallet();
        wallet
            .expect_send_native()
            .returning(|_, _| Err(SdkError::Rejected("user rejected transaction".to_string())));
        let (bus, service) = setup(wallet);

        let err = service
            .pay(FeeScope::AssetOperations("0xabc".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Payment failed: user rejected transaction");
        assert!(!service
            .is_paid(&FeeScope::AssetOperations("0xabc".to_string()))
            .unwrap());
        assert_eq!(bus.get_event_log()[0].event_type, "OperationFailed");
    }

    #[tokio::test]
    async fn test_pay_requires_wallet() {
        let mut wallet = MockWalletProvider::new();
        wallet.expect_connected_address().returning(|| Ok(None));
        wallet.expect_send_native().never();
        let (_, service) = setup(wallet);

        assert!(matches!(
            service.pay(FeeScope::NftDeployment).await,
            Err(AppError::WalletNotConnected)
        ));
    }

    #[tokio::test]
    async fn test_consume() {
        let mut wallet = connected_wallet();
        wallet.expect_send_native().returning(|_, _| {
            Ok(TransactionReceipt {
                tx_hash: "0xfee".to_string(),
            })
        });
        let (_, service) = setup(wallet);

        service.pay(FeeScope::NftDeployment).await.unwrap();
        assert!(service.consume(&FeeScope::NftDeployment).unwrap());
        assert!(!service.consume(&FeeScope::NftDeployment).unwrap());
        assert!(!service.is_paid(&FeeScope::NftDeployment).unwrap());
    }

    #[tokio::test]
    async fn test_asset_scope_ignores_address_case() {
        let mut wallet = connected_wallet();
        wallet.expect_send_native().times(1).returning(|_, _| {
            Ok(TransactionReceipt {
                tx_hash: "0xfee".to_string(),
            })
        });
        let (_, service) = setup(wallet);

        let quote = service
            .pay(FeeScope::AssetOperations("0xAbCd".to_string()))
            .await
            .unwrap();
        assert_eq!(quote.scope, FeeScope::AssetOperations("0xabcd".to_string()));
        assert!(service
            .ensure_paid(&FeeScope::AssetOperations("0xABCD".to_string()))
            .is_ok());

        // Already paid under another casing, so no second transfer
        assert!(service
            .pay(FeeScope::AssetOperations("0xabcd".to_string()))
            .await
            .unwrap()
            .paid);
    }

    #[test]
    fn test_scope_wire_format() {
        let json = serde_json::to_string(&FeeScope::AssetOperations("0xabc".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"asset_operations","address":"0xabc"}"#);

        let scope: FeeScope = serde_json::from_str(r#"{"kind":"token_deployment"}"#).unwrap();
        assert_eq!(scope, FeeScope::TokenDeployment);
    }
}
