// src/services/session.rs
//
// Helpers shared by every wallet-backed service: the connected-wallet gate
// and the in-flight guard that keeps one operation per key at a time.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, AppResult};
use crate::integrations::WalletProvider;

/// Address of the connected wallet, or `WalletNotConnected`
///
/// An unreachable bridge counts as a disconnected wallet.
pub async fn require_wallet(wallet: &dyn WalletProvider) -> AppResult<String> {
    match wallet.connected_address().await {
        Ok(Some(address)) => Ok(address),
        Ok(None) => Err(AppError::WalletNotConnected),
        Err(e) => {
            log::warn!("Wallet lookup failed: {}", e);
            Err(AppError::WalletNotConnected)
        }
    }
}

/// Set of keys with an operation currently running
#[derive(Debug)]
pub struct InFlight<K: Eq + Hash> {
    active: Arc<Mutex<HashSet<K>>>,
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    pub fn new() -> Self {
        Self {
            active: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Check-and-set: claims `key` or fails with `OperationInProgress`
    pub fn try_acquire(&self, key: K, label: &str) -> AppResult<InFlightGuard<K>> {
        let mut active = self.active.lock()?;
        if !active.insert(key.clone()) {
            return Err(AppError::OperationInProgress(label.to_string()));
        }

        Ok(InFlightGuard {
            active: Arc::clone(&self.active),
            key: Some(key),
        })
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(key))
            .unwrap_or(false)
    }
}

impl<K: Eq + Hash + Clone> Default for InFlight<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases its key on drop, on success and on failure alike
#[derive(Debug)]
pub struct InFlightGuard<K: Eq + Hash> {
    active: Arc<Mutex<HashSet<K>>>,
    key: Option<K>,
}

impl<K: Eq + Hash> Drop for InFlightGuard<K> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            match self.active.lock() {
                Ok(mut active) => {
                    active.remove(&key);
                }
                Err(poisoned) => {
                    poisoned.into_inner().remove(&key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::sdk::{MockWalletProvider, SdkError};

    #[test]
    fn test_second_acquire_is_rejected_until_release() {
        let in_flight: InFlight<String> = InFlight::new();

        let guard = in_flight.try_acquire("0xabc".to_string(), "0xabc").unwrap();
        assert!(in_flight.is_active(&"0xabc".to_string()));

        let err = in_flight.try_acquire("0xabc".to_string(), "0xabc").unwrap_err();
        assert!(matches!(err, AppError::OperationInProgress(_)));

        // Other keys are independent
        assert!(in_flight.try_acquire("0xdef".to_string(), "0xdef").is_ok());

        drop(guard);
        assert!(!in_flight.is_active(&"0xabc".to_string()));
        assert!(in_flight.try_acquire("0xabc".to_string(), "0xabc").is_ok());
    }

    #[tokio::test]
    async fn test_require_wallet() {
        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_connected_address()
            .returning(|| Ok(Some("0xwallet".to_string())));
        assert_eq!(require_wallet(&wallet).await.unwrap(), "0xwallet");

        let mut wallet = MockWalletProvider::new();
        wallet.expect_connected_address().returning(|| Ok(None));
        assert!(matches!(
            require_wallet(&wallet).await,
            Err(AppError::WalletNotConnected)
        ));

        let mut wallet = MockWalletProvider::new();
        wallet
            .expect_connected_address()
            .returning(|| Err(SdkError::Transport("connection refused".to_string())));
        assert!(matches!(
            require_wallet(&wallet).await,
            Err(AppError::WalletNotConnected)
        ));
    }
}
