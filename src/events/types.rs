// src/events/types.rs
//
// All domain events in the system.
// Each event is an immutable fact about an operation that already finished.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react (notify, log)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AssetKind;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// FEE EVENTS
// ============================================================================

/// A flat-fee payment was confirmed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePaid {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Human-readable scope, e.g. "token deployment"
    pub scope: String,
    pub amount: String,
    pub currency: String,
    pub tx_hash: String,
}

impl FeePaid {
    pub fn new(scope: String, amount: String, currency: String, tx_hash: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            scope,
            amount,
            currency,
            tx_hash,
        }
    }
}

domain_event!(FeePaid);

// ============================================================================
// DEPLOYMENT EVENTS
// ============================================================================

/// A token contract was deployed and recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDeployed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub name: String,
    pub symbol: String,
}

impl TokenDeployed {
    pub fn new(address: String, name: String, symbol: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            name,
            symbol,
        }
    }
}

domain_event!(TokenDeployed);

/// An NFT collection contract was deployed and recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftCollectionDeployed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub name: String,
    pub symbol: String,
}

impl NftCollectionDeployed {
    pub fn new(address: String, name: String, symbol: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            name,
            symbol,
        }
    }
}

domain_event!(NftCollectionDeployed);

// ============================================================================
// CACHE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AssetKind,
    pub address: String,
    pub is_favorite: bool,
}

impl FavoriteToggled {
    pub fn new(kind: AssetKind, address: String, is_favorite: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            address,
            is_favorite,
        }
    }
}

domain_event!(FavoriteToggled);

// ============================================================================
// ASSET OPERATION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensMinted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub symbol: String,
    pub amount: String,
}

impl TokensMinted {
    pub fn new(address: String, symbol: String, amount: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            symbol,
            amount,
        }
    }
}

domain_event!(TokensMinted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensBurned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub symbol: String,
    pub amount: String,
}

impl TokensBurned {
    pub fn new(address: String, symbol: String, amount: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            symbol,
            amount,
        }
    }
}

domain_event!(TokensBurned);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftMinted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub collection_name: String,
}

impl NftMinted {
    pub fn new(address: String, collection_name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            collection_name,
        }
    }
}

domain_event!(NftMinted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftBurned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub address: String,
    pub token_id: String,
}

impl NftBurned {
    pub fn new(address: String, token_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            address,
            token_id,
        }
    }
}

domain_event!(NftBurned);

/// Tokens or an NFT left the connected wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetTransferred {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub kind: AssetKind,
    pub address: String,
    pub recipient: String,
    /// Amount for tokens, token id for NFTs
    pub quantity: String,
}

impl AssetTransferred {
    pub fn new(kind: AssetKind, address: String, recipient: String, quantity: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            kind,
            address,
            recipient,
            quantity,
        }
    }
}

domain_event!(AssetTransferred);

// ============================================================================
// FAILURES
// ============================================================================

/// Which user-facing operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Payment,
    Deployment,
    Mint,
    Burn,
    Transfer,
    Metadata,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Payment => write!(f, "payment"),
            OperationKind::Deployment => write!(f, "deployment"),
            OperationKind::Mint => write!(f, "mint"),
            OperationKind::Burn => write!(f, "burn"),
            OperationKind::Transfer => write!(f, "transfer"),
            OperationKind::Metadata => write!(f, "metadata"),
        }
    }
}

/// An external call failed; `message` is the user-facing error text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub operation: OperationKind,
    pub address: Option<String>,
    pub message: String,
}

impl OperationFailed {
    pub fn new(operation: OperationKind, address: Option<String>, message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            operation,
            address,
            message,
        }
    }
}

domain_event!(OperationFailed);
