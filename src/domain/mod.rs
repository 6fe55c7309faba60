// src/domain/mod.rs
//
// Domain Root
//
// Records, invariants and the pure listing logic (sort, paginate).
// Nothing in here touches storage, the wallet or the SDK.

pub mod asset;
pub mod listing;
pub mod nft;
pub mod preferences;
pub mod token;
pub mod validation;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use asset::{AssetKind, DeployedAsset};
pub use listing::{paginate, sort_assets, Page};
pub use nft::{validate_nft_collection, NftCollection, NftMetadata};
pub use preferences::{SortOption, ViewMode};
pub use token::{validate_token, Token};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Violations of input rules and record invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("An asset with address {0} is already recorded")]
    DuplicateAddress(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
