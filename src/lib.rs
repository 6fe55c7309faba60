// src/lib.rs
// MagicMinter - Local-first token and NFT collection deployment dashboard
//
// Architecture:
// - Domain-centric: records, invariants, sorting and pagination are pure
// - Event-driven: services emit facts; the application layer turns them
//   into notifications
// - Explicit gates: wallet, fee and in-flight checks live in services
// - Local-first: deployed assets and preferences stay on this machine
// - External SDK: wallet and contracts sit behind traits

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// BOUNDARIES
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    paginate, sort_assets, validate_nft_collection, validate_token, AssetKind, DeployedAsset,
    DomainError, NftCollection, NftMetadata, Page, SortOption, Token, ViewMode,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{
    AssetRepository, InMemoryKeyValueRepository, KeyValueRepository, KvAssetRepository,
    SqliteKeyValueRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AssetCacheService, AssetOperationsService, DeployNftCollectionRequest, DeployTokenRequest,
    DeploymentService, FeeQuote, FeeScope, FeeService, ProfileService, TransferService,
};

// ============================================================================
// PUBLIC API - Application & Integrations
// ============================================================================

pub use application::AppState;
pub use integrations::{ContractSdk, ExplorerLinks, HttpSdkGateway, SdkError, WalletProvider};
