// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own the gates (wallet, fee, in-flight), call the SDK, update the
// cache and emit events. Commands stay thin adapters over them.

pub mod asset_cache_service;
pub mod asset_operations_service;
pub mod deployment_service;
pub mod fee_service;
pub mod profile_service;
pub mod session;
pub mod transfer_service;

pub use asset_cache_service::AssetCacheService;

pub use asset_operations_service::{AssetOperationsService, OperationStatus};

pub use deployment_service::{
    DeployNftCollectionRequest,
    DeployTokenRequest,
    DeploymentService,
};

pub use fee_service::{FeeQuote, FeeScope, FeeService};

pub use profile_service::{format_address, ActivityItem, Dashboard, Profile, ProfileService};

pub use transfer_service::{ReceiveInfo, TransferService};
