// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission

pub mod asset_repository;
pub mod key_value_repository;

pub use asset_repository::{AssetRepository, KvAssetRepository};
pub use key_value_repository::{
    InMemoryKeyValueRepository, KeyValueRepository, SqliteKeyValueRepository,
};
