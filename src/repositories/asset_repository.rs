// src/repositories/asset_repository.rs
//
// Typed view over the key-value store: deployed asset lists, favorite
// address lists and listing preferences, under fixed string keys.
//
// Unreadable stored values fall back to empty/default and are logged;
// they never fail startup. Asset lists are decoded record by record, and a
// list holding anything unreadable is copied to a backup key first, so the
// next write cannot erase it.

use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{AssetKind, DeployedAsset, NftCollection, SortOption, Token, ViewMode};
use crate::error::AppResult;
use crate::repositories::KeyValueRepository;

pub const DEPLOYED_TOKENS_KEY: &str = "deployedTokens";
pub const DEPLOYED_NFTS_KEY: &str = "deployedNFTs";
pub const FAVORITE_TOKENS_KEY: &str = "favoriteTokens";
pub const FAVORITE_NFTS_KEY: &str = "favoriteNFTs";
pub const VIEW_MODE_KEY: &str = "viewMode";
pub const SORT_OPTION_KEY: &str = "sortOption";

/// Appended to a record key to name its backup copy
pub const UNREADABLE_SUFFIX: &str = ".unreadable";

fn records_key(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Token => DEPLOYED_TOKENS_KEY,
        AssetKind::NftCollection => DEPLOYED_NFTS_KEY,
    }
}

fn favorites_key(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Token => FAVORITE_TOKENS_KEY,
        AssetKind::NftCollection => FAVORITE_NFTS_KEY,
    }
}

pub trait AssetRepository: Send + Sync {
    fn load_tokens(&self) -> AppResult<Vec<Token>>;
    fn save_tokens(&self, tokens: &[Token]) -> AppResult<()>;
    /// Persist the token list together with its favorite-address list
    fn save_tokens_with_favorites(&self, tokens: &[Token]) -> AppResult<()>;

    fn load_nfts(&self) -> AppResult<Vec<NftCollection>>;
    fn save_nfts(&self, nfts: &[NftCollection]) -> AppResult<()>;
    fn save_nfts_with_favorites(&self, nfts: &[NftCollection]) -> AppResult<()>;

    fn load_view_mode(&self) -> AppResult<ViewMode>;
    fn save_view_mode(&self, mode: ViewMode) -> AppResult<()>;
    fn load_sort_option(&self) -> AppResult<SortOption>;
    fn save_sort_option(&self, option: SortOption) -> AppResult<()>;
}

pub struct KvAssetRepository {
    store: Arc<dyn KeyValueRepository>,
}

impl KvAssetRepository {
    pub fn new(store: Arc<dyn KeyValueRepository>) -> Self {
        Self { store }
    }

    /// Decode a JSON value, treating absent or malformed data as `None`
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Ignoring unreadable value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Copy an unreadable raw value aside, unless that exact value is
    /// already backed up
    fn keep_unreadable(&self, key: &str, raw: &str) -> AppResult<()> {
        let backup_key = format!("{}{}", key, UNREADABLE_SUFFIX);
        if self.store.get(&backup_key)?.as_deref() == Some(raw) {
            return Ok(());
        }

        log::warn!("Keeping unreadable '{}' value under '{}'", key, backup_key);
        self.store.set(&backup_key, raw)
    }

    fn decode_records<T>(&self, key: &str) -> AppResult<Vec<T>>
    where
        T: DeployedAsset + DeserializeOwned,
    {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Ignoring unreadable value under '{}': {}", key, e);
                self.keep_unreadable(key, &raw)?;
                return Ok(Vec::new());
            }
        };

        let total = values.len();
        let mut records = Vec::with_capacity(total);
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {} record #{} under '{}': {}", T::KIND, index, key, e),
            }
        }

        if records.len() < total {
            self.keep_unreadable(key, &raw)?;
        }
        Ok(records)
    }

    fn load_records<T>(&self) -> AppResult<Vec<T>>
    where
        T: DeployedAsset + DeserializeOwned,
    {
        let mut records: Vec<T> = self.decode_records(records_key(T::KIND))?;
        let favorites: HashSet<String> = self
            .read_json::<Vec<String>>(favorites_key(T::KIND))?
            .unwrap_or_default()
            .into_iter()
            .collect();

        for record in records.iter_mut() {
            let favorite = favorites.contains(record.address());
            record.set_favorite(favorite);
        }

        log::debug!("Loaded {} {} records", records.len(), T::KIND);
        Ok(records)
    }

    fn save_records<T>(&self, records: &[T]) -> AppResult<()>
    where
        T: DeployedAsset + Serialize,
    {
        let json = serde_json::to_string(records)?;
        self.store.set(records_key(T::KIND), &json)
    }

    fn save_records_with_favorites<T>(&self, records: &[T]) -> AppResult<()>
    where
        T: DeployedAsset + Serialize,
    {
        let favorites: Vec<&str> = records
            .iter()
            .filter(|r| r.is_favorite())
            .map(|r| r.address())
            .collect();

        self.store.set_many(&[
            (records_key(T::KIND), serde_json::to_string(records)?),
            (favorites_key(T::KIND), serde_json::to_string(&favorites)?),
        ])
    }
}

impl AssetRepository for KvAssetRepository {
    fn load_tokens(&self) -> AppResult<Vec<Token>> {
        self.load_records()
    }

    fn save_tokens(&self, tokens: &[Token]) -> AppResult<()> {
        self.save_records(tokens)
    }

    fn save_tokens_with_favorites(&self, tokens: &[Token]) -> AppResult<()> {
        self.save_records_with_favorites(tokens)
    }

    fn load_nfts(&self) -> AppResult<Vec<NftCollection>> {
        self.load_records()
    }

    fn save_nfts(&self, nfts: &[NftCollection]) -> AppResult<()> {
        self.save_records(nfts)
    }

    fn save_nfts_with_favorites(&self, nfts: &[NftCollection]) -> AppResult<()> {
        self.save_records_with_favorites(nfts)
    }

    fn load_view_mode(&self) -> AppResult<ViewMode> {
        Ok(self
            .store
            .get(VIEW_MODE_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    fn save_view_mode(&self, mode: ViewMode) -> AppResult<()> {
        self.store.set(VIEW_MODE_KEY, &mode.to_string())
    }

    fn load_sort_option(&self) -> AppResult<SortOption> {
        Ok(self
            .store
            .get(SORT_OPTION_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    fn save_sort_option(&self, option: SortOption) -> AppResult<()> {
        self.store.set(SORT_OPTION_KEY, &option.to_string())
    }
}
