// src/services/profile_service.rs
//
// Read models for the profile page and the dashboard overview.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::UiConfig;
use crate::domain::{AssetKind, DeployedAsset, NftCollection, SortOption, Token};
use crate::error::AppResult;
use crate::integrations::{ExplorerLinks, WalletBalance, WalletProvider};
use crate::services::asset_cache_service::AssetCacheService;
use crate::services::session::require_wallet;

/// `0x1234...abcd`: first 6 and last 4 characters
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// One row of the recent-activity list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: AssetKind,
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub is_favorite: bool,
}

impl ActivityItem {
    fn from_asset<T: DeployedAsset>(asset: &T) -> Self {
        Self {
            kind: T::KIND,
            address: asset.address().to_string(),
            name: asset.name().to_string(),
            symbol: asset.symbol().to_string(),
            timestamp: asset.timestamp(),
            is_favorite: asset.is_favorite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub address: String,
    pub short_address: String,
    pub balance: WalletBalance,
    pub explorer_url: String,
    pub token_count: usize,
    pub nft_count: usize,
    pub total_count: usize,
    pub favorite_count: usize,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub token_count: usize,
    pub nft_count: usize,
    pub recent_tokens: Vec<Token>,
    pub recent_nfts: Vec<NftCollection>,
    /// Full lists under the dashboard's own sort selectors
    pub tokens: Vec<Token>,
    pub nfts: Vec<NftCollection>,
}

pub struct ProfileService {
    wallet: Arc<dyn WalletProvider>,
    cache: Arc<AssetCacheService>,
    links: ExplorerLinks,
    ui: UiConfig,
    currency_symbol: String,
}

impl ProfileService {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        cache: Arc<AssetCacheService>,
        links: ExplorerLinks,
        ui: UiConfig,
        currency_symbol: String,
    ) -> Self {
        Self {
            wallet,
            cache,
            links,
            ui,
            currency_symbol,
        }
    }

    pub async fn profile(&self) -> AppResult<Profile> {
        let address = require_wallet(self.wallet.as_ref()).await?;

        // A missing balance is shown as zero
        let balance = match self.wallet.balance().await {
            Ok(balance) => balance,
            Err(e) => {
                log::warn!("Balance lookup failed: {}", e);
                WalletBalance {
                    display_value: "0".to_string(),
                    symbol: self.currency_symbol.clone(),
                }
            }
        };

        let tokens = self.cache.tokens_sorted_by(SortOption::Newest)?;
        let nfts = self.cache.nfts_sorted_by(SortOption::Newest)?;
        let favorite_count = tokens.iter().filter(|t| t.is_favorite).count()
            + nfts.iter().filter(|n| n.is_favorite).count();

        Ok(Profile {
            short_address: format_address(&address),
            explorer_url: self.links.address_url(&address),
            address,
            balance,
            token_count: tokens.len(),
            nft_count: nfts.len(),
            total_count: tokens.len() + nfts.len(),
            favorite_count,
            recent_activity: self.recent_activity(&tokens, &nfts),
        })
    }

    /// Newest records across both kinds
    fn recent_activity(&self, tokens: &[Token], nfts: &[NftCollection]) -> Vec<ActivityItem> {
        let mut items: Vec<ActivityItem> = tokens
            .iter()
            .map(ActivityItem::from_asset)
            .chain(nfts.iter().map(ActivityItem::from_asset))
            .collect();

        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(self.ui.recent_activity_limit);
        items
    }

    pub fn dashboard(&self, token_sort: SortOption, nft_sort: SortOption) -> AppResult<Dashboard> {
        let recent = self.ui.dashboard_recent_count;
        let recent_tokens: Vec<Token> = self.cache.tokens()?.into_iter().take(recent).collect();
        let recent_nfts: Vec<NftCollection> = self.cache.nfts()?.into_iter().take(recent).collect();

        let tokens = self.cache.tokens_sorted_by(token_sort)?;
        let nfts = self.cache.nfts_sorted_by(nft_sort)?;

        Ok(Dashboard {
            token_count: tokens.len(),
            nft_count: nfts.len(),
            recent_tokens,
            recent_nfts,
            tokens,
            nfts,
        })
    }
}
