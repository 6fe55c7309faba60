use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::asset::{AssetKind, DeployedAsset};

fn zero() -> String {
    "0".to_string()
}

/// An ERC-721 collection contract deployed from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    /// Contract address, unique among recorded collections
    pub address: String,

    pub name: String,

    pub symbol: String,

    /// Collection artwork, also used as the image of every minted item
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_supply: Option<String>,

    #[serde(default = "zero")]
    pub mint_price: String,

    /// Royalty percentage (0-100) as entered; the contract receives it x100
    #[serde(default = "zero")]
    pub royalty_bps: String,

    #[serde(default)]
    pub is_lazy: bool,

    #[serde(default)]
    pub is_delayed_reveal: bool,

    #[serde(default)]
    pub is_restricted_transfer: bool,

    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub is_favorite: bool,
}

impl NftCollection {
    pub fn new(address: String, name: String, symbol: String, image_url: String) -> Self {
        Self {
            address,
            name,
            symbol,
            image_url,
            description: None,
            max_supply: None,
            mint_price: zero(),
            royalty_bps: zero(),
            is_lazy: false,
            is_delayed_reveal: false,
            is_restricted_transfer: false,
            timestamp: Utc::now(),
            is_favorite: false,
        }
    }
}

impl DeployedAsset for NftCollection {
    const KIND: AssetKind = AssetKind::NftCollection;

    fn address(&self) -> &str {
        &self.address
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    fn set_favorite(&mut self, favorite: bool) {
        self.is_favorite = favorite;
    }
}

/// Metadata of one minted item, as reported by the collection contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub description: String,
    pub image: String,
}
