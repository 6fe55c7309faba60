use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::asset::{AssetKind, DeployedAsset};

/// An ERC-20 token contract deployed from the dashboard.
///
/// Serialized in camelCase so the stored list stays readable by the
/// web build of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Contract address, unique among recorded tokens
    pub address: String,

    pub name: String,

    pub symbol: String,

    /// Supply minted right after deployment, kept as entered (decimal string)
    pub initial_supply: String,

    /// Deployment time
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee: Option<String>,

    #[serde(default)]
    pub is_burnable: bool,

    #[serde(default)]
    pub is_mintable: bool,

    #[serde(default)]
    pub is_favorite: bool,
}

impl Token {
    /// Create a freshly deployed token record, stamped now and not favorited
    pub fn new(address: String, name: String, symbol: String, initial_supply: String) -> Self {
        Self {
            address,
            name,
            symbol,
            initial_supply,
            timestamp: Utc::now(),
            icon_url: None,
            description: None,
            website: None,
            platform_fee: None,
            is_burnable: false,
            is_mintable: false,
            is_favorite: false,
        }
    }
}

impl DeployedAsset for Token {
    const KIND: AssetKind = AssetKind::Token;

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

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
