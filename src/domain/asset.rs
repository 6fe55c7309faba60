// src/domain/asset.rs
//
// Shape shared by every deployed asset record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two kinds of contracts the dashboard deploys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Token,
    NftCollection,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Token => write!(f, "token"),
            AssetKind::NftCollection => write!(f, "nft_collection"),
        }
    }
}

/// A token or NFT collection contract recorded after a successful deployment.
///
/// The address is the identity. Only the favorite flag is mutable.
pub trait DeployedAsset {
    const KIND: AssetKind;

    fn address(&self) -> &str;
    fn name(&self) -> &str;
    fn symbol(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
    fn is_favorite(&self) -> bool;
    fn set_favorite(&mut self, favorite: bool);
}
