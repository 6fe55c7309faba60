//! NFT collection invariants:
//!
//! 1. Address, name and symbol are non-empty
//! 2. Image URL is an absolute URL
//! 3. Royalty is a percentage between 0 and 100
//! 4. Max supply, when set, is a non-negative integer
//! 5. Mint price is a non-negative number

pub mod entity;

pub use entity::{NftCollection, NftMetadata};

use crate::domain::validation::{
    parse_non_negative_integer, parse_non_negative_number, parse_royalty_bps, require_text,
    validate_url,
};
use crate::domain::DomainResult;

/// Validates NftCollection invariants
pub fn validate_nft_collection(nft: &NftCollection) -> DomainResult<()> {
    require_text("Collection address", &nft.address)?;
    require_text("Collection name", &nft.name)?;
    require_text("Collection symbol", &nft.symbol)?;
    validate_url("image URL", &nft.image_url)?;
    parse_royalty_bps(&nft.royalty_bps)?;
    parse_non_negative_number("Mint price", &nft.mint_price)?;
    if let Some(max_supply) = nft.max_supply.as_deref().filter(|s| !s.trim().is_empty()) {
        parse_non_negative_integer("Max supply", max_supply)?;
    }
    Ok(())
}
