//! Token record invariants:
//!
//! 1. Address is non-empty and identifies the record
//! 2. Name and symbol are non-empty
//! 3. Initial supply is a non-negative decimal number
//! 4. Records are append-only; only `is_favorite` changes after creation

pub mod entity;

pub use entity::Token;

use crate::domain::validation::{parse_non_negative_number, require_text};
use crate::domain::DomainResult;

/// Validates Token invariants
pub fn validate_token(token: &Token) -> DomainResult<()> {
    require_text("Token address", &token.address)?;
    require_text("Token name", &token.name)?;
    require_text("Token symbol", &token.symbol)?;
    parse_non_negative_number("Initial supply", &token.initial_supply)?;
    Ok(())
}
