// src/domain/validation.rs
//
// Superficial input checks shared by the deployment, operation and
// transfer forms. Contract-level rules stay with the deployed contract.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use crate::domain::{DomainError, DomainResult};

/// Upper bound of the royalty percentage
pub const MAX_ROYALTY_PERCENT: f64 = 100.0;

fn evm_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("static pattern is valid"))
}

fn parse_number(label: &str, value: &str) -> DomainResult<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("{} must be a number", label)))?;

    if !parsed.is_finite() {
        return Err(DomainError::Validation(format!("{} must be a number", label)));
    }
    Ok(parsed)
}

/// Field must contain something other than whitespace
pub fn require_text(label: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", label)));
    }
    Ok(())
}

/// Field must parse as an absolute URL
pub fn validate_url(label: &str, value: &str) -> DomainResult<()> {
    Url::parse(value.trim())
        .map(|_| ())
        .map_err(|_| DomainError::Validation(format!("Please enter a valid {}", label)))
}

/// Same as [`validate_url`] but an empty value is accepted
pub fn validate_optional_url(label: &str, value: Option<&str>) -> DomainResult<()> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(url) => validate_url(label, url),
        None => Ok(()),
    }
}

/// Amount for mint, burn and send: a number strictly greater than zero
pub fn parse_positive_amount(value: &str) -> DomainResult<f64> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation("Please enter a valid amount".to_string()));
    }
    let amount = parse_number("Amount", value)
        .map_err(|_| DomainError::Validation("Please enter a valid amount".to_string()))?;
    if amount <= 0.0 {
        return Err(DomainError::Validation("Please enter a valid amount".to_string()));
    }
    Ok(amount)
}

pub fn parse_non_negative_number(label: &str, value: &str) -> DomainResult<f64> {
    let number = parse_number(label, value)?;
    if number < 0.0 {
        return Err(DomainError::Validation(format!("{} cannot be negative", label)));
    }
    Ok(number)
}

pub fn parse_non_negative_integer(label: &str, value: &str) -> DomainResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| DomainError::Validation(format!("{} must be a whole number", label)))
}

/// Royalty percentage (0-100) converted to contract basis points
pub fn parse_royalty_bps(percent: &str) -> DomainResult<u32> {
    let value = parse_number("Royalty percentage", percent)?;
    if !(0.0..=MAX_ROYALTY_PERCENT).contains(&value) {
        return Err(DomainError::Validation(
            "Royalty percentage must be between 0 and 100".to_string(),
        ));
    }
    Ok((value * 100.0).round() as u32)
}

/// `0x` followed by 40 hex digits. Checksum casing is not verified.
pub fn validate_evm_address(value: &str) -> DomainResult<()> {
    if !evm_address_pattern().is_match(value.trim()) {
        return Err(DomainError::Validation("Invalid recipient address".to_string()));
    }
    Ok(())
}

/// ERC-721 token id: a non-empty decimal integer
pub fn validate_token_id(value: &str) -> DomainResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Please enter a token ID".to_string()));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::Validation("Token ID must be a whole number".to_string()));
    }
    Ok(())
}
