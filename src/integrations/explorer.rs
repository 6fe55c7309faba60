// src/integrations/explorer.rs
//
// Block-explorer and share-intent links. Pure string building; opening them
// is left to the desktop shell.

use reqwest::Url;

use crate::config::{NetworkConfig, ShareConfig};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ExplorerLinks {
    explorer_base_url: String,
    intent_url: String,
    signature: String,
}

impl ExplorerLinks {
    pub fn new(network: &NetworkConfig, share: &ShareConfig) -> Self {
        Self {
            explorer_base_url: network.explorer_base_url.trim_end_matches('/').to_string(),
            intent_url: share.intent_url.clone(),
            signature: share.signature.clone(),
        }
    }

    pub fn token_url(&self, address: &str) -> String {
        format!("{}/token/{}", self.explorer_base_url, address)
    }

    /// Verified source tab of the contract page
    pub fn code_url(&self, address: &str) -> String {
        format!("{}#code", self.token_url(address))
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base_url, address)
    }

    pub fn share_text(&self, name: &str, symbol: &str, address: &str) -> String {
        format!(
            "Check out {} ({})\n\nView on Polygonscan: {}\n\n{}",
            name,
            symbol,
            self.token_url(address),
            self.signature
        )
    }

    /// Share intent with the text query-encoded
    pub fn share_url(&self, name: &str, symbol: &str, address: &str) -> AppResult<String> {
        let text = self.share_text(name, symbol, address);
        Url::parse_with_params(&self.intent_url, &[("text", text.as_str())])
            .map(String::from)
            .map_err(|e| AppError::Config(format!("Invalid share intent URL: {}", e)))
    }
}
