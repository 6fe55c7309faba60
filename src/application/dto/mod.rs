// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are webview-friendly (camelCase) shapes
// - Records (Token, NftCollection) already serialize in the web format and
//   cross the boundary as-is
// - Conversion FROM domain types only

use serde::{Deserialize, Serialize};

use crate::domain::{AssetKind, Page, SortOption, ViewMode};
use crate::integrations::ExplorerLinks;

// ============================================================================
// LISTING DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub view_mode: ViewMode,
    pub sort_option: SortOption,
}

/// Entry of the sort selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOptionDto {
    pub value: SortOption,
    pub label: String,
}

// ============================================================================
// LINK DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLinksDto {
    pub explorer_url: String,
    pub code_url: String,
    pub share_url: String,
}

impl AssetLinksDto {
    pub fn build(
        links: &ExplorerLinks,
        name: &str,
        symbol: &str,
        address: &str,
    ) -> crate::error::AppResult<Self> {
        Ok(Self {
            explorer_url: links.token_url(address),
            code_url: links.code_url(address),
            share_url: links.share_url(name, symbol, address)?,
        })
    }
}

// ============================================================================
// REQUEST DTOs
// ============================================================================

/// Send form: `quantity` is an amount for tokens, a token id for NFTs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAssetDto {
    pub kind: AssetKind,
    pub address: String,
    pub recipient: String,
    pub quantity: String,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            per_page: page.per_page,
            has_previous: page.has_previous,
            has_next: page.has_next,
        }
    }
}

impl From<SortOption> for SortOptionDto {
    fn from(option: SortOption) -> Self {
        Self {
            value: option,
            label: option.label().to_string(),
        }
    }
}

pub fn sort_options() -> Vec<SortOptionDto> {
    SortOption::ALL.into_iter().map(SortOptionDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NetworkConfig, ShareConfig};
    use crate::domain::paginate;

    #[test]
    fn test_page_dto_is_camel_case() {
        let page = paginate(&[1, 2, 3], 1, 2).unwrap();
        let json = serde_json::to_value(PageDto::from(page)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNext"], true);
    }

    #[test]
    fn test_sort_options() {
        let options = sort_options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, "Newest First");
        let json = serde_json::to_string(&options[2]).unwrap();
        assert_eq!(json, r#"{"value":"name","label":"Name (A-Z)"}"#);
    }

    #[test]
    fn test_send_dto_parsing() {
        let dto: SendAssetDto = serde_json::from_str(
            r#"{"kind": "nft_collection", "address": "0xabc", "recipient": "0xdef", "quantity": "4"}"#,
        )
        .unwrap();
        assert_eq!(dto.kind, AssetKind::NftCollection);
    }

    #[test]
    fn test_asset_links() {
        let links = ExplorerLinks::new(&NetworkConfig::default(), &ShareConfig::default());
        let dto = AssetLinksDto::build(&links, "Magic", "MGC", "0xabc").unwrap();
        assert_eq!(dto.code_url, "https://polygonscan.com/token/0xabc#code");
        assert!(dto.share_url.contains("text="));
    }
}
