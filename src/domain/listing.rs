// src/domain/listing.rs
//
// Client-side listing: sorting and pagination of deployed assets.
// Recomputed on every read, no incremental index.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::asset::DeployedAsset;
use crate::domain::preferences::SortOption;
use crate::domain::{DomainError, DomainResult};

/// Case-insensitive alphabetic order, exact bytes as tie-break
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ordering of two assets under a sort option
pub fn compare_assets<T: DeployedAsset>(a: &T, b: &T, option: SortOption) -> Ordering {
    match option {
        SortOption::Newest => b.timestamp().cmp(&a.timestamp()),
        SortOption::Oldest => a.timestamp().cmp(&b.timestamp()),
        SortOption::Name => compare_text(a.name(), b.name()),
        SortOption::Symbol => compare_text(a.symbol(), b.symbol()),
    }
}

/// Sorted copy of `items`. Equal keys keep their insertion order.
pub fn sort_assets<T: DeployedAsset + Clone>(items: &[T], option: SortOption) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_assets(a, b, option));
    sorted
}

/// One page of a listing (1-based)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Slice `items` into page `page` of `per_page` items.
///
/// The requested page is clamped into `1..=max(total_pages, 1)`.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> DomainResult<Page<T>> {
    if per_page == 0 {
        return Err(DomainError::Validation("Page size must be at least 1".to_string()));
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    Ok(Page {
        items: items[start..end].to_vec(),
        current_page,
        total_pages,
        total_items,
        per_page,
        has_previous: current_page > 1,
        has_next: current_page < total_pages,
    })
}
