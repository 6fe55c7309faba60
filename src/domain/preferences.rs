// src/domain/preferences.rs
//
// Listing preferences persisted next to the asset records.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// How asset lists are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Order applied to asset lists on every read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    Name,
    Symbol,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::Name,
        SortOption::Symbol,
    ];

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::Oldest => "Oldest First",
            SortOption::Name => "Name (A-Z)",
            SortOption::Symbol => "Symbol (A-Z)",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(DomainError::Validation(format!("Invalid view mode: {}", other))),
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOption::Newest => write!(f, "newest"),
            SortOption::Oldest => write!(f, "oldest"),
            SortOption::Name => write!(f, "name"),
            SortOption::Symbol => write!(f, "symbol"),
        }
    }
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "name" => Ok(SortOption::Name),
            "symbol" => Ok(SortOption::Symbol),
            other => Err(DomainError::Validation(format!("Invalid sort option: {}", other))),
        }
    }
}
