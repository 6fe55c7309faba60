// src/config/mod.rs
//
// Application configuration
//
// Loaded once at startup from a JSON file. Every field has a default, so a
// missing file (or a partial one) yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::validation::validate_evm_address;
use crate::error::{AppError, AppResult};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "MAGICMINTER_CONFIG";

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "magicminter";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub fees: FeeConfig,
    pub sdk: SdkConfig,
    pub ui: UiConfig,
    pub share: ShareConfig,
}

/// Chain the dashboard deploys to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_name: String,
    /// Native currency used for fees and balances
    pub currency_symbol: String,
    /// Block explorer base, without trailing slash
    pub explorer_base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_name: "Polygon".to_string(),
            currency_symbol: "POL".to_string(),
            explorer_base_url: "https://polygonscan.com".to_string(),
        }
    }
}

/// Flat fees, in native currency, paid before gated actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub recipient: String,
    pub token_deployment: String,
    pub nft_deployment: String,
    /// Unlocks mint/burn on one deployed asset for the session
    pub asset_operation: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            recipient: "0xe99919afd85beBbadAa63B940b090328b6Ad3653".to_string(),
            token_deployment: "10.0".to_string(),
            nft_deployment: "5.0".to_string(),
            asset_operation: "0.1".to_string(),
        }
    }
}

/// Where the wallet/SDK bridge listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub gateway_url: String,
    pub timeout_secs: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://127.0.0.1:3005".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Items per page in the deployed-asset lists (2x3 grid)
    pub page_size: usize,
    /// Entries in the profile's recent activity
    pub recent_activity_limit: usize,
    /// Entries in each "recent" column of the dashboard
    pub dashboard_recent_count: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: 6,
            recent_activity_limit: 5,
            dashboard_recent_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub intent_url: String,
    /// Last line of every share text
    pub signature: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            intent_url: "https://twitter.com/intent/tweet".to_string(),
            signature: "MINTED at MagicMinter.com".to_string(),
        }
    }
}

/// Application data directory: {DATA_DIR}/magicminter, created if missing
pub fn app_data_dir() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    let app_dir = data_dir.join(APP_DIR_NAME);
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

impl AppConfig {
    /// Config file location: $MAGICMINTER_CONFIG, else {app data}/config.json
    pub fn default_path() -> AppResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        Ok(app_data_dir()?.join("config.json"))
    }

    /// Load from the default location
    pub fn load() -> AppResult<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.ui.page_size == 0 {
            return Err(AppError::Config("ui.page_size must be at least 1".to_string()));
        }
        validate_evm_address(&self.fees.recipient)
            .map_err(|_| AppError::Config("fees.recipient is not a valid address".to_string()))?;
        if self.sdk.timeout_secs == 0 {
            return Err(AppError::Config("sdk.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}
