//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory for the on-disk store
//!   (default: `<local data dir>/go-marketplace`)
//! - `CART_STORAGE_KEY` - Record key for the cart (default: `@GoMarketplace:products`)

use std::path::PathBuf;

use thiserror::Error;

use crate::store::DEFAULT_STORAGE_KEY;

const STORAGE_DIR_VAR: &str = "CART_STORAGE_DIR";
const STORAGE_KEY_VAR: &str = "CART_STORAGE_KEY";
const APP_DIR_NAME: &str = "go-marketplace";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding the persisted cart record
    pub storage_dir: PathBuf,
    /// Key the cart record is stored under
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = match lookup(STORAGE_DIR_VAR) {
            Some(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    STORAGE_DIR_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(dir) => PathBuf::from(dir),
            None => default_storage_dir(),
        };

        let storage_key = match lookup(STORAGE_KEY_VAR) {
            Some(key) if key.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    STORAGE_KEY_VAR.to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => DEFAULT_STORAGE_KEY.to_string(),
        };

        Ok(Self {
            storage_dir,
            storage_key,
        })
    }
}

/// Platform local data directory, or `./.go-marketplace` when there is none.
fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(format!(".{APP_DIR_NAME}")),
        |dir| dir.join(APP_DIR_NAME),
    )
}
