//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CARTKEEPER_DATA_FILE` - Storage file for the file backend (default: `.cartkeeper/storage.json`)
//! - `CARTKEEPER_CART_KEY` - Slot holding the cart (default: `shoppingCart`)
//! - `CARTKEEPER_THEME_KEY` - Slot holding the theme preference (default: `theme`)
//! - `CARTKEEPER_CURRENCY` - ISO 4217 display currency (default: `USD`)

use std::path::PathBuf;

use thiserror::Error;

use cartkeeper_core::CurrencyCode;

use crate::storage::keys;

/// Default location of the storage file.
pub const DEFAULT_DATA_FILE: &str = ".cartkeeper/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Storage file for the file backend
    pub data_file: PathBuf,
    /// Slot holding the serialized cart
    pub cart_key: String,
    /// Slot holding the theme preference
    pub theme_key: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            cart_key: keys::CART.to_string(),
            theme_key: keys::THEME.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_file = lookup("CARTKEEPER_DATA_FILE")
            .map_or(defaults.data_file, PathBuf::from);
        if data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CARTKEEPER_DATA_FILE".to_string(),
                "path cannot be empty".to_string(),
            ));
        }

        let cart_key = get_slot_name(&lookup, "CARTKEEPER_CART_KEY", defaults.cart_key)?;
        let theme_key = get_slot_name(&lookup, "CARTKEEPER_THEME_KEY", defaults.theme_key)?;
        if cart_key == theme_key {
            return Err(ConfigError::InvalidEnvVar(
                "CARTKEEPER_THEME_KEY".to_string(),
                "must differ from CARTKEEPER_CART_KEY".to_string(),
            ));
        }

        let currency = match lookup("CARTKEEPER_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("CARTKEEPER_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        Ok(Self {
            data_file,
            cart_key,
            theme_key,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a storage slot name, rejecting blank values.
fn get_slot_name(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "slot name cannot be empty".to_string(),
        )),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}
