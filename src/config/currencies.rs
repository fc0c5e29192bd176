//! Currency allow-list loading from config.toml
//!
//! This module loads the set of currency codes the ledger accepts from a TOML
//! configuration file. The loaded codes seed a
//! [`SupportedCurrencies`](crate::core::currency::SupportedCurrencies) registry;
//! when no configuration file exists, the registry's built-in default set is used.

use crate::core::currency::SupportedCurrencies;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Three-letter currency codes the ledger accepts
    pub currencies: Vec<String>,
}

/// Loads the currency configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Builds the currency registry from the default location (./config.toml),
/// falling back to the built-in currency set when the file does not exist.
pub fn load_supported_currencies() -> Result<SupportedCurrencies> {
    let path = Path::new("config.toml");
    if !path.exists() {
        return Ok(SupportedCurrencies::default());
    }

    let config = load_config(path)?;
    if config.currencies.is_empty() {
        return Err(Error::Config {
            message: "config.toml lists no currencies".to_string(),
        });
    }

    Ok(SupportedCurrencies::new(config.currencies))
}
