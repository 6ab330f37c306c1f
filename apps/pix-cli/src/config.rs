//! # Merchant Configuration
//!
//! Who receives the donations and which salt guards their receipts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PIX_KEY=streamer@pix.com                                           │
//! │     PIX_MERCHANT_NAME="Streamer Gente Fina"                            │
//! │     PIX_MERCHANT_CITY="São Paulo"                                      │
//! │     PIX_VALIDATION_SALT=...                                            │
//! │                                                                         │
//! │  2. TOML Config File (--config pix.toml)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No pix key: loading fails                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pix.toml
//! pix_key = "streamer@pix.com"
//! merchant_name = "Streamer Gente Fina"
//! merchant_city = "São Paulo"
//! validation_salt = "change-me-in-production"
//! ```

use std::path::{Path, PathBuf};

use pix_core::validation::validate_merchant;
use pix_core::{Merchant, DEFAULT_VALIDATION_SALT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const ENV_PIX_KEY: &str = "PIX_KEY";
pub const ENV_MERCHANT_NAME: &str = "PIX_MERCHANT_NAME";
pub const ENV_MERCHANT_CITY: &str = "PIX_MERCHANT_CITY";
pub const ENV_VALIDATION_SALT: &str = "PIX_VALIDATION_SALT";

/// Merchant settings for the donation commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantConfig {
    /// PIX key donations are sent to. Required.
    pub pix_key: String,

    /// Receiver name shown in the payer's banking app.
    pub merchant_name: String,

    /// Receiver city.
    pub merchant_city: String,

    /// Secret mixed into the integrity hash.
    pub validation_salt: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        MerchantConfig {
            pix_key: String::new(),
            merchant_name: "Nome nao definido".to_string(),
            merchant_city: "Cidade nao definida".to_string(),
            validation_salt: DEFAULT_VALIDATION_SALT.to_string(),
        }
    }
}

impl MerchantConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, when `config_path` is given
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |name| std::env::var(name).ok())
    }

    /// [`MerchantConfig::load`] with an explicit variable lookup.
    pub fn load_with(
        config_path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        if config.validation_salt == DEFAULT_VALIDATION_SALT {
            warn!(
                "Using the default validation salt; set {} before going live",
                ENV_VALIDATION_SALT
            );
        }

        info!(
            merchant = %config.merchant_name,
            city = %config.merchant_city,
            "Merchant configuration loaded"
        );
        Ok(config)
    }

    /// Reads a TOML file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(?path, "Loading merchant config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies environment overrides; blank values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var(ENV_PIX_KEY) {
            debug!("Overriding pix key from environment");
            self.pix_key = key;
        }

        if let Some(name) = var(ENV_MERCHANT_NAME) {
            self.merchant_name = name;
        }

        if let Some(city) = var(ENV_MERCHANT_CITY) {
            self.merchant_city = city;
        }

        if let Some(salt) = var(ENV_VALIDATION_SALT) {
            self.validation_salt = salt;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pix_key.trim().is_empty() {
            return Err(ConfigError::MissingRequired(format!(
                "pix key (set {ENV_PIX_KEY} or pix_key in the config file)"
            )));
        }

        if self.validation_salt.is_empty() {
            return Err(ConfigError::MissingRequired("validation salt".to_string()));
        }

        validate_merchant(&self.merchant())
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    pub fn merchant(&self) -> Merchant {
        Merchant::new(&self.pix_key, &self.merchant_name, &self.merchant_city)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
