//! # Terminal Configuration
//!
//! Settings for the POS screen, read once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_STORE_NAME="Corner Shop"                                      │
//! │     TILL_LOG=debug                                                     │
//! │     TILL_SEED_CATALOG=false                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/till-pos/terminal.toml (Linux)                           │
//! │     ~/Library/Application Support/com.till.pos/terminal.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     demo catalog: Apple 1.00, Banana 0.50, Orange 0.80                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Corner Shop"
//!
//! [logging]
//! filter = "warn,till_core=debug"
//!
//! [catalog]
//! seed = true
//!
//! [[catalog.products]]
//! name = "Coffee"
//! price = "2.20"
//! ```
//!
//! Prices are strings so they reach the decimal parser exactly as written.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use till_core::{Catalog, DEMO_PRODUCTS};

use crate::error::{AppError, AppResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "terminal.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[store]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in the screen header.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Till POS".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` wins over this.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

/// One `[[catalog.products]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub price: String,
}

/// `[catalog]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Start with `products` in the catalog. When false the screen opens empty.
    #[serde(default = "default_true")]
    pub seed: bool,

    #[serde(default = "default_products")]
    pub products: Vec<ProductEntry>,
}

fn default_true() -> bool {
    true
}

fn default_products() -> Vec<ProductEntry> {
    DEMO_PRODUCTS
        .iter()
        .map(|&(name, cents)| ProductEntry {
            name: name.to_string(),
            price: till_core::Money::from_cents(cents).to_fixed(),
        })
        .collect()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            seed: true,
            products: default_products(),
        }
    }
}

// =============================================================================
// Terminal Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        debug!(?path, "Loading terminal config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "store.name must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        // Every seed product must be one the new-product form would accept.
        self.seed_catalog().map(|_| ())
    }

    /// Builds the catalog the session starts with.
    pub fn seed_catalog(&self) -> AppResult<Catalog> {
        if !self.catalog.seed {
            return Ok(Catalog::new());
        }

        Catalog::from_entries(
            self.catalog
                .products
                .iter()
                .map(|p| (p.name.as_str(), p.price.as_str())),
        )
        .map_err(|e| AppError::InvalidConfig(format!("catalog.products: {}", e)))
    }

    /// Applies `TILL_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TILL_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(filter) = lookup("TILL_LOG") {
            self.logging.filter = filter;
        }

        if let Some(seed) = lookup("TILL_SEED_CATALOG") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.catalog.seed = true,
                "0" | "false" | "no" => self.catalog.seed = false,
                _ => warn!(value = %seed, "Unknown TILL_SEED_CATALOG value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();
        assert_eq!(config.store.name, "Till POS");
        assert_eq!(config.logging.filter, "warn");
        assert!(config.catalog.seed);
        assert!(config.validate().is_ok());

        let catalog = config.seed_catalog().unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Apple", "Banana", "Orange"]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TerminalConfig::from_toml_str(
            r#"
            [store]
            name = "Corner Shop"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.logging, LoggingSettings::default());
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_custom_products() {
        let config = TerminalConfig::from_toml_str(
            r#"
            [[catalog.products]]
            name = "Coffee"
            price = "2.20"

            [[catalog.products]]
            name = "Bagel"
            price = "1.05"
            "#,
        )
        .unwrap();

        let catalog = config.seed_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[1].price.to_fixed(), "1.05");
    }

    #[test]
    fn test_invalid_product_fails_validation() {
        let config = TerminalConfig::from_toml_str(
            r#"
            [[catalog.products]]
            name = "Free lunch"
            price = "0"
            "#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_seed_disabled() {
        let config = TerminalConfig::from_toml_str("[catalog]\nseed = false\n").unwrap();
        assert!(config.seed_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_bad_toml() {
        let err = TerminalConfig::from_toml_str("[store\nname=").unwrap_err();
        assert!(matches!(err, AppError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TILL_STORE_NAME", "Night Market"),
            ("TILL_LOG", "debug"),
            ("TILL_SEED_CATALOG", "no"),
        ]
        .into_iter()
        .collect();

        let mut config = TerminalConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Night Market");
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.catalog.seed);
    }

    #[test]
    fn test_unknown_seed_value_is_ignored() {
        let mut config = TerminalConfig::default();
        config.apply_overrides(|key| (key == "TILL_SEED_CATALOG").then(|| "maybe".to_string()));
        assert!(config.catalog.seed);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/till/terminal.toml");
        assert!(matches!(
            TerminalConfig::load(Some(path)),
            Err(AppError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TerminalConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[store]"));
        assert_eq!(TerminalConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
