//! # Desk Configuration
//!
//! Settings for the desk host: business details, estimate numbering and
//! the editor frame.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (highest)
//! 2. Config file (`desk.toml`, or the path given with `--config`)
//! 3. Default values (lowest)
//!
//! ## Example Config File
//! ```toml
//! [business]
//! name = "Acme Traders"
//! currency_symbol = "₹"
//! default_tax_rate = 18
//!
//! [estimate]
//! prefix = "EST"
//! next_number = 1
//! terms = "Payment is due within 30 days from the date of invoice."
//!
//! [editor]
//! frame_height = 560
//! ```
//!
//! ## Environment Variables
//! - `TALLY_BUSINESS_NAME` - Business name printed on summaries
//! - `TALLY_CURRENCY_SYMBOL` - Display currency symbol
//! - `TALLY_DEFAULT_TAX` - Default global tax (whole percent)
//! - `TALLY_ESTIMATE_PREFIX` - Estimate number prefix

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::validation::{validate_estimate_prefix, validate_percentage};
use tally_core::{CatalogItem, Percent, DEFAULT_GLOBAL_TAX_PERCENT};
use tally_editor::config::DEFAULT_FRAME_HEIGHT;
use tally_editor::EditorConfig;
use tracing::{debug, info, warn};

use crate::error::{DeskError, DeskResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "desk.toml";

// =============================================================================
// Desk Configuration
// =============================================================================

/// Complete desk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeskConfig {
    /// Business details shown on estimate summaries.
    #[serde(default)]
    pub business: BusinessSettings,

    /// Estimate numbering and terms.
    #[serde(default)]
    pub estimate: EstimateSettings,

    /// Editor frame settings.
    #[serde(default)]
    pub editor: EditorSettings,
}

/// Business details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSettings {
    #[serde(default = "default_business_name")]
    pub name: String,

    /// Display-only currency symbol.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Global tax applied to a fresh or cleared estimate (whole percent).
    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: u32,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            name: default_business_name(),
            currency_symbol: default_currency_symbol(),
            default_tax_rate: default_tax_rate(),
        }
    }
}

/// Estimate numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSettings {
    /// Number prefix, e.g. `EST` for `EST-0001`.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// First number issued by this desk run.
    #[serde(default = "default_next_number")]
    pub next_number: u32,

    /// Terms printed under each estimate summary.
    #[serde(default = "default_terms")]
    pub terms: String,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            next_number: default_next_number(),
            terms: default_terms(),
        }
    }
}

/// Editor frame settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Height announced by the editor on mount.
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            frame_height: default_frame_height(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_business_name() -> String {
    "Your Business Name".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_tax_rate() -> u32 {
    DEFAULT_GLOBAL_TAX_PERCENT
}

fn default_prefix() -> String {
    "EST".to_string()
}

fn default_next_number() -> u32 {
    1
}

fn default_terms() -> String {
    "Payment is due within 30 days from the date of invoice.".to_string()
}

fn default_frame_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl DeskConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Override with the config file (if it exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> DeskResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading desk config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> DeskResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DeskError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| DeskError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DeskResult<()> {
        validate_estimate_prefix(&self.estimate.prefix)?;
        validate_percentage("default tax rate", self.business.default_tax_rate)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a variable lookup.
    ///
    /// Unparseable numbers are ignored, keeping the file or default value.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TALLY_BUSINESS_NAME") {
            self.business.name = name;
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.business.currency_symbol = symbol;
        }

        if let Some(tax) = lookup("TALLY_DEFAULT_TAX") {
            match tax.trim().parse::<u32>() {
                Ok(rate) => {
                    debug!(rate, "Overriding default tax from environment");
                    self.business.default_tax_rate = rate;
                }
                Err(_) => warn!(value = %tax, "Ignoring unparseable TALLY_DEFAULT_TAX"),
            }
        }

        if let Some(prefix) = lookup("TALLY_ESTIMATE_PREFIX") {
            debug!(prefix = %prefix, "Overriding estimate prefix from environment");
            self.estimate.prefix = prefix;
        }
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "desk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the editor configuration for this desk.
    pub fn editor_config(&self, inventory: Vec<CatalogItem>) -> EditorConfig {
        EditorConfig::default()
            .with_currency_symbol(self.business.currency_symbol.clone())
            .with_default_global_tax(Percent::from_whole(self.business.default_tax_rate))
            .with_inventory(inventory)
            .with_frame_height(self.editor.frame_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = DeskConfig::default();
        assert_eq!(config.business.name, "Your Business Name");
        assert_eq!(config.business.currency_symbol, "₹");
        assert_eq!(config.business.default_tax_rate, 18);
        assert_eq!(config.estimate.prefix, "EST");
        assert_eq!(config.estimate.next_number, 1);
        assert_eq!(config.editor.frame_height, 560);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_dir, path) = write_config(
            r#"
[business]
name = "Acme Traders"

[estimate]
next_number = 42
"#,
        );

        let config = DeskConfig::read_file(&path).unwrap();
        assert_eq!(config.business.name, "Acme Traders");
        assert_eq!(config.business.currency_symbol, "₹");
        assert_eq!(config.estimate.next_number, 42);
        assert_eq!(config.estimate.prefix, "EST");
        assert_eq!(config.editor, EditorSettings::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let (_dir, path) = write_config("[business\nname = ");
        let err = DeskConfig::read_file(&path).unwrap_err();
        assert!(matches!(err, DeskError::Config { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = DeskConfig::default();
        config.estimate.prefix = "EST 24".into();
        assert!(config.validate().is_err());

        let mut config = DeskConfig::default();
        config.business.default_tax_rate = 101;
        assert!(matches!(config.validate(), Err(DeskError::Validation(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TALLY_CURRENCY_SYMBOL", "$"),
            ("TALLY_DEFAULT_TAX", "5"),
            ("TALLY_ESTIMATE_PREFIX", "Q"),
        ]
        .into_iter()
        .collect();

        let mut config = DeskConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.business.currency_symbol, "$");
        assert_eq!(config.business.default_tax_rate, 5);
        assert_eq!(config.estimate.prefix, "Q");
        assert_eq!(config.business.name, "Your Business Name");
    }

    #[test]
    fn test_unparseable_tax_override_is_ignored() {
        let mut config = DeskConfig::default();
        config.apply_overrides(|key| (key == "TALLY_DEFAULT_TAX").then(|| "lots".to_string()));
        assert_eq!(config.business.default_tax_rate, 18);
    }

    #[test]
    fn test_editor_config() {
        let mut config = DeskConfig::default();
        config.business.currency_symbol = "$".into();
        config.business.default_tax_rate = 5;
        config.editor.frame_height = 400;

        let editor = config.editor_config(Vec::new());
        assert_eq!(editor.currency_symbol, "$");
        assert_eq!(editor.default_global_tax, Percent::from_whole(5));
        assert_eq!(editor.frame_height, 400);
        assert!(editor.inventory.is_empty());
    }
}
