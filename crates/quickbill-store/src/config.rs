//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUICKBILL_STORE_NAME="Corner Kirana"                               │
//! │     QUICKBILL_LOW_STOCK_THRESHOLD=10                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/quickbill/quickbill.toml (Linux)                         │
//! │     ~/Library/Application Support/com.quickbill.pos/quickbill.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Kirana"
//! currency_symbol = "₹"
//!
//! [inventory]
//! low_stock_threshold = 10
//! stock_step = 5
//!
//! [checkout]
//! enforce_stock_on_commit = true
//! require_cash_tender = true
//!
//! [dashboard]
//! recent_flow_len = 10
//! ```

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use quickbill_core::{Money, CURRENCY_SYMBOL};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Sections
// =============================================================================

/// Inventory view settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Products with fewer units than this are flagged as low stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    /// Step used by the manual ± stock controls.
    #[serde(default = "default_stock_step")]
    pub stock_step: i64,
}

fn default_low_stock_threshold() -> i64 {
    10
}

fn default_stock_step() -> i64 {
    5
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            low_stock_threshold: default_low_stock_threshold(),
            stock_step: default_stock_step(),
        }
    }
}

/// Rules applied when a sale is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Reject a commit whose quantities exceed current stock.
    ///
    /// With this off, stock may go negative (matches a single-operator
    /// till where the cart UI is the only guard).
    #[serde(default = "default_true")]
    pub enforce_stock_on_commit: bool,

    /// Reject a cash commit whose tender is below the payable amount.
    #[serde(default = "default_true")]
    pub require_cash_tender: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            enforce_stock_on_commit: true,
            require_cash_tender: true,
        }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Number of sales shown in the transaction-flow chart.
    #[serde(default = "default_recent_flow_len")]
    pub recent_flow_len: usize,
}

fn default_recent_flow_len() -> usize {
    10
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            recent_flow_len: default_recent_flow_len(),
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown in the header and the demo output.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Prefix used by [`StoreConfig::format_currency`].
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub inventory: InventorySettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

fn default_store_name() -> String {
    "QuickBill Store".to_string()
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            inventory: InventorySettings::default(),
            checkout: CheckoutSettings::default(),
            dashboard: DashboardSettings::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quickbill.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`StoreConfig::load`] with the environment supplied by `env`.
    fn load_with<F>(config_path: Option<PathBuf>, env: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying environment overrides.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(StoreError::InvalidConfig("store_name must not be empty".into()));
        }

        if self.inventory.stock_step <= 0 {
            return Err(StoreError::InvalidConfig(
                "inventory.stock_step must be greater than 0".into(),
            ));
        }

        if self.inventory.low_stock_threshold < 0 {
            return Err(StoreError::InvalidConfig(
                "inventory.low_stock_threshold must not be negative".into(),
            ));
        }

        if self.dashboard.recent_flow_len == 0 {
            return Err(StoreError::InvalidConfig(
                "dashboard.recent_flow_len must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `QUICKBILL_*` environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env("QUICKBILL_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(symbol) = env("QUICKBILL_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(threshold) = env("QUICKBILL_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.inventory.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring invalid QUICKBILL_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(step) = env("QUICKBILL_STOCK_STEP") {
            match step.parse::<i64>() {
                Ok(s) => self.inventory.stock_step = s,
                Err(_) => warn!(value = %step, "Ignoring invalid QUICKBILL_STOCK_STEP"),
            }
        }

        if let Some(flag) = env("QUICKBILL_ENFORCE_STOCK") {
            match parse_flag(&flag) {
                Some(on) => self.checkout.enforce_stock_on_commit = on,
                None => warn!(value = %flag, "Ignoring invalid QUICKBILL_ENFORCE_STOCK"),
            }
        }

        if let Some(flag) = env("QUICKBILL_REQUIRE_CASH_TENDER") {
            match parse_flag(&flag) {
                Some(on) => self.checkout.require_cash_tender = on,
                None => warn!(value = %flag, "Ignoring invalid QUICKBILL_REQUIRE_CASH_TENDER"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quickbill", "pos")
            .map(|dirs| dirs.config_dir().join("quickbill.toml"))
    }

    /// Formats an amount with the configured symbol and two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::Money;
    /// use quickbill_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(9432)), "₹94.32");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let shown = amount
            .amount()
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!(
            "{}{}{:.2}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            shown
        )
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.inventory.low_stock_threshold, 10);
        assert_eq!(config.inventory.stock_step, 5);
        assert_eq!(config.dashboard.recent_flow_len, 10);
        assert!(config.checkout.enforce_stock_on_commit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        config.inventory.stock_step = 0;
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = StoreConfig::default();
        config.store_name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            store_name = "Corner Kirana"

            [checkout]
            enforce_stock_on_commit = false
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Kirana");
        assert!(!config.checkout.enforce_stock_on_commit);
        assert!(config.checkout.require_cash_tender);
        assert_eq!(config.inventory.stock_step, 5);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quickbill.toml");

        let mut config = StoreConfig::default();
        config.store_name = "Test Till".into();
        config.inventory.low_stock_threshold = 3;
        config.save(Some(path.clone())).unwrap();

        let loaded = StoreConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_toml_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickbill.toml");
        std::fs::write(&path, "store_name = [").unwrap();

        assert!(matches!(
            StoreConfig::from_file(&path),
            Err(StoreError::ConfigLoadFailed(_))
        ));
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("quickbill.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[dashboard]\nrecent_flow_len = 3\n");

        let config = StoreConfig::load(Some(path)).unwrap();
        assert_eq!(config.dashboard.recent_flow_len, 3);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[dashboard]\nrecent_flow_len = 0\n");

        assert!(matches!(
            StoreConfig::load(Some(path.clone())),
            Err(StoreError::InvalidConfig(_))
        ));

        let path = write_config(&dir, "[inventory]\nstock_step = 0\n");
        assert!(matches!(
            StoreConfig::load_with(Some(path), env_from(&[])),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_with(Some(dir.path().join("absent.toml")), env_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "store_name = \"From File\"\n[inventory]\nstock_step = 2\nlow_stock_threshold = 4\n",
        );

        let env = env_from(&[
            ("QUICKBILL_STORE_NAME", "From Env"),
            ("QUICKBILL_STOCK_STEP", "7"),
            ("QUICKBILL_ENFORCE_STOCK", "off"),
            ("QUICKBILL_LOW_STOCK_THRESHOLD", "lots"),
        ]);
        let config = StoreConfig::load_with(Some(path), env).unwrap();

        assert_eq!(config.store_name, "From Env");
        assert_eq!(config.inventory.stock_step, 7);
        assert!(!config.checkout.enforce_stock_on_commit);
        // Unparseable values are ignored; the file value stays.
        assert_eq!(config.inventory.low_stock_threshold, 4);
    }

    #[test]
    fn test_env_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "store_name = \"Till\"\n");

        let result = StoreConfig::load_with(Some(path), env_from(&[("QUICKBILL_STOCK_STEP", "0")]));
        assert!(matches!(result, Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_major(105)), "₹105.00");
        assert_eq!(config.format_currency(Money::from_minor(-550)), "-₹5.50");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
