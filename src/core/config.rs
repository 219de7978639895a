//! Supply simulation configuration with documented constants
//!
//! All balance numbers for the supply phase are collected here with notes on
//! how they interact. Defaults reproduce the shipped game balance.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{Result, SupplyError};

/// Configuration for the supply engine
///
/// Changing these values affects how quickly cut-off units collapse and how
/// fast a reconnected unit recovers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyConfig {
    // === SUPPLY VALUE ===
    /// Upper clamp for a unit's supply value
    pub max_supply: u32,

    /// Supply assumed for a unit that has never had a value recorded
    pub default_supply: u32,

    /// Supply gained per turn while connected to a source
    ///
    /// At 40, a unit at 60 or above is back to full after a single turn.
    pub resupply_amount: u32,

    /// Supply lost per turn while disconnected
    ///
    /// At 15, a full unit falls below the cut-off override in 4 turns.
    pub consumption_per_turn: u32,

    // === STATUS THRESHOLDS ===
    /// Minimum supply for FULL
    pub full_threshold: u32,

    /// Minimum supply for ADEQUATE
    pub adequate_threshold: u32,

    /// Minimum supply for LOW
    pub low_threshold: u32,

    /// Minimum supply for CRITICAL (anything lower is CUT_OFF)
    pub critical_threshold: u32,

    /// A disconnected unit below this value is CUT_OFF regardless of thresholds
    ///
    /// Sits inside the LOW band, so a disconnected unit at 45 is CUT_OFF while
    /// a connected one is LOW.
    pub cut_off_override_below: u32,

    // === PARALLELIZATION ===
    /// Minimum unit count before the turn phase runs on rayon
    pub parallel_threshold: usize,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            max_supply: 100,
            default_supply: 100,
            resupply_amount: 40,
            consumption_per_turn: 15,

            // Descending: FULL > ADEQUATE > LOW > CRITICAL
            full_threshold: 80,
            adequate_threshold: 60,
            low_threshold: 40,
            critical_threshold: 20,
            cut_off_override_below: 50,

            parallel_threshold: 1024,
        }
    }
}

impl SupplyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SupplyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_supply == 0 {
            return Err(SupplyError::InvalidConfig("max_supply must be positive".into()));
        }

        if self.default_supply > self.max_supply {
            return Err(SupplyError::InvalidConfig(format!(
                "default_supply ({}) exceeds max_supply ({})",
                self.default_supply, self.max_supply
            )));
        }

        if self.resupply_amount == 0 || self.consumption_per_turn == 0 {
            return Err(SupplyError::InvalidConfig(
                "resupply_amount and consumption_per_turn must be positive".into(),
            ));
        }

        if self.full_threshold > self.max_supply {
            return Err(SupplyError::InvalidConfig(format!(
                "full_threshold ({}) exceeds max_supply ({})",
                self.full_threshold, self.max_supply
            )));
        }

        // Thresholds should be strictly ordered
        let thresholds = [
            self.full_threshold,
            self.adequate_threshold,
            self.low_threshold,
            self.critical_threshold,
        ];
        if thresholds.windows(2).any(|w| w[0] <= w[1]) {
            return Err(SupplyError::InvalidConfig(format!(
                "status thresholds must strictly descend: {} > {} > {} > {}",
                self.full_threshold,
                self.adequate_threshold,
                self.low_threshold,
                self.critical_threshold
            )));
        }

        if self.cut_off_override_below > self.max_supply {
            return Err(SupplyError::InvalidConfig(format!(
                "cut_off_override_below ({}) exceeds max_supply ({})",
                self.cut_off_override_below, self.max_supply
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SupplyConfig> = OnceLock::new();

/// Get the global supply config (initializes with defaults if not set)
pub fn config() -> &'static SupplyConfig {
    CONFIG.get_or_init(SupplyConfig::default)
}

/// Set the global supply config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SupplyConfig) -> std::result::Result<(), SupplyConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SupplyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_balance_values() {
        let config = SupplyConfig::default();
        assert_eq!(config.max_supply, 100);
        assert_eq!(config.resupply_amount, 40);
        assert_eq!(config.consumption_per_turn, 15);
        assert_eq!(config.cut_off_override_below, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SupplyConfig::from_toml_str("resupply_amount = 25\n").unwrap();
        assert_eq!(config.resupply_amount, 25);
        assert_eq!(config.consumption_per_turn, 15);
        assert_eq!(config.full_threshold, 80);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let result = SupplyConfig::from_toml_str("adequate_threshold = 85\n");
        assert!(matches!(result, Err(SupplyError::InvalidConfig(_))));
    }

    #[test]
    fn test_threshold_above_max_rejected() {
        let config = SupplyConfig {
            full_threshold: 101,
            ..SupplyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_supply_at_u32_max_validates() {
        let config = SupplyConfig::from_toml_str("max_supply = 4294967295\n").unwrap();
        assert_eq!(config.max_supply, u32::MAX);
    }

    #[test]
    fn test_full_threshold_above_huge_max_rejected() {
        let config = SupplyConfig {
            max_supply: u32::MAX - 1,
            full_threshold: u32::MAX,
            ..SupplyConfig::default()
        };
        assert!(matches!(config.validate(), Err(SupplyError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_consumption_rejected() {
        let config = SupplyConfig {
            consumption_per_turn: 0,
            ..SupplyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = SupplyConfig::from_toml_str("resupply_amount = \"lots\"");
        assert!(matches!(result, Err(SupplyError::TomlError(_))));
    }
}
