//! Supply status classification
//!
//! Status is never stored; it is recomputed from the unit's supply value and
//! whether it can reach a source this turn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reachability::{find_nearest_with_occupancy, EnemyOccupancy};
use super::source::SupplySource;
use crate::core::config::{config, SupplyConfig};
use crate::core::error::SupplyError;
use crate::core::types::{MapBounds, Position, UnitId};

/// Supply tier, ordered by severity (`CutOff < Critical < ... < Full`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyStatus {
    CutOff,
    Critical,
    Low,
    Adequate,
    Full,
}

impl SupplyStatus {
    pub const ALL: [SupplyStatus; 5] = [
        SupplyStatus::Full,
        SupplyStatus::Adequate,
        SupplyStatus::Low,
        SupplyStatus::Critical,
        SupplyStatus::CutOff,
    ];

    /// Threshold-only tier for a supply value (no connectivity override)
    pub fn from_supply(supply: u32, config: &SupplyConfig) -> Self {
        if supply >= config.full_threshold {
            SupplyStatus::Full
        } else if supply >= config.adequate_threshold {
            SupplyStatus::Adequate
        } else if supply >= config.low_threshold {
            SupplyStatus::Low
        } else if supply >= config.critical_threshold {
            SupplyStatus::Critical
        } else {
            SupplyStatus::CutOff
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyStatus::Full => "FULL",
            SupplyStatus::Adequate => "ADEQUATE",
            SupplyStatus::Low => "LOW",
            SupplyStatus::Critical => "CRITICAL",
            SupplyStatus::CutOff => "CUT_OFF",
        }
    }
}

impl fmt::Display for SupplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SupplyStatus {
    type Err = SupplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SupplyError::UnknownStatus(s.to_string()))
    }
}

/// What the engine needs to know about a unit.
///
/// Implement this for the game's own unit type; [`SupplyUnit`] is the plain
/// record used by scenarios and tests.
pub trait SupplyConsumer {
    fn unit_id(&self) -> &UnitId;
    fn position(&self) -> Position;
    /// Stored supply, `None` if the unit has never had one recorded
    fn supply(&self) -> Option<u32>;
}

/// Minimal unit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyUnit {
    pub id: UnitId,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<u32>,
}

impl SupplyUnit {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: UnitId::new(id),
            position,
            supply: None,
        }
    }

    pub fn with_supply(mut self, supply: u32) -> Self {
        self.supply = Some(supply);
        self
    }
}

impl SupplyConsumer for SupplyUnit {
    fn unit_id(&self) -> &UnitId {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn supply(&self) -> Option<u32> {
        self.supply
    }
}

/// Classification result for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyReport {
    pub status: SupplyStatus,
    pub current_supply: u32,
    pub in_supply: bool,
    pub supply_source: Option<SupplySource>,
}

/// Classify a unit against the global config
pub fn calculate_supply_status<U: SupplyConsumer + ?Sized>(
    unit: &U,
    supply_sources: &[SupplySource],
    enemy_positions: &[Position],
    bounds: MapBounds,
) -> SupplyReport {
    let enemies = EnemyOccupancy::new(enemy_positions);
    calculate_supply_status_with(unit, supply_sources, &enemies, bounds, config())
}

/// Classify a unit with an explicit config and prebuilt enemy occupancy
pub fn calculate_supply_status_with<U: SupplyConsumer + ?Sized>(
    unit: &U,
    supply_sources: &[SupplySource],
    enemies: &EnemyOccupancy,
    bounds: MapBounds,
    config: &SupplyConfig,
) -> SupplyReport {
    let current_supply = unit.supply().unwrap_or(config.default_supply);

    let source = find_nearest_with_occupancy(unit.position(), supply_sources, enemies, bounds);
    let in_supply = source.is_some();

    let status = classify(current_supply, in_supply, config);

    SupplyReport {
        status,
        current_supply,
        in_supply,
        supply_source: source.cloned(),
    }
}

/// Threshold tier, forced to CUT_OFF for a disconnected unit below the override
pub fn classify(current_supply: u32, in_supply: bool, config: &SupplyConfig) -> SupplyStatus {
    if !in_supply && current_supply < config.cut_off_override_below {
        return SupplyStatus::CutOff;
    }
    SupplyStatus::from_supply(current_supply, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;
    use crate::supply::source::SupplySourceType;

    fn hq(x: i32, y: i32) -> SupplySource {
        SupplySource::new(SupplySourceType::Hq, Position::new(x, y), TeamId::new("allies"))
    }

    #[test]
    fn test_threshold_table() {
        let config = SupplyConfig::default();
        assert_eq!(SupplyStatus::from_supply(100, &config), SupplyStatus::Full);
        assert_eq!(SupplyStatus::from_supply(80, &config), SupplyStatus::Full);
        assert_eq!(SupplyStatus::from_supply(79, &config), SupplyStatus::Adequate);
        assert_eq!(SupplyStatus::from_supply(60, &config), SupplyStatus::Adequate);
        assert_eq!(SupplyStatus::from_supply(59, &config), SupplyStatus::Low);
        assert_eq!(SupplyStatus::from_supply(40, &config), SupplyStatus::Low);
        assert_eq!(SupplyStatus::from_supply(39, &config), SupplyStatus::Critical);
        assert_eq!(SupplyStatus::from_supply(20, &config), SupplyStatus::Critical);
        assert_eq!(SupplyStatus::from_supply(19, &config), SupplyStatus::CutOff);
        assert_eq!(SupplyStatus::from_supply(0, &config), SupplyStatus::CutOff);
    }

    #[test]
    fn test_override_only_when_disconnected() {
        let config = SupplyConfig::default();
        assert_eq!(classify(45, false, &config), SupplyStatus::CutOff);
        assert_eq!(classify(45, true, &config), SupplyStatus::Low);
        assert_eq!(classify(25, false, &config), SupplyStatus::CutOff);
        assert_eq!(classify(25, true, &config), SupplyStatus::Critical);
    }

    #[test]
    fn test_override_boundary_at_fifty() {
        let config = SupplyConfig::default();
        assert_eq!(classify(50, false, &config), SupplyStatus::Low);
        assert_eq!(classify(49, false, &config), SupplyStatus::CutOff);
    }

    #[test]
    fn test_status_ordering() {
        assert!(SupplyStatus::Full > SupplyStatus::Adequate);
        assert!(SupplyStatus::Adequate > SupplyStatus::Low);
        assert!(SupplyStatus::Low > SupplyStatus::Critical);
        assert!(SupplyStatus::Critical > SupplyStatus::CutOff);
    }

    #[test]
    fn test_status_names_round_trip() {
        for status in SupplyStatus::ALL {
            assert_eq!(status.as_str().parse::<SupplyStatus>().unwrap(), status);
        }
        assert_eq!(serde_json::to_string(&SupplyStatus::CutOff).unwrap(), "\"CUT_OFF\"");
    }

    #[test]
    fn test_missing_supply_defaults_to_full() {
        let unit = SupplyUnit::new("u1", Position::new(0, 0));
        let report = calculate_supply_status(&unit, &[], &[], MapBounds::new(10, 10));
        assert_eq!(report.current_supply, 100);
        assert!(!report.in_supply);
        assert_eq!(report.status, SupplyStatus::Full);
    }

    #[test]
    fn test_report_carries_source() {
        let unit = SupplyUnit::new("u1", Position::new(0, 0)).with_supply(100);
        let sources = vec![hq(5, 0)];
        let report = calculate_supply_status(&unit, &sources, &[], MapBounds::new(20, 20));
        assert!(report.in_supply);
        assert_eq!(report.status, SupplyStatus::Full);
        assert_eq!(report.supply_source.map(|s| s.id), Some(sources[0].id));
    }

    #[test]
    fn test_classification_does_not_touch_unit() {
        let unit = SupplyUnit::new("u1", Position::new(0, 0));
        let _ = calculate_supply_status(&unit, &[hq(1, 1)], &[], MapBounds::new(5, 5));
        assert_eq!(unit.supply, None);
    }
}
