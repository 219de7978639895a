//! Scenario files for headless supply runs
//!
//! A scenario is a snapshot of everything one team's supply phase needs:
//! map bounds, the unit roster, supply sources and enemy positions. Files are
//! JSON or TOML, picked by extension.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::source::{SupplyNetwork, SupplySource, SupplySourceType};
use super::status::SupplyUnit;
use crate::core::error::{Result, SupplyError};
use crate::core::types::{MapBounds, Position, TeamId};

/// Source entry as written in a scenario file (id assigned on load)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    #[serde(rename = "type")]
    pub kind: SupplySourceType,
    pub position: Position,
    pub team: TeamId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScenarioFile {
    map: MapBounds,
    #[serde(default)]
    units: Vec<SupplyUnit>,
    #[serde(default)]
    sources: Vec<SourceSpec>,
    #[serde(default)]
    enemies: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub bounds: MapBounds,
    pub units: Vec<SupplyUnit>,
    pub network: SupplyNetwork,
    pub enemies: Vec<Position>,
}

impl Scenario {
    /// Load a `.json` or `.toml` scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            other => Err(SupplyError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: ScenarioFile = serde_json::from_str(contents)?;
        Ok(Self::from_file(file))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ScenarioFile = toml::from_str(contents)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: ScenarioFile) -> Self {
        let mut network = SupplyNetwork::new();
        for spec in file.sources {
            network.add(SupplySource::new(spec.kind, spec.position, spec.team));
        }

        let scenario = Self {
            bounds: file.map,
            units: file.units,
            network,
            enemies: file.enemies,
        };
        scenario.warn_out_of_bounds();
        scenario
    }

    /// Serialize back to the file layout (source ids are not persisted)
    pub fn to_json_string(&self) -> Result<String> {
        let file = ScenarioFile {
            map: self.bounds,
            units: self.units.clone(),
            sources: self
                .network
                .iter()
                .map(|s| SourceSpec {
                    kind: s.kind,
                    position: s.position,
                    team: s.team.clone(),
                })
                .collect(),
            enemies: self.enemies.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Deterministic random scenario for a single team
    pub fn generate(
        seed: u64,
        bounds: MapBounds,
        unit_count: usize,
        source_count: usize,
        enemy_count: usize,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let team = TeamId::new("allies");

        let random_position = |rng: &mut ChaCha8Rng| {
            Position::new(
                rng.gen_range(0..bounds.width.max(1)) as i32,
                rng.gen_range(0..bounds.height.max(1)) as i32,
            )
        };

        let units = (0..unit_count)
            .map(|i| {
                SupplyUnit::new(format!("unit_{}", i + 1), random_position(&mut rng))
                    .with_supply(rng.gen_range(0..=100))
            })
            .collect();

        let mut network = SupplyNetwork::new();
        for _ in 0..source_count {
            let kind = SupplySourceType::ALL[rng.gen_range(0..SupplySourceType::ALL.len())];
            let position = random_position(&mut rng);
            network.create_source(kind, position, team.clone());
        }

        let enemies = (0..enemy_count).map(|_| random_position(&mut rng)).collect();

        Self {
            bounds,
            units,
            network,
            enemies,
        }
    }

    fn warn_out_of_bounds(&self) {
        for unit in &self.units {
            if !self.bounds.contains(unit.position) {
                tracing::warn!("Unit {} at {} is outside the map", unit.id, unit.position);
            }
        }
        for source in self.network.iter() {
            if !self.bounds.contains(source.position) {
                tracing::warn!("{} at {} is outside the map", source.kind, source.position);
            }
        }
        for enemy in &self.enemies {
            if !self.bounds.contains(*enemy) {
                tracing::warn!("Enemy at {} is outside the map", enemy);
            }
        }
    }
}
