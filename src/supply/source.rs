//! Supply sources and the ordered network that holds them
//!
//! A source projects supply over a fixed Manhattan radius determined by its
//! type. Sources are never consumed by the turn phase; capacity is carried
//! for callers that want to display or ration it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::error::SupplyError;
use crate::core::types::{Position, TeamId};

/// Unique identifier for a supply source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub Uuid);

impl SourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "supply_{}", self.0.simple())
    }
}

/// Kind of supply source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplySourceType {
    Hq,
    Depot,
    Truck,
    Trench,
    Airdrop,
}

impl SupplySourceType {
    pub const ALL: [SupplySourceType; 5] = [
        SupplySourceType::Hq,
        SupplySourceType::Depot,
        SupplySourceType::Truck,
        SupplySourceType::Trench,
        SupplySourceType::Airdrop,
    ];

    /// Supply radius in tiles (Manhattan)
    pub fn range(&self) -> u32 {
        match self {
            SupplySourceType::Hq => 10,
            SupplySourceType::Depot => 6,
            SupplySourceType::Truck => 4,
            SupplySourceType::Trench => 2,
            SupplySourceType::Airdrop => 3,
        }
    }

    /// Maximum throughput; `None` means unbounded
    pub fn capacity(&self) -> Option<u32> {
        match self {
            SupplySourceType::Hq => None,
            SupplySourceType::Depot => Some(500),
            SupplySourceType::Truck => Some(100),
            SupplySourceType::Trench => Some(50),
            SupplySourceType::Airdrop => Some(75),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplySourceType::Hq => "HQ",
            SupplySourceType::Depot => "DEPOT",
            SupplySourceType::Truck => "TRUCK",
            SupplySourceType::Trench => "TRENCH",
            SupplySourceType::Airdrop => "AIRDROP",
        }
    }
}

impl fmt::Display for SupplySourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SupplySourceType {
    type Err = SupplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SupplyError::UnknownSourceType(s.to_string()))
    }
}

/// A supply-providing entity on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplySource {
    pub id: SourceId,
    pub kind: SupplySourceType,
    pub position: Position,
    pub team: TeamId,
    pub range: u32,
    pub capacity: Option<u32>,
}

impl SupplySource {
    /// Create a source; range and capacity come from the type
    pub fn new(kind: SupplySourceType, position: Position, team: TeamId) -> Self {
        Self {
            id: SourceId::new(),
            kind,
            position,
            team,
            range: kind.range(),
            capacity: kind.capacity(),
        }
    }

    /// Move a mobile source (trucks, airdrops carried forward)
    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    pub fn is_unbounded(&self) -> bool {
        self.capacity.is_none()
    }
}

/// Ordered collection of supply sources.
///
/// Insertion order is kept; it decides ties between equidistant sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplyNetwork {
    sources: Vec<SupplySource>,
}

impl SupplyNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source and add it to the network
    pub fn create_source(
        &mut self,
        kind: SupplySourceType,
        position: Position,
        team: TeamId,
    ) -> SourceId {
        let source = SupplySource::new(kind, position, team);
        let id = source.id;
        self.sources.push(source);
        id
    }

    pub fn add(&mut self, source: SupplySource) {
        self.sources.push(source);
    }

    /// Remove a source (destroyed depot, spent airdrop)
    pub fn remove(&mut self, id: SourceId) -> Option<SupplySource> {
        let idx = self.sources.iter().position(|s| s.id == id)?;
        Some(self.sources.remove(idx))
    }

    pub fn get(&self, id: SourceId) -> Option<&SupplySource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut SupplySource> {
        self.sources.iter_mut().find(|s| s.id == id)
    }

    /// Sources owned by a team, in insertion order
    pub fn sources_for(&self, team: &TeamId) -> Vec<SupplySource> {
        self.sources
            .iter()
            .filter(|s| &s.team == team)
            .cloned()
            .collect()
    }

    pub fn sources(&self) -> &[SupplySource] {
        &self.sources
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupplySource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
