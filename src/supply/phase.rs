//! Turn-phase supply resolution
//!
//! Once per turn every unit is classified, then either resupplied (connected)
//! or consumes supply (disconnected). The phase returns one record per unit
//! and leaves the inputs untouched; the caller writes `new_supply` back and
//! applies any attrition damage to hit points.
//!
//! Units are independent, so large rosters are processed with rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::modifiers::SupplyModifiers;
use super::reachability::EnemyOccupancy;
use super::source::SupplySource;
use super::status::{calculate_supply_status_with, SupplyConsumer, SupplyStatus, SupplyUnit};
use crate::core::config::{config, SupplyConfig};
use crate::core::types::{MapBounds, Position, UnitId};

/// What happened to a unit's supply this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyEvent {
    Resupplied,
    Consumed,
    /// Consumed while cut off; the unit takes attrition damage
    Attrition,
}

/// Per-unit outcome of a supply phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub unit_id: UnitId,
    pub previous_supply: u32,
    pub new_supply: u32,
    pub status: SupplyStatus,
    pub in_supply: bool,
    pub event: SupplyEvent,
}

impl TurnResult {
    /// HP the caller should remove from the unit, if any
    pub fn attrition_damage(&self) -> Option<u32> {
        match self.event {
            SupplyEvent::Attrition => SupplyModifiers::for_status(self.status).attrition_damage,
            _ => None,
        }
    }

    /// Write the new supply value onto a unit record
    pub fn apply_to(&self, unit: &mut SupplyUnit) {
        unit.supply = Some(self.new_supply);
    }
}

/// Resolve a supply phase against the global config
pub fn process_supply_phase<U: SupplyConsumer + Sync>(
    units: &[U],
    supply_sources: &[SupplySource],
    enemy_positions: &[Position],
    bounds: MapBounds,
) -> Vec<TurnResult> {
    process_supply_phase_with(units, supply_sources, enemy_positions, bounds, config())
}

/// Resolve a supply phase with an explicit config.
///
/// Results are in input order whether or not the parallel path is taken.
pub fn process_supply_phase_with<U: SupplyConsumer + Sync>(
    units: &[U],
    supply_sources: &[SupplySource],
    enemy_positions: &[Position],
    bounds: MapBounds,
    config: &SupplyConfig,
) -> Vec<TurnResult> {
    let enemies = EnemyOccupancy::new(enemy_positions);
    let parallel = units.len() >= config.parallel_threshold;

    let results: Vec<TurnResult> = if parallel {
        units
            .par_iter()
            .map(|unit| resolve_unit(unit, supply_sources, &enemies, bounds, config))
            .collect()
    } else {
        units
            .iter()
            .map(|unit| resolve_unit(unit, supply_sources, &enemies, bounds, config))
            .collect()
    };

    let mut resupplied = 0;
    let mut consumed = 0;
    let mut attrition = 0;
    for result in &results {
        match result.event {
            SupplyEvent::Resupplied => resupplied += 1,
            SupplyEvent::Consumed => consumed += 1,
            SupplyEvent::Attrition => attrition += 1,
        }
    }
    tracing::info!(
        units = results.len(),
        resupplied,
        consumed,
        attrition,
        parallel,
        "Supply phase resolved"
    );

    results
}

fn resolve_unit<U: SupplyConsumer>(
    unit: &U,
    supply_sources: &[SupplySource],
    enemies: &EnemyOccupancy,
    bounds: MapBounds,
    config: &SupplyConfig,
) -> TurnResult {
    let report = calculate_supply_status_with(unit, supply_sources, enemies, bounds, config);
    let previous_supply = report.current_supply;

    let (new_supply, event) = if report.in_supply {
        let new_supply = previous_supply
            .saturating_add(config.resupply_amount)
            .min(config.max_supply);
        (new_supply, SupplyEvent::Resupplied)
    } else {
        let new_supply = previous_supply
            .saturating_sub(config.consumption_per_turn)
            .min(config.max_supply);
        let event = if SupplyModifiers::for_status(report.status)
            .attrition_damage
            .is_some()
        {
            SupplyEvent::Attrition
        } else {
            SupplyEvent::Consumed
        };
        (new_supply, event)
    };

    tracing::debug!(
        "Unit {} supply {} -> {} ({}, {:?})",
        unit.unit_id(),
        previous_supply,
        new_supply,
        report.status,
        event
    );

    TurnResult {
        unit_id: unit.unit_id().clone(),
        previous_supply,
        new_supply,
        status: report.status,
        in_supply: report.in_supply,
        event,
    }
}

/// Apply a batch of results to a roster, matching by unit id.
///
/// Returns the number of units updated.
pub fn apply_turn_results(units: &mut [SupplyUnit], results: &[TurnResult]) -> usize {
    let by_id: ahash::AHashMap<&UnitId, &TurnResult> =
        results.iter().map(|r| (&r.unit_id, r)).collect();

    let mut applied = 0;
    for unit in units.iter_mut() {
        if let Some(result) = by_id.get(&unit.id) {
            result.apply_to(unit);
            applied += 1;
        }
    }
    applied
}

/// Run several consecutive supply phases, applying each batch before the next
pub fn simulate_turns(
    units: &mut [SupplyUnit],
    supply_sources: &[SupplySource],
    enemy_positions: &[Position],
    bounds: MapBounds,
    turns: u32,
    config: &SupplyConfig,
) -> Vec<Vec<TurnResult>> {
    let mut history = Vec::with_capacity(turns as usize);
    for turn in 0..turns {
        let results =
            process_supply_phase_with(&*units, supply_sources, enemy_positions, bounds, config);
        apply_turn_results(units, &results);
        tracing::debug!("Supply turn {} complete", turn + 1);
        history.push(results);
    }
    history
}
