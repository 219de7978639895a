//! Supply-line simulation
//!
//! Units draw supply from sources in range along a path no enemy stands on.
//! Each turn the phase resolver resupplies connected units, drains cut-off
//! ones, and reports status so the combat layer can look up its modifiers.

pub mod modifiers;
pub mod phase;
pub mod reachability;
pub mod scenario;
pub mod source;
pub mod status;

pub use modifiers::{get_supply_modifiers, SupplyModifiers};
pub use phase::{
    apply_turn_results, process_supply_phase, process_supply_phase_with, simulate_turns,
    SupplyEvent, TurnResult,
};
pub use reachability::{find_nearest_supply_source, is_path_blocked, supply_path, EnemyOccupancy};
pub use scenario::{Scenario, SourceSpec};
pub use source::{SourceId, SupplyNetwork, SupplySource, SupplySourceType};
pub use status::{
    calculate_supply_status, calculate_supply_status_with, classify, SupplyConsumer,
    SupplyReport, SupplyStatus, SupplyUnit,
};
