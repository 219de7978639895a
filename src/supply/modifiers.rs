//! Combat modifiers by supply status
//!
//! Multipliers applied by the combat layer to a unit's base stats. These are
//! balance constants, one row per status.

use serde::Serialize;

use super::status::SupplyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupplyModifiers {
    pub attack_modifier: f32,
    pub defense_modifier: f32,
    pub morale_modifier: f32,
    pub movement_modifier: f32,
    pub can_heal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heal_modifier: Option<f32>,
    /// HP lost per turn; applied by the caller, not the supply phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrition_damage: Option<u32>,
    pub description: &'static str,
}

impl SupplyModifiers {
    /// Row for units with no supply status (untracked or neutral)
    pub const NEUTRAL: SupplyModifiers = SupplyModifiers {
        attack_modifier: 1.0,
        defense_modifier: 1.0,
        morale_modifier: 1.0,
        movement_modifier: 1.0,
        can_heal: true,
        heal_modifier: None,
        attrition_damage: None,
        description: "Normal operations",
    };

    /// Look up the row for a status
    pub fn for_status(status: SupplyStatus) -> &'static SupplyModifiers {
        &MODIFIER_TABLE[status as usize]
    }

    pub fn scaled_attack(&self, base: f32) -> f32 {
        base * self.attack_modifier
    }

    pub fn scaled_defense(&self, base: f32) -> f32 {
        base * self.defense_modifier
    }

    pub fn scaled_morale(&self, base: f32) -> f32 {
        base * self.morale_modifier
    }

    pub fn scaled_movement(&self, base: f32) -> f32 {
        base * self.movement_modifier
    }

    /// Healing actually received from a heal of `base` points
    pub fn heal_amount(&self, base: f32) -> f32 {
        if !self.can_heal {
            return 0.0;
        }
        base * self.heal_modifier.unwrap_or(1.0)
    }
}

impl Default for SupplyModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// Indexed by `SupplyStatus as usize` (CutOff = 0 .. Full = 4)
static MODIFIER_TABLE: [SupplyModifiers; 5] = [
    SupplyModifiers {
        attack_modifier: 0.50,
        defense_modifier: 0.60,
        morale_modifier: 0.40,
        movement_modifier: 0.70,
        can_heal: false,
        heal_modifier: None,
        attrition_damage: Some(3),
        description: "Cut off from supply: severe penalties and attrition",
    },
    SupplyModifiers {
        attack_modifier: 0.70,
        defense_modifier: 0.75,
        morale_modifier: 0.70,
        movement_modifier: 0.85,
        can_heal: false,
        heal_modifier: None,
        attrition_damage: None,
        description: "Critical supply: major penalties, cannot heal",
    },
    SupplyModifiers {
        attack_modifier: 0.85,
        defense_modifier: 0.90,
        morale_modifier: 0.85,
        movement_modifier: 0.95,
        can_heal: true,
        heal_modifier: Some(0.5),
        attrition_damage: None,
        description: "Low supply: moderate penalties, reduced healing",
    },
    SupplyModifiers {
        attack_modifier: 0.95,
        defense_modifier: 0.95,
        morale_modifier: 0.95,
        movement_modifier: 1.0,
        can_heal: true,
        heal_modifier: None,
        attrition_damage: None,
        description: "Adequate supply: minor penalties",
    },
    SupplyModifiers {
        attack_modifier: 1.0,
        defense_modifier: 1.0,
        morale_modifier: 1.0,
        movement_modifier: 1.0,
        can_heal: true,
        heal_modifier: None,
        attrition_damage: None,
        description: "Fully supplied: no penalties",
    },
];

/// Modifier row for a status
pub fn get_supply_modifiers(status: SupplyStatus) -> SupplyModifiers {
    *SupplyModifiers::for_status(status)
}
