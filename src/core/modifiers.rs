//! Aggregation of equipment and consumable effects into run modifiers.
//!
//! The aggregate is a pure function of the equipped items and the consumable
//! bag: it is recomputed from scratch whenever equipment changes, never
//! patched incrementally, so the pools can't drift from their sources.

use crate::core::constants::{EXIT_CLAMP_MAX, RISK_CLAMP_MAX};
use crate::items::equipment::ConsumableBag;
use crate::items::types::{Effect, EffectKind, Item};
use log::debug;

/// All effect magnitudes folded by kind: additive kinds summed,
/// multiplicative kinds multiplied, charge kinds summed into spendable pools.
#[derive(Debug, Clone, PartialEq)]
pub struct RunModifiers {
    pub risk_add: f64,
    pub risk_mult: f64,
    pub exit_add: f64,
    pub exit_mult: f64,
    pub rarity_step: i64,
    pub loot_chance_add: f64,
    pub greed_delta_on_continue: i64,
    pub heal_on_milestone: u32,
    pub revive_charges: u32,
    pub skip_room_charges: u32,
    pub heal_charges: u32,
}

impl Default for RunModifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl RunModifiers {
    pub fn new() -> Self {
        Self {
            risk_add: 0.0,
            risk_mult: 1.0,
            exit_add: 0.0,
            exit_mult: 1.0,
            rarity_step: 0,
            loot_chance_add: 0.0,
            greed_delta_on_continue: 0,
            heal_on_milestone: 0,
            revive_charges: 0,
            skip_room_charges: 0,
            heal_charges: 0,
        }
    }

    /// Fold every effect of every equipped item, then the consumable bag.
    /// Consumables contribute only charge kinds.
    pub fn from_equipment(equipped: &[&Item], consumables: &ConsumableBag) -> Self {
        let mut modifiers = Self::new();
        for item in equipped {
            for effect in item.effects() {
                modifiers.apply_effect(effect);
            }
        }
        modifiers.skip_room_charges += consumables.smoke_bombs;
        modifiers.heal_charges += consumables.field_bandages;
        debug!(
            "modifiers recomputed from {} items: risk {:+.1}% x{:.2}, exit {:+.1}% x{:.2}, \
             loot {:+.1}%, charges r{}/s{}/h{}",
            equipped.len(),
            modifiers.risk_add,
            modifiers.risk_mult,
            modifiers.exit_add,
            modifiers.exit_mult,
            modifiers.loot_chance_add,
            modifiers.revive_charges,
            modifiers.skip_room_charges,
            modifiers.heal_charges,
        );
        modifiers
    }

    fn apply_effect(&mut self, effect: &Effect) {
        let v = effect.magnitude;
        match effect.id {
            EffectKind::RiskAdd => self.risk_add += v,
            EffectKind::RiskMult => self.risk_mult *= v,
            EffectKind::ExitAdd => self.exit_add += v,
            EffectKind::ExitMult => self.exit_mult *= v,
            EffectKind::RarityStep => self.rarity_step += v as i64,
            EffectKind::LootChanceAdd => self.loot_chance_add += v,
            EffectKind::GreedDeltaOnContinue => self.greed_delta_on_continue += v as i64,
            EffectKind::HealOnMilestone => self.heal_on_milestone += v as u32,
            EffectKind::ReviveCharges => self.revive_charges += v as u32,
            EffectKind::SkipRoomCharges => self.skip_room_charges += v as u32,
            EffectKind::HealCharges => self.heal_charges += v as u32,
        }
    }

    /// Final risk percentage: additive first, then multiplicative, clamped.
    pub fn final_risk(&self, base_pct: f64) -> f64 {
        ((base_pct + self.risk_add) * self.risk_mult).clamp(0.0, RISK_CLAMP_MAX)
    }

    /// Final exit percentage, same pipeline as risk.
    pub fn final_exit(&self, base_pct: f64) -> f64 {
        ((base_pct + self.exit_add) * self.exit_mult).clamp(0.0, EXIT_CLAMP_MAX)
    }

    /// Final loot chance as a fraction in [0, 1].
    pub fn final_loot_chance(&self, base_chance: f64) -> f64 {
        (base_chance + self.loot_chance_add / 100.0).clamp(0.0, 1.0)
    }

    /// Spend one revive charge. Callers must check the return value before
    /// assuming the resource was consumed.
    pub fn use_revive(&mut self) -> bool {
        if self.revive_charges > 0 {
            self.revive_charges -= 1;
            true
        } else {
            false
        }
    }

    pub fn use_skip_room(&mut self) -> bool {
        if self.skip_room_charges > 0 {
            self.skip_room_charges -= 1;
            true
        } else {
            false
        }
    }

    pub fn use_heal(&mut self) -> bool {
        if self.heal_charges > 0 {
            self.heal_charges -= 1;
            true
        } else {
            false
        }
    }
}
