//! The per-run state machine: depth, HP, greed, pacing counters, and the
//! authoritative mutation API.
//!
//! All fields are mutated only through these methods. The state never rolls
//! randomness on its own except in `roll_death`, which is the one place the
//! risk pipeline touches the RNG.

use crate::content::pack::ContentPack;
use crate::core::constants::*;
use crate::core::modifiers::RunModifiers;
use crate::core::rng::GameRng;
use log::warn;
use serde::{Deserialize, Serialize};

/// Where the run is in its lifecycle. There are no other global states;
/// everything else is data on `RunState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InRun,
    Victory,
    Dead,
}

/// Result of applying damage, after revive charges have had their say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived,
    Revived,
    Dead,
}

/// Standard-room hazard modifiers. Each has a budget cost; a room only
/// offers the hazards its depth's budget can afford.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// 1 damage and pity progress slips back a room.
    Trap,
    /// Trade 2 greed for 1 HP.
    Shrine,
    /// Next loot roll gets +15% chance but curse-shifted rarity.
    Curse,
    /// The next room's exit is guaranteed.
    Beacon,
    /// +1 greed and an immediate treasure payout.
    Treasure,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Trap,
        HazardKind::Shrine,
        HazardKind::Curse,
        HazardKind::Beacon,
        HazardKind::Treasure,
    ];

    /// Budget cost gating when this hazard can be offered.
    pub fn cost(&self) -> f64 {
        match self {
            HazardKind::Trap => 1.5,
            HazardKind::Shrine => 1.0,
            HazardKind::Curse => 2.0,
            HazardKind::Beacon => 3.0,
            HazardKind::Treasure => 1.5,
        }
    }
}

/// Choices offered at milestone rooms instead of the standard hazard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneChoice {
    /// Guaranteed loot drop.
    Continue,
    /// +15 risk this room in exchange for two loot rolls.
    Gauntlet,
    /// Trade 2 greed for 1 HP and a one-shot +10 exit bonus.
    Altar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableKind {
    SmokeBomb,
    FieldBandage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub hp: u32,
    pub max_hp: u32,
    pub greed: u32,
    pub depth: u32,
    pub score: i64,
    /// Raw treasure value picked up from hazards, separate from items.
    pub treasure: i64,
    pub rooms_visited: u32,
    pub rooms_since_loot: u32,
    pub safe_room_streak: u32,
    pub safe_rooms_remaining: u32,
    pub risk_accumulator: f64,
    pub pity_active: bool,
    pub guaranteed_exit: bool,
    pub altar_bonus: f64,
    pub phase: Phase,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            hp: STARTING_HP,
            max_hp: STARTING_MAX_HP,
            greed: 0,
            depth: 0,
            score: 0,
            treasure: 0,
            rooms_visited: 0,
            rooms_since_loot: 0,
            safe_room_streak: 0,
            safe_rooms_remaining: SAFE_ROOMS_AT_START,
            risk_accumulator: 0.0,
            pity_active: false,
            guaranteed_exit: false,
            altar_bonus: 0.0,
            phase: Phase::InRun,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase == Phase::InRun
    }

    /// Step into the next room.
    pub fn visit_room(&mut self) {
        self.depth += 1;
        self.rooms_visited += 1;
    }

    /// Milestone rooms land every fifth depth.
    pub fn is_milestone(&self) -> bool {
        self.depth > 0 && self.depth % MILESTONE_INTERVAL == 0
    }

    pub fn base_risk(&self, pack: &ContentPack) -> f64 {
        pack.death_risk.at(self.depth, self.greed)
    }

    pub fn base_exit(&self, pack: &ContentPack) -> f64 {
        pack.exit_odds.at(self.depth, self.greed)
    }

    pub fn should_activate_pity(&self, pack: &ContentPack) -> bool {
        self.rooms_since_loot >= pack.pity.threshold
    }

    /// Saturating greed adjustment, clamped to [0, 10]. Never an error.
    pub fn adjust_greed(&mut self, delta: i64) {
        let adjusted = (self.greed as i64 + delta).clamp(0, GREED_MAX as i64);
        self.greed = adjusted as u32;
    }

    pub fn increase_greed(&mut self, amount: u32) {
        self.adjust_greed(amount as i64);
    }

    pub fn decrease_greed(&mut self, amount: u32) {
        self.adjust_greed(-(amount as i64));
    }

    /// Apply damage. A lethal hit consumes a revive charge if one is
    /// available, restoring HP to max; otherwise the run ends.
    pub fn take_damage(&mut self, amount: u32, modifiers: &mut RunModifiers) -> DamageOutcome {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp > 0 {
            return DamageOutcome::Survived;
        }
        if modifiers.use_revive() {
            self.hp = self.max_hp;
            DamageOutcome::Revived
        } else {
            self.phase = Phase::Dead;
            DamageOutcome::Dead
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Roll for death this room.
    ///
    /// The first rooms of a run are unconditionally safe and consume no
    /// draw. Below the accumulator cutover, risk accumulates instead of
    /// rolling (also no draw), guaranteeing death eventually even at
    /// persistently low risk. At or above the cutover, one direct roll.
    pub fn roll_death(
        &mut self,
        rng: &mut GameRng,
        modifiers: &RunModifiers,
        pack: &ContentPack,
        extra_risk: f64,
    ) -> bool {
        if self.safe_rooms_remaining > 0 {
            self.safe_rooms_remaining -= 1;
            return false;
        }
        let risk = modifiers.final_risk(self.base_risk(pack) + extra_risk);
        if risk < RISK_ACCUMULATOR_CUTOVER {
            self.risk_accumulator += risk;
            if self.risk_accumulator >= RISK_ACCUMULATOR_TRIGGER {
                self.risk_accumulator -= RISK_ACCUMULATOR_TRIGGER;
                return true;
            }
            false
        } else {
            rng.next() * 100.0 < risk
        }
    }

    /// Final score: total carried value scaled by greed.
    pub fn calculate_score(&self, equipped_value: i64, banked_value: i64) -> i64 {
        let total = self.treasure + equipped_value + banked_value;
        (total as f64 * (1.0 + self.greed as f64 * GREED_SCORE_STEP)).floor() as i64
    }

    /// Clamp any out-of-contract field back into range. Reaching the clamp
    /// is a programming error upstream, so it logs loudly, but an in-flight
    /// run must not crash over it.
    pub fn enforce_invariants(&mut self) {
        if self.hp > self.max_hp {
            warn!("run state: hp {} above max {}, clamping", self.hp, self.max_hp);
            self.hp = self.max_hp;
        }
        if self.greed > GREED_MAX {
            warn!("run state: greed {} above {}, clamping", self.greed, GREED_MAX);
            self.greed = GREED_MAX;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::{Effect, EffectKind, Item};

    fn revive_item(charges: f64) -> Item {
        Item::FixedArtifact {
            id: "phoenix_feather".to_string(),
            name: "Phoenix Feather".to_string(),
            rarity: "Legendary".to_string(),
            effects: vec![Effect {
                id: EffectKind::ReviveCharges,
                magnitude: charges,
            }],
            value: 5000,
            lore: String::new(),
        }
    }

    #[test]
    fn test_fresh_run_shape() {
        let state = RunState::new();
        assert_eq!(state.hp, 3);
        assert_eq!(state.depth, 0);
        assert_eq!(state.greed, 0);
        assert_eq!(state.safe_rooms_remaining, 2);
        assert!(state.is_alive());
    }

    #[test]
    fn test_milestone_every_fifth_depth() {
        let mut state = RunState::new();
        let mut milestones = Vec::new();
        for _ in 0..12 {
            state.visit_room();
            if state.is_milestone() {
                milestones.push(state.depth);
            }
        }
        assert_eq!(milestones, vec![5, 10]);
    }

    #[test]
    fn test_greed_saturates_at_both_ends() {
        let mut state = RunState::new();
        state.decrease_greed(5);
        assert_eq!(state.greed, 0);
        state.increase_greed(99);
        assert_eq!(state.greed, 10);
        state.adjust_greed(-3);
        assert_eq!(state.greed, 7);
    }

    #[test]
    fn test_heal_clamps_to_max_hp() {
        let mut state = RunState::new();
        state.heal(10);
        assert_eq!(state.hp, state.max_hp);
    }

    #[test]
    fn test_lethal_damage_without_revive_ends_the_run() {
        let mut state = RunState::new();
        let mut modifiers = RunModifiers::new();
        let outcome = state.take_damage(3, &mut modifiers);
        assert_eq!(outcome, DamageOutcome::Dead);
        assert_eq!(state.hp, 0);
        assert_eq!(state.phase, Phase::Dead);
    }

    #[test]
    fn test_revive_restores_to_max_exactly_once() {
        use crate::items::equipment::ConsumableBag;
        let item = revive_item(1.0);
        let mut modifiers = RunModifiers::from_equipment(&[&item], &ConsumableBag::empty());
        let mut state = RunState::new();

        assert_eq!(state.take_damage(3, &mut modifiers), DamageOutcome::Revived);
        assert_eq!(state.hp, state.max_hp);
        assert_eq!(modifiers.revive_charges, 0);
        assert!(state.is_alive());

        assert_eq!(state.take_damage(3, &mut modifiers), DamageOutcome::Dead);
        assert_eq!(state.phase, Phase::Dead);
    }

    #[test]
    fn test_nonlethal_damage_survives() {
        let mut state = RunState::new();
        let mut modifiers = RunModifiers::new();
        assert_eq!(state.take_damage(1, &mut modifiers), DamageOutcome::Survived);
        assert_eq!(state.hp, 2);
    }

    #[test]
    fn test_safe_rooms_never_roll() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        let modifiers = RunModifiers::new();
        let mut rng = GameRng::new(1);
        let before = rng.clone();
        assert!(!state.roll_death(&mut rng, &modifiers, &pack, 0.0));
        assert!(!state.roll_death(&mut rng, &modifiers, &pack, 0.0));
        assert_eq!(state.safe_rooms_remaining, 0);
        assert_eq!(rng, before, "safe rooms must not consume RNG state");
    }

    #[test]
    fn test_low_risk_accumulates_without_rolling() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        state.safe_rooms_remaining = 0;
        state.depth = 1; // risk 2.7%, well below the 15% cutover
        let modifiers = RunModifiers::new();
        let mut rng = GameRng::new(1);
        let before = rng.clone();
        assert!(!state.roll_death(&mut rng, &modifiers, &pack, 0.0));
        assert!(state.risk_accumulator > 0.0);
        assert_eq!(rng, before, "sub-cutover risk must not consume RNG state");
    }

    #[test]
    fn test_accumulator_triggers_death_at_100() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        state.safe_rooms_remaining = 0;
        state.depth = 1;
        state.risk_accumulator = 99.0;
        let modifiers = RunModifiers::new();
        let mut rng = GameRng::new(1);
        assert!(state.roll_death(&mut rng, &modifiers, &pack, 0.0));
        assert!(
            state.risk_accumulator < RISK_ACCUMULATOR_TRIGGER,
            "trigger must subtract 100, leaving {}",
            state.risk_accumulator
        );
    }

    #[test]
    fn test_high_risk_rolls_directly() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        state.safe_rooms_remaining = 0;
        state.depth = 30;
        state.greed = 10; // 2 + 21 + 8 = 31%, above the cutover
        let modifiers = RunModifiers::new();
        let mut rng = GameRng::new(1);
        let before_acc = state.risk_accumulator;
        let _ = state.roll_death(&mut rng, &modifiers, &pack, 0.0);
        assert_eq!(state.risk_accumulator, before_acc);
        assert_ne!(rng, GameRng::new(1), "direct roll must consume a draw");
    }

    #[test]
    fn test_risk_curve_caps_at_60() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        state.depth = 500;
        state.greed = 10;
        assert!((state.base_risk(&pack) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_scales_with_greed() {
        let mut state = RunState::new();
        state.treasure = 100;
        assert_eq!(state.calculate_score(200, 300), 600);
        state.greed = 10;
        assert_eq!(state.calculate_score(200, 300), 1200);
    }

    #[test]
    fn test_score_floors() {
        let mut state = RunState::new();
        state.treasure = 33;
        state.greed = 1;
        // 33 * 1.1 = 36.3
        assert_eq!(state.calculate_score(0, 0), 36);
    }

    #[test]
    fn test_pity_threshold() {
        let pack = ContentPack::default();
        let mut state = RunState::new();
        assert!(!state.should_activate_pity(&pack));
        state.rooms_since_loot = 2;
        assert!(state.should_activate_pity(&pack));
    }

    #[test]
    fn test_enforce_invariants_clamps_corrupt_fields() {
        let mut state = RunState::new();
        state.hp = 99;
        state.greed = 99;
        state.enforce_invariants();
        assert_eq!(state.hp, state.max_hp);
        assert_eq!(state.greed, GREED_MAX);
    }

    #[test]
    fn test_hazard_costs_are_ordered_by_power() {
        assert!(HazardKind::Beacon.cost() > HazardKind::Curse.cost());
        assert!(HazardKind::Curse.cost() > HazardKind::Shrine.cost());
    }
}
