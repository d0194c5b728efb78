//! RunSession: one run's RNG, state, equipment, and replay log under a
//! single owner.
//!
//! All player decisions enter through this type, which keeps the draw order
//! fixed: every decision appends its replay entry before the next randomness
//! draw. A validator that replays the same ordered decisions against the
//! same seed reproduces the identical log, items, and score.

use crate::content::pack::ContentPack;
use crate::core::constants::*;
use crate::core::modifiers::RunModifiers;
use crate::core::rng::{hash_seed_string, GameRng};
use crate::core::run_state::{
    ConsumableKind, DamageOutcome, HazardKind, MilestoneChoice, Phase, RunState,
};
use crate::items::equipment::{EquipError, EquipmentLedger};
use crate::items::loot::{LootEngine, RarityRollFlags};
use crate::items::types::Item;
use crate::replay::log::{ReplayEntry, ReplayRecorder};
use crate::replay::submission::ScoreSubmission;
use log::info;
use std::fmt;

/// What the current room offers the player.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub depth: u32,
    pub milestone: bool,
    /// The hazard modifier on offer in a standard room, if the depth's
    /// budget affords one. Milestone rooms offer choices instead.
    pub hazard: Option<HazardKind>,
    pub exit_available: bool,
}

/// Result of resolving one room decision.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Advanced,
    Loot { items: Vec<Item> },
    Revived,
    Died { score: i64 },
    Victory { score: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceError {
    /// The run already ended; no further decisions are accepted.
    RunOver,
    /// No room has been entered yet; call `enter_room` first.
    NoRoomPending,
    /// The current room still needs a decision before entering another.
    DecisionPending,
    /// Exit was chosen but the current room offers no exit.
    ExitNotOffered,
    /// A hazard was chosen that the current room does not offer.
    HazardNotOffered,
    /// A milestone choice was made in a standard room.
    NotMilestone,
    /// A standard continue was chosen in a milestone room.
    MilestoneRoom,
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceError::RunOver => write!(f, "run already ended"),
            ChoiceError::NoRoomPending => write!(f, "no room entered"),
            ChoiceError::DecisionPending => write!(f, "current room still undecided"),
            ChoiceError::ExitNotOffered => write!(f, "no exit in this room"),
            ChoiceError::HazardNotOffered => write!(f, "hazard not offered in this room"),
            ChoiceError::NotMilestone => write!(f, "not a milestone room"),
            ChoiceError::MilestoneRoom => write!(f, "milestone rooms take milestone choices"),
        }
    }
}

pub struct RunSession {
    rng: GameRng,
    state: RunState,
    ledger: EquipmentLedger,
    modifiers: RunModifiers,
    loot: LootEngine,
    recorder: ReplayRecorder,
    pack: ContentPack,
    seed: u32,
    seed_string: Option<String>,
    daily: bool,
    curse_active: bool,
    room: Option<RoomView>,
    // Charges already consumed this run; re-subtracted after every modifier
    // recompute so an unequip/re-equip cycle cannot resurrect them.
    spent_revives: u32,
    spent_skips: u32,
    spent_heals: u32,
}

impl RunSession {
    pub fn new(seed: u32, pack: ContentPack, daily: bool) -> Self {
        info!("run started: seed {seed}, daily {daily}");
        let ledger = EquipmentLedger::new();
        let modifiers = RunModifiers::from_equipment(&[], &ledger.consumables);
        Self {
            rng: GameRng::new(seed),
            state: RunState::new(),
            ledger,
            modifiers,
            loot: LootEngine::new(),
            recorder: ReplayRecorder::new(),
            pack,
            seed,
            seed_string: None,
            daily,
            curse_active: false,
            room: None,
            spent_revives: 0,
            spent_skips: 0,
            spent_heals: 0,
        }
    }

    /// Seed the run from a human-entered string.
    pub fn from_seed_string(seed_string: &str, pack: ContentPack, daily: bool) -> Self {
        let mut session = Self::new(hash_seed_string(seed_string), pack, daily);
        session.seed_string = Some(seed_string.to_string());
        session
    }

    /// Fresh run with an OS-entropy seed. The only non-deterministic entry
    /// point; everything after construction is replayable from the seed.
    pub fn with_random_seed(pack: ContentPack) -> Self {
        Self::new(rand::random::<u32>(), pack, false)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn modifiers(&self) -> &RunModifiers {
        &self.modifiers
    }

    pub fn ledger(&self) -> &EquipmentLedger {
        &self.ledger
    }

    pub fn recorder(&self) -> &ReplayRecorder {
        &self.recorder
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }

    pub fn current_room(&self) -> Option<&RoomView> {
        self.room.as_ref()
    }

    /// Step into the next room and roll what it offers.
    ///
    /// Draw order: milestone rooms roll only the exit; standard rooms roll
    /// one hazard offer, then the exit. A pending beacon grants the exit
    /// without a draw.
    pub fn enter_room(&mut self) -> Result<RoomView, ChoiceError> {
        if !self.state.is_alive() {
            return Err(ChoiceError::RunOver);
        }
        if self.room.is_some() {
            return Err(ChoiceError::DecisionPending);
        }
        self.state.enforce_invariants();
        self.state.visit_room();
        let depth = self.state.depth;
        let milestone = self.state.is_milestone();
        self.recorder.record(ReplayEntry::Room { depth, milestone });

        if milestone && self.modifiers.heal_on_milestone > 0 {
            self.state.heal(self.modifiers.heal_on_milestone);
        }

        let hazard = if milestone {
            None
        } else {
            let budget = self.pack.hazard_budget.at(depth);
            let affordable: Vec<HazardKind> = HazardKind::ALL
                .iter()
                .copied()
                .filter(|h| h.cost() <= budget)
                .collect();
            self.rng.choice(&affordable).copied()
        };

        let exit_available = if self.state.guaranteed_exit {
            self.state.guaranteed_exit = false;
            true
        } else {
            let base = self.state.base_exit(&self.pack) + self.state.altar_bonus;
            self.state.altar_bonus = 0.0;
            let odds = self.modifiers.final_exit(base);
            self.rng.next() * 100.0 < odds
        };

        let view = RoomView {
            depth,
            milestone,
            hazard,
            exit_available,
        };
        self.room = Some(view.clone());
        Ok(view)
    }

    /// Push deeper through a standard room: greed rises, the risk pipeline
    /// runs, and surviving earns a loot check.
    pub fn choose_continue(&mut self) -> Result<TurnOutcome, ChoiceError> {
        let room = self.pending_room()?;
        if room.milestone {
            return Err(ChoiceError::MilestoneRoom);
        }
        self.room = None;
        self.recorder.record(ReplayEntry::Continue {
            depth: self.state.depth,
        });
        self.state
            .adjust_greed(1 + self.modifiers.greed_delta_on_continue);
        self.state.safe_room_streak += 1;

        if self
            .state
            .roll_death(&mut self.rng, &self.modifiers, &self.pack, 0.0)
        {
            return Ok(self.apply_lethal_roll());
        }
        Ok(self.roll_loot(false, false))
    }

    /// Leave with everything carried. Only valid when the room offers an
    /// exit; the score freezes here.
    pub fn choose_exit(&mut self) -> Result<TurnOutcome, ChoiceError> {
        let room = self.pending_room()?;
        if !room.exit_available {
            return Err(ChoiceError::ExitNotOffered);
        }
        self.room = None;
        self.recorder.record(ReplayEntry::Exit {
            depth: self.state.depth,
        });
        self.state.phase = Phase::Victory;
        let score = self.freeze_score();
        info!("run exited at depth {} with score {score}", self.state.depth);
        Ok(TurnOutcome::Victory { score })
    }

    /// Take the offered hazard instead of a plain continue. No greed gain
    /// and no safe-streak credit; the hazard's effect applies first, then
    /// the risk pipeline and a loot check.
    pub fn choose_hazard(&mut self, kind: HazardKind) -> Result<TurnOutcome, ChoiceError> {
        let room = self.pending_room()?;
        if room.hazard != Some(kind) {
            return Err(ChoiceError::HazardNotOffered);
        }
        self.room = None;
        self.recorder.record(ReplayEntry::Hazard {
            depth: self.state.depth,
            kind,
        });

        match kind {
            HazardKind::Trap => {
                self.state.rooms_since_loot = self.state.rooms_since_loot.saturating_sub(1);
                match self.state.take_damage(TRAP_DAMAGE, &mut self.modifiers) {
                    DamageOutcome::Survived => {}
                    DamageOutcome::Revived => {
                        self.spent_revives += 1;
                        self.recorder.record(ReplayEntry::Revive {
                            depth: self.state.depth,
                        });
                        return Ok(TurnOutcome::Revived);
                    }
                    DamageOutcome::Dead => {
                        self.recorder.record(ReplayEntry::Death {
                            depth: self.state.depth,
                        });
                        let score = self.freeze_score();
                        return Ok(TurnOutcome::Died { score });
                    }
                }
            }
            HazardKind::Shrine => {
                self.state.decrease_greed(SHRINE_GREED_COST);
                self.state.heal(SHRINE_HEAL);
            }
            HazardKind::Curse => {
                self.curse_active = true;
            }
            HazardKind::Beacon => {
                self.state.guaranteed_exit = true;
            }
            HazardKind::Treasure => {
                self.state.increase_greed(1);
                self.state.treasure += self.rng.next_int(TREASURE_PILE_MIN, TREASURE_PILE_MAX);
            }
        }

        if self
            .state
            .roll_death(&mut self.rng, &self.modifiers, &self.pack, 0.0)
        {
            return Ok(self.apply_lethal_roll());
        }
        Ok(self.roll_loot(false, false))
    }

    /// Resolve a milestone room.
    pub fn choose_milestone(&mut self, choice: MilestoneChoice) -> Result<TurnOutcome, ChoiceError> {
        let room = self.pending_room()?;
        if !room.milestone {
            return Err(ChoiceError::NotMilestone);
        }
        self.room = None;
        self.recorder.record(ReplayEntry::Milestone {
            depth: self.state.depth,
            choice,
        });

        match choice {
            MilestoneChoice::Continue => {
                self.state
                    .adjust_greed(1 + self.modifiers.greed_delta_on_continue);
                self.state.safe_room_streak += 1;
                if self
                    .state
                    .roll_death(&mut self.rng, &self.modifiers, &self.pack, 0.0)
                {
                    return Ok(self.apply_lethal_roll());
                }
                Ok(self.roll_loot(true, true))
            }
            MilestoneChoice::Gauntlet => {
                if self.state.roll_death(
                    &mut self.rng,
                    &self.modifiers,
                    &self.pack,
                    GAUNTLET_RISK_BONUS,
                ) {
                    return Ok(self.apply_lethal_roll());
                }
                let mut items = Vec::new();
                for _ in 0..GAUNTLET_LOOT_ROLLS {
                    if let TurnOutcome::Loot { items: mut batch } = self.roll_loot(true, true) {
                        items.append(&mut batch);
                    }
                }
                Ok(TurnOutcome::Loot { items })
            }
            MilestoneChoice::Altar => {
                self.state.decrease_greed(ALTAR_GREED_COST);
                self.state.heal(ALTAR_HEAL);
                self.state.altar_bonus += ALTAR_EXIT_BONUS;
                Ok(TurnOutcome::Advanced)
            }
        }
    }

    /// Spend a skip-room charge to slip past the pending room: no risk
    /// roll and no greed change, but the room still counts toward loot
    /// pacing and gets its loot check. Returns `None` when no charge was
    /// available and the room stays pending.
    pub fn use_smoke_bomb(&mut self) -> Result<Option<TurnOutcome>, ChoiceError> {
        self.pending_room()?;
        if !self.modifiers.use_skip_room() {
            return Ok(None);
        }
        self.spent_skips += 1;
        self.recorder.record(ReplayEntry::Consumable {
            depth: self.state.depth,
            kind: ConsumableKind::SmokeBomb,
        });
        self.room = None;
        self.state.safe_room_streak += 1;
        Ok(Some(self.roll_loot(false, false)))
    }

    /// Spend a heal charge for 1 HP, any time during the run.
    pub fn use_field_bandage(&mut self) -> Result<bool, ChoiceError> {
        if !self.state.is_alive() {
            return Err(ChoiceError::RunOver);
        }
        if !self.modifiers.use_heal() {
            return Ok(false);
        }
        self.spent_heals += 1;
        self.state.heal(1);
        self.recorder.record(ReplayEntry::Consumable {
            depth: self.state.depth,
            kind: ConsumableKind::FieldBandage,
        });
        Ok(true)
    }

    /// Equip an item, returning whatever it displaced. Modifiers recompute
    /// from scratch; already-spent charges stay spent.
    pub fn equip(&mut self, item: Item, slot: usize) -> Result<Option<Item>, EquipError> {
        let identity = item.identity().to_string();
        let displaced = self.ledger.equip(item, slot)?;
        self.recorder.record(ReplayEntry::Equip {
            depth: self.state.depth,
            slot,
            identity,
        });
        self.recompute_modifiers();
        Ok(displaced)
    }

    /// Stash an item in the bank: value only, never effects.
    pub fn bank(&mut self, item: Item) {
        self.recorder.record(ReplayEntry::Bank {
            depth: self.state.depth,
            identity: item.identity().to_string(),
        });
        self.ledger.bank(item);
    }

    /// Build the submission payload for a finished run.
    pub fn submission(&self) -> Result<ScoreSubmission, serde_json::Error> {
        let mut items: Vec<Item> = self
            .ledger
            .equipped_items()
            .into_iter()
            .cloned()
            .collect();
        items.extend(self.ledger.banked_items().iter().cloned());
        ScoreSubmission::from_run(
            self.seed,
            self.seed_string.clone(),
            &self.pack.version,
            self.daily,
            self.state.score,
            self.state.depth,
            items,
            &self.recorder,
        )
    }

    fn pending_room(&self) -> Result<&RoomView, ChoiceError> {
        if !self.state.is_alive() {
            return Err(ChoiceError::RunOver);
        }
        self.room.as_ref().ok_or(ChoiceError::NoRoomPending)
    }

    fn recompute_modifiers(&mut self) {
        let modifiers = {
            let equipped = self.ledger.equipped_items();
            RunModifiers::from_equipment(&equipped, &self.ledger.consumables)
        };
        self.modifiers = modifiers;
        self.modifiers.revive_charges = self
            .modifiers
            .revive_charges
            .saturating_sub(self.spent_revives);
        self.modifiers.skip_room_charges = self
            .modifiers
            .skip_room_charges
            .saturating_sub(self.spent_skips);
        self.modifiers.heal_charges = self.modifiers.heal_charges.saturating_sub(self.spent_heals);
    }

    /// The risk pipeline said death: apply a lethal hit, which a revive
    /// charge may still absorb.
    fn apply_lethal_roll(&mut self) -> TurnOutcome {
        let hp = self.state.hp;
        match self.state.take_damage(hp, &mut self.modifiers) {
            DamageOutcome::Revived => {
                self.spent_revives += 1;
                self.recorder.record(ReplayEntry::Revive {
                    depth: self.state.depth,
                });
                TurnOutcome::Revived
            }
            DamageOutcome::Survived | DamageOutcome::Dead => {
                self.recorder.record(ReplayEntry::Death {
                    depth: self.state.depth,
                });
                self.state.phase = Phase::Dead;
                let score = self.freeze_score();
                info!("run ended at depth {} with score {score}", self.state.depth);
                TurnOutcome::Died { score }
            }
        }
    }

    /// Loot check for a surviving room decision.
    ///
    /// The room counts toward the lootless streak before the pity check,
    /// so with a threshold of 2 the second consecutive empty room already
    /// rolls boosted. Chance stacks base + pity + streak chest + curse,
    /// then equipment; pity and curse also reshape the rarity table of the
    /// roll they boosted. One chance draw unless the drop is guaranteed.
    fn roll_loot(&mut self, guaranteed: bool, milestone: bool) -> TurnOutcome {
        self.state.rooms_since_loot += 1;
        let mut chance = BASE_LOOT_CHANCE;

        let pity = self.state.should_activate_pity(&self.pack);
        self.state.pity_active = pity;
        if pity {
            chance += self.pack.pity.bonus_pct / 100.0;
        }
        if self.state.safe_room_streak >= self.pack.streak_chest.interval {
            chance += self.pack.streak_chest.bonus;
            self.state.safe_room_streak = 0;
        }
        let curse = self.curse_active;
        if curse {
            chance += CURSE_LOOT_BONUS;
            self.curse_active = false;
        }

        let granted = if guaranteed {
            true
        } else {
            let final_chance = self.modifiers.final_loot_chance(chance);
            self.rng.next() < final_chance
        };

        if !granted {
            return TurnOutcome::Advanced;
        }

        self.state.rooms_since_loot = 0;
        let flags = RarityRollFlags {
            milestone,
            pity,
            curse,
        };
        let item = self.loot.generate_item(
            &mut self.rng,
            &self.pack,
            self.state.depth,
            flags,
            self.modifiers.rarity_step,
        );
        self.recorder.record(ReplayEntry::Loot {
            depth: self.state.depth,
            rarity: item.rarity().to_string(),
            identity: item.identity().to_string(),
            value: item.value(),
        });
        TurnOutcome::Loot { items: vec![item] }
    }

    fn freeze_score(&mut self) -> i64 {
        let score = self
            .state
            .calculate_score(self.ledger.equipped_value(), self.ledger.banked_value());
        self.state.score = score;
        score
    }
}
