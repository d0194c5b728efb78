//! Loot generation: rarity rolls with situational weight adjustment, and the
//! fixed-vs-procedural item split.
//!
//! Every draw here advances the shared run RNG exactly once per decision, in
//! a fixed order, because the replay validator re-executes these rolls from
//! the seed alone.

use super::names::{self, GeneratedName};
use super::types::{Affix, Item};
use crate::content::pack::ContentPack;
use crate::core::rng::GameRng;
use log::debug;

/// Situational inputs to a rarity roll. Each flag reshapes the weight table
/// before the draw; none of them consume RNG state on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RarityRollFlags {
    /// Milestone rewards skew away from the bottom tiers.
    pub milestone: bool,
    /// Pity-break rolls soften Common and lift everything else.
    pub pity: bool,
    /// Cursed loot trades safety for quality.
    pub curse: bool,
}

/// Stateful loot generator. The roll index is the per-run counter folded
/// into procedural identity hashes; it survives across rooms so two drops in
/// one room still hash differently.
#[derive(Debug, Clone, Default)]
pub struct LootEngine {
    roll_index: u32,
}

/// Rarity weights after situational adjustment, in table order.
pub(crate) fn adjusted_weights(pack: &ContentPack, flags: RarityRollFlags) -> Vec<f64> {
    pack.rarities
        .iter()
        .enumerate()
        .map(|(tier, rarity)| {
            let mut weight = rarity.weight;
            if flags.milestone {
                weight *= if tier < 3 { 0.6 } else { 1.4 };
            }
            if flags.pity {
                weight *= if tier == 0 { 0.5 } else { 1.2 };
            }
            if flags.curse {
                weight *= if tier < 3 { 0.7 } else { 1.4 };
            }
            weight
        })
        .collect()
}

impl LootEngine {
    pub fn new() -> Self {
        Self { roll_index: 0 }
    }

    pub fn roll_index(&self) -> u32 {
        self.roll_index
    }

    /// Roll a rarity tier: one RNG draw against the adjusted weight table,
    /// then shift by the equipment rarity step, clamped to the table.
    pub fn roll_rarity(
        &self,
        rng: &mut GameRng,
        pack: &ContentPack,
        flags: RarityRollFlags,
        rarity_step: i64,
    ) -> usize {
        let weights = adjusted_weights(pack, flags);
        let total: f64 = weights.iter().sum();
        let mut remaining = rng.next_float(0.0, total);
        let mut tier = 0;
        for (index, weight) in weights.iter().enumerate() {
            remaining -= weight;
            if remaining <= 0.0 {
                tier = index;
                break;
            }
        }
        let max_tier = pack.rarities.len() as i64 - 1;
        (tier as i64 + rarity_step).clamp(0, max_tier) as usize
    }

    /// Generate one item at the given depth.
    ///
    /// Draw order: rarity roll, kind roll, then either an artifact pick or
    /// the procedural pipeline. When the rolled rarity has no artifacts the
    /// kind roll still stands and generation falls through to procedural
    /// without consuming an extra draw.
    pub fn generate_item(
        &mut self,
        rng: &mut GameRng,
        pack: &ContentPack,
        depth: u32,
        flags: RarityRollFlags,
        rarity_step: i64,
    ) -> Item {
        let tier = self.roll_rarity(rng, pack, flags, rarity_step);
        let rarity_name = pack.rarity(tier).name.clone();

        if rng.next_int(0, 1) == 1 {
            let candidates = pack.artifacts_of_rarity(&rarity_name);
            if !candidates.is_empty() {
                let def = rng
                    .choice(&candidates)
                    .copied()
                    .unwrap_or(candidates[0]);
                debug!("loot: artifact {} ({rarity_name}) at depth {depth}", def.id);
                return Item::FixedArtifact {
                    id: def.id.clone(),
                    name: def.name.clone(),
                    rarity: def.rarity.clone(),
                    effects: def.effects.clone(),
                    value: def.value,
                    lore: def.lore.clone(),
                };
            }
        }

        self.generate_procedural(rng, pack, tier, &rarity_name, depth)
    }

    fn generate_procedural(
        &mut self,
        rng: &mut GameRng,
        pack: &ContentPack,
        tier: usize,
        rarity_name: &str,
        depth: u32,
    ) -> Item {
        let GeneratedName {
            name,
            hash,
            base_value,
            components,
        } = names::generate_name(rng, pack, tier, depth, self.roll_index);

        // Each affix slot carries every roll type the band lists, each with
        // its own magnitude draw.
        let mut affixes = Vec::new();
        if let Some(band) = pack.affix_band(rarity_name) {
            let count = rng.next_int(band.min_affixes as i64, band.max_affixes as i64);
            for _ in 0..count {
                for roll in &band.rolls {
                    affixes.push(Affix {
                        id: roll.id.clone(),
                        value: rng.next_int(roll.min, roll.max),
                    });
                }
            }
        }

        let affix_bonus: i64 = affixes.iter().map(|a| a.value).sum();
        let multiplier = pack.value_multiplier(rarity_name);
        let value =
            (base_value as f64 * multiplier * (1.0 + affix_bonus as f64 / 100.0)).floor() as i64;

        self.roll_index += 1;
        debug!("loot: procedural {hash} ({rarity_name}) worth {value} at depth {depth}");

        Item::Procedural {
            hash,
            name,
            rarity: rarity_name.to_string(),
            base_value,
            affixes,
            value,
            components,
        }
    }
}
