//! Typed content pack with load-time normalization.
//!
//! A pack is consumed, never produced, by the core. Every field falls back
//! to built-in defaults independently, so a partial or malformed pack from
//! the network degrades field-by-field instead of wholesale; a run must
//! never crash over bad content data.

use super::defaults;
use crate::items::types::{Effect, RarityDef};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coefficients of a depth/greed curve, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub base: f64,
    pub per_depth: f64,
    pub per_greed: f64,
    pub cap: f64,
}

impl CurveParams {
    pub fn at(&self, depth: u32, greed: u32) -> f64 {
        (self.base + depth as f64 * self.per_depth + greed as f64 * self.per_greed).min(self.cap)
    }

    /// Legacy packs express curves as fractions (cap <= 1.0); scale to
    /// percentage points so every consumer works in one unit.
    fn normalize(&mut self, label: &str) {
        if self.cap > 0.0 && self.cap <= 1.0 {
            warn!("content: {label} curve looks fraction-scaled, converting to percent");
            self.base *= 100.0;
            self.per_depth *= 100.0;
            self.per_greed *= 100.0;
            self.cap *= 100.0;
        }
    }
}

/// Hazard budget gates which room modifiers can be offered at a depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetCurve {
    pub base: f64,
    pub per_depth: f64,
}

impl BudgetCurve {
    pub fn at(&self, depth: u32) -> f64 {
        (self.base + depth as f64 * self.per_depth).floor()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PityConfig {
    /// Lootless rooms before pity activates.
    pub threshold: u32,
    /// Added to loot chance while pity is active, percentage points.
    pub bonus_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakChestConfig {
    /// Safe continues between chest bonuses.
    pub interval: u32,
    /// One-time addition to loot chance, as a fraction.
    pub bonus: f64,
}

/// Name vocabulary entry with a tier bias: higher rarities prefer (but never
/// require) entries with a higher bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameEntry {
    pub id: String,
    pub name: String,
    pub tier_bias: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEntry {
    pub id: String,
    pub name: String,
    pub base_value: i64,
}

/// Curated artifact definition; the only source of equipment effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDef {
    pub id: String,
    pub name: String,
    pub rarity: String,
    pub effects: Vec<Effect>,
    pub value: i64,
    pub lore: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixRoll {
    pub id: String,
    pub min: i64,
    pub max: i64,
}

/// Per-rarity affix band: how many affix slots to roll and what each slot
/// draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixBand {
    pub min_affixes: u32,
    pub max_affixes: u32,
    pub rolls: Vec<AffixRoll>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentPack {
    pub version: String,
    pub death_risk: CurveParams,
    pub exit_odds: CurveParams,
    pub hazard_budget: BudgetCurve,
    pub pity: PityConfig,
    pub streak_chest: StreakChestConfig,
    pub rarities: Vec<RarityDef>,
    pub artifacts: Vec<ArtifactDef>,
    pub prefixes: Vec<NameEntry>,
    pub bases: Vec<BaseEntry>,
    pub suffixes: Vec<NameEntry>,
    pub glyphs: Vec<String>,
    pub affix_bands: BTreeMap<String, AffixBand>,
}

impl Default for ContentPack {
    fn default() -> Self {
        Self {
            version: crate::core::constants::CONTENT_VERSION.to_string(),
            death_risk: defaults::death_risk_curve(),
            exit_odds: defaults::exit_odds_curve(),
            hazard_budget: defaults::hazard_budget_curve(),
            pity: defaults::pity_config(),
            streak_chest: defaults::streak_chest_config(),
            rarities: defaults::rarities(),
            artifacts: defaults::artifacts(),
            prefixes: defaults::prefixes(),
            bases: defaults::bases(),
            suffixes: defaults::suffixes(),
            glyphs: defaults::glyphs(),
            affix_bands: defaults::affix_bands(),
        }
    }
}

impl ContentPack {
    /// Parse a pack from JSON, falling back to defaults on parse failure,
    /// then normalize. Missing fields already default per-field via serde.
    pub fn from_json(json: &str) -> Self {
        let mut pack: ContentPack = match serde_json::from_str(json) {
            Ok(pack) => pack,
            Err(err) => {
                warn!("content: pack failed to parse ({err}), using defaults");
                ContentPack::default()
            }
        };
        pack.normalize();
        pack
    }

    /// One-shot migration/validation pass executed at load time, so no
    /// consumer needs scattered fallback checks.
    pub fn normalize(&mut self) {
        self.death_risk.normalize("death_risk");
        self.exit_odds.normalize("exit_odds");

        if self.rarities.is_empty() || self.rarities.iter().any(|r| r.weight <= 0.0) {
            warn!("content: rarity table empty or non-positive weights, using default table");
            self.rarities = defaults::rarities();
        }
        if self.pity.threshold == 0 {
            warn!("content: pity threshold of 0 would fire every room, using default");
            self.pity = defaults::pity_config();
        }
        if self.streak_chest.interval == 0 {
            warn!("content: streak chest interval of 0, using default");
            self.streak_chest = defaults::streak_chest_config();
        }
        if self.prefixes.is_empty() {
            self.prefixes = defaults::prefixes();
        }
        if self.bases.is_empty() {
            self.bases = defaults::bases();
        }
        if self.suffixes.is_empty() {
            self.suffixes = defaults::suffixes();
        }
        if self.glyphs.is_empty() {
            self.glyphs = defaults::glyphs();
        }
    }

    /// Tier index of a rarity name, or None for unknown names.
    pub fn rarity_tier(&self, name: &str) -> Option<usize> {
        self.rarities.iter().position(|r| r.name == name)
    }

    /// Rarity definition at a tier index, clamped to the table.
    pub fn rarity(&self, tier: usize) -> &RarityDef {
        let index = tier.min(self.rarities.len() - 1);
        &self.rarities[index]
    }

    pub fn value_multiplier(&self, rarity_name: &str) -> f64 {
        self.rarity_tier(rarity_name)
            .map(|tier| self.rarities[tier].value_multiplier)
            .unwrap_or(1.0)
    }

    pub fn artifacts_of_rarity(&self, rarity_name: &str) -> Vec<&ArtifactDef> {
        self.artifacts
            .iter()
            .filter(|a| a.rarity == rarity_name)
            .collect()
    }

    pub fn affix_band(&self, rarity_name: &str) -> Option<&AffixBand> {
        self.affix_bands.get(rarity_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pack_is_coherent() {
        let pack = ContentPack::default();
        assert_eq!(pack.rarities.len(), 10);
        assert_eq!(pack.rarities[0].name, "Common");
        assert!(pack.rarities.iter().all(|r| r.weight > 0.0));
        assert!(!pack.prefixes.is_empty());
        assert!(!pack.bases.is_empty());
        assert!(!pack.suffixes.is_empty());
        assert!(!pack.artifacts.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back_field_by_field() {
        // Only the pity config is supplied; everything else must default.
        let pack = ContentPack::from_json(r#"{"pity": {"threshold": 4, "bonus_pct": 12.0}}"#);
        assert_eq!(pack.pity.threshold, 4);
        assert!((pack.pity.bonus_pct - 12.0).abs() < f64::EPSILON);
        assert_eq!(pack.rarities.len(), 10);
        assert!((pack.death_risk.cap - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_json_falls_back_to_defaults() {
        let pack = ContentPack::from_json("{not json");
        assert_eq!(pack, {
            let mut d = ContentPack::default();
            d.normalize();
            d
        });
    }

    #[test]
    fn test_fraction_scaled_curves_are_converted() {
        let pack = ContentPack::from_json(
            r#"{"death_risk": {"base": 0.025, "per_depth": 0.007, "per_greed": 0.008, "cap": 0.6}}"#,
        );
        assert!((pack.death_risk.base - 2.5).abs() < 1e-9);
        assert!((pack.death_risk.cap - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_rarity_table_replaced_wholesale() {
        let pack = ContentPack::from_json(
            r##"{"rarities": [{"name": "Broken", "weight": -1.0, "value_multiplier": 1.0, "color": "#fff"}]}"##,
        );
        assert_eq!(pack.rarities.len(), 10);
        assert_eq!(pack.rarities[0].name, "Common");
    }

    #[test]
    fn test_curve_evaluation_caps() {
        let pack = ContentPack::default();
        assert!(pack.death_risk.at(1000, 10) <= pack.death_risk.cap);
        assert!(pack.exit_odds.at(1000, 10) <= pack.exit_odds.cap);
    }

    #[test]
    fn test_rarity_tier_lookup() {
        let pack = ContentPack::default();
        assert_eq!(pack.rarity_tier("Common"), Some(0));
        assert_eq!(pack.rarity_tier("Epic"), Some(3));
        assert_eq!(pack.rarity_tier("Nonexistent"), None);
    }

    #[test]
    fn test_rarity_accessor_clamps() {
        let pack = ContentPack::default();
        assert_eq!(pack.rarity(999).name, pack.rarities.last().unwrap().name);
    }
}
