//! Built-in fallback tables.
//!
//! These are the shipped defaults used whenever a content pack is missing,
//! partial, or malformed. Table order matters: rarity position is the tier
//! index, and weighted selection walks tables in order.

use super::pack::{
    AffixBand, AffixRoll, ArtifactDef, BaseEntry, BudgetCurve, CurveParams, NameEntry, PityConfig,
    StreakChestConfig,
};
use crate::items::types::{Effect, EffectKind, RarityDef};
use std::collections::BTreeMap;

pub fn death_risk_curve() -> CurveParams {
    CurveParams {
        base: 2.0,
        per_depth: 0.7,
        per_greed: 0.8,
        cap: 60.0,
    }
}

pub fn exit_odds_curve() -> CurveParams {
    CurveParams {
        base: 5.0,
        per_depth: 1.0,
        per_greed: 0.5,
        cap: 40.0,
    }
}

pub fn hazard_budget_curve() -> BudgetCurve {
    BudgetCurve {
        base: 2.0,
        per_depth: 0.3,
    }
}

pub fn pity_config() -> PityConfig {
    PityConfig {
        threshold: 2,
        bonus_pct: 6.0,
    }
}

pub fn streak_chest_config() -> StreakChestConfig {
    StreakChestConfig {
        interval: 3,
        bonus: 0.35,
    }
}

pub fn rarities() -> Vec<RarityDef> {
    fn def(name: &str, weight: f64, value_multiplier: f64, color: &str) -> RarityDef {
        RarityDef {
            name: name.to_string(),
            weight,
            value_multiplier,
            color: color.to_string(),
        }
    }
    vec![
        def("Common", 40.0, 1.0, "#9ca3af"),
        def("Uncommon", 22.0, 1.2, "#22c55e"),
        def("Rare", 12.0, 1.5, "#3b82f6"),
        def("Epic", 8.0, 2.0, "#8b5cf6"),
        def("Mythic", 6.0, 2.5, "#f59e0b"),
        def("Ancient", 4.0, 3.0, "#ef4444"),
        def("Relic", 3.0, 3.5, "#ec4899"),
        def("Legendary", 2.0, 4.0, "#06b6d4"),
        def("Transcendent", 1.5, 5.0, "#eab308"),
        def("OneOfOne", 1.5, 6.0, "#dc2626"),
    ]
}

pub fn artifacts() -> Vec<ArtifactDef> {
    fn def(
        id: &str,
        name: &str,
        rarity: &str,
        effects: Vec<Effect>,
        value: i64,
        lore: &str,
    ) -> ArtifactDef {
        ArtifactDef {
            id: id.to_string(),
            name: name.to_string(),
            rarity: rarity.to_string(),
            effects,
            value,
            lore: lore.to_string(),
        }
    }
    fn eff(id: EffectKind, magnitude: f64) -> Effect {
        Effect { id, magnitude }
    }
    vec![
        def(
            "lucky_coin",
            "Lucky Coin",
            "Uncommon",
            vec![eff(EffectKind::LootChanceAdd, 10.0)],
            100,
            "A tarnished coin that brings unexpected fortune.",
        ),
        def(
            "dowsing_twig",
            "Dowsing Twig",
            "Uncommon",
            vec![eff(EffectKind::ExitAdd, 5.0)],
            90,
            "Twitches toward the surface.",
        ),
        def(
            "iron_will",
            "Iron Will",
            "Rare",
            vec![eff(EffectKind::RiskMult, 0.9)],
            200,
            "Strengthens resolve against temptation.",
        ),
        def(
            "smokestone",
            "Smokestone",
            "Rare",
            vec![eff(EffectKind::SkipRoomCharges, 2.0)],
            180,
            "Crumbles into a blinding cloud when crushed.",
        ),
        def(
            "surgeon_kit",
            "Surgeon's Kit",
            "Rare",
            vec![eff(EffectKind::HealCharges, 2.0)],
            190,
            "Needle, thread, and nerve.",
        ),
        def(
            "cursed_idol",
            "Cursed Idol",
            "Epic",
            vec![
                eff(EffectKind::RiskAdd, 5.0),
                eff(EffectKind::RarityStep, 1.0),
            ],
            450,
            "It whispers of better loot, for a price.",
        ),
        def(
            "gilded_compass",
            "Gilded Compass",
            "Epic",
            vec![
                eff(EffectKind::ExitMult, 1.25),
                eff(EffectKind::GreedDeltaOnContinue, 1.0),
            ],
            480,
            "Every needle swing pulls you two ways.",
        ),
        def(
            "pilgrim_icon",
            "Pilgrim's Icon",
            "Mythic",
            vec![eff(EffectKind::HealOnMilestone, 1.0)],
            900,
            "Rest is owed at every fifth door.",
        ),
        def(
            "phoenix_feather",
            "Phoenix Feather",
            "Legendary",
            vec![eff(EffectKind::ReviveCharges, 1.0)],
            5000,
            "One life, rekindled.",
        ),
    ]
}

pub fn prefixes() -> Vec<NameEntry> {
    fn entry(id: &str, name: &str, tier_bias: u32) -> NameEntry {
        NameEntry {
            id: id.to_string(),
            name: name.to_string(),
            tier_bias,
        }
    }
    vec![
        // Tier 1: common bias
        entry("worn", "Worn", 1),
        entry("simple", "Simple", 1),
        entry("crude", "Crude", 1),
        entry("basic", "Basic", 1),
        entry("plain", "Plain", 1),
        entry("rough", "Rough", 1),
        entry("old", "Old", 1),
        entry("weathered", "Weathered", 1),
        entry("tarnished", "Tarnished", 1),
        entry("faded", "Faded", 1),
        entry("chipped", "Chipped", 1),
        entry("dull", "Dull", 1),
        entry("common", "Common", 1),
        entry("standard", "Standard", 1),
        entry("typical", "Typical", 1),
        // Tier 2: higher rarity bias
        entry("radiant", "Radiant", 2),
        entry("gloomforged", "Gloomforged", 2),
        entry("venomous", "Venomous", 2),
        entry("obsidian", "Obsidian", 2),
        entry("crimson", "Crimson", 2),
        entry("shadow", "Shadow", 2),
        entry("ethereal", "Ethereal", 2),
        entry("arcane", "Arcane", 2),
        entry("mystic", "Mystic", 2),
        entry("ancient", "Ancient", 2),
        entry("cursed", "Cursed", 2),
        entry("blessed", "Blessed", 2),
        entry("divine", "Divine", 2),
        entry("infernal", "Infernal", 2),
        entry("celestial", "Celestial", 2),
        entry("void", "Void", 2),
        entry("crystal", "Crystal", 2),
        entry("spectral", "Spectral", 2),
        entry("runic", "Runic", 2),
        entry("gilded", "Gilded", 2),
        entry("pristine", "Pristine", 2),
        entry("masterwork", "Masterwork", 2),
        // Tier 3: top-end bias
        entry("legendary", "Legendary", 3),
        entry("transcendent", "Transcendent", 3),
        entry("primordial", "Primordial", 3),
    ]
}

pub fn bases() -> Vec<BaseEntry> {
    fn entry(id: &str, name: &str, base_value: i64) -> BaseEntry {
        BaseEntry {
            id: id.to_string(),
            name: name.to_string(),
            base_value,
        }
    }
    vec![
        entry("blade", "Blade", 120),
        entry("spear", "Spear", 110),
        entry("sword", "Sword", 130),
        entry("dagger", "Dagger", 90),
        entry("axe", "Axe", 125),
        entry("mace", "Mace", 115),
        entry("staff", "Staff", 140),
        entry("wand", "Wand", 95),
        entry("orb", "Orb", 150),
        entry("idol", "Idol", 160),
        entry("talisman", "Talisman", 130),
        entry("amulet", "Amulet", 135),
        entry("ring", "Ring", 100),
        entry("crown", "Crown", 200),
        entry("pendant", "Pendant", 110),
        entry("charm", "Charm", 85),
        entry("relic", "Relic", 180),
        entry("artifact", "Artifact", 170),
        entry("tome", "Tome", 145),
        entry("scroll", "Scroll", 80),
        entry("crystal", "Crystal", 155),
        entry("gem", "Gem", 120),
        entry("stone", "Stone", 105),
        entry("shard", "Shard", 95),
        entry("coin", "Coin", 90),
        entry("key", "Key", 110),
        entry("mirror", "Mirror", 125),
        entry("lens", "Lens", 115),
        entry("sigil", "Sigil", 140),
        entry("ward", "Ward", 135),
    ]
}

pub fn suffixes() -> Vec<NameEntry> {
    fn entry(id: &str, name: &str, tier_bias: u32) -> NameEntry {
        NameEntry {
            id: id.to_string(),
            name: name.to_string(),
            tier_bias,
        }
    }
    vec![
        // Tier 1
        entry("of_rust", "of Rust", 1),
        entry("of_stone", "of Stone", 1),
        entry("of_wood", "of Wood", 1),
        entry("of_iron", "of Iron", 1),
        entry("of_copper", "of Copper", 1),
        entry("of_bronze", "of Bronze", 1),
        entry("of_silver", "of Silver", 1),
        entry("of_bone", "of Bone", 1),
        entry("of_ash", "of Ash", 1),
        entry("of_dust", "of Dust", 1),
        entry("of_mud", "of Mud", 1),
        entry("of_clay", "of Clay", 1),
        entry("of_sand", "of Sand", 1),
        entry("of_earth", "of Earth", 1),
        entry("of_water", "of Water", 1),
        // Tier 2
        entry("of_dawn", "of Dawn", 2),
        entry("of_shadows", "of Shadows", 2),
        entry("of_the_depths", "of the Depths", 2),
        entry("of_embers", "of Embers", 2),
        entry("of_storms", "of Storms", 2),
        entry("of_winter", "of Winter", 2),
        entry("of_summer", "of Summer", 2),
        entry("of_night", "of Night", 2),
        entry("of_light", "of Light", 2),
        entry("of_flames", "of Flames", 2),
        entry("of_ice", "of Ice", 2),
        entry("of_thunder", "of Thunder", 2),
        entry("of_lightning", "of Lightning", 2),
        entry("of_the_void", "of the Void", 2),
        entry("of_eternity", "of Eternity", 2),
        entry("of_power", "of Power", 2),
        entry("of_wisdom", "of Wisdom", 2),
        entry("of_courage", "of Courage", 2),
        entry("of_vengeance", "of Vengeance", 2),
        entry("of_justice", "of Justice", 2),
        entry("of_chaos", "of Chaos", 2),
        entry("of_order", "of Order", 2),
        entry("of_mystery", "of Mystery", 2),
        entry("of_secrets", "of Secrets", 2),
        entry("of_whispers", "of Whispers", 2),
        entry("of_dreams", "of Dreams", 2),
        entry("of_nightmares", "of Nightmares", 2),
        entry("of_souls", "of Souls", 2),
        entry("of_spirits", "of Spirits", 2),
        // Tier 3
        entry("of_the_ancients", "of the Ancients", 3),
        entry("of_infinity", "of Infinity", 3),
        entry("of_creation", "of Creation", 3),
        entry("of_destruction", "of Destruction", 3),
        entry("of_the_cosmos", "of the Cosmos", 3),
        entry("of_reality", "of Reality", 3),
        entry("of_existence", "of Existence", 3),
        entry("of_transcendence", "of Transcendence", 3),
        entry("of_ascension", "of Ascension", 3),
        entry("of_perfection", "of Perfection", 3),
        entry("of_the_one", "of the One", 3),
    ]
}

pub fn glyphs() -> Vec<String> {
    ["⟡", "†", "Ω", "∆"].iter().map(|s| s.to_string()).collect()
}

pub fn affix_bands() -> BTreeMap<String, AffixBand> {
    fn roll(id: &str, min: i64, max: i64) -> AffixRoll {
        AffixRoll {
            id: id.to_string(),
            min,
            max,
        }
    }
    let mut bands = BTreeMap::new();
    bands.insert(
        "Common".to_string(),
        AffixBand {
            min_affixes: 0,
            max_affixes: 1,
            rolls: vec![roll("burnished", 1, 5)],
        },
    );
    bands.insert(
        "Uncommon".to_string(),
        AffixBand {
            min_affixes: 1,
            max_affixes: 1,
            rolls: vec![roll("burnished", 2, 8)],
        },
    );
    bands.insert(
        "Rare".to_string(),
        AffixBand {
            min_affixes: 1,
            max_affixes: 2,
            rolls: vec![roll("burnished", 3, 10), roll("resonant", 2, 6)],
        },
    );
    bands.insert(
        "Epic".to_string(),
        AffixBand {
            min_affixes: 1,
            max_affixes: 2,
            rolls: vec![roll("burnished", 5, 12), roll("resonant", 4, 10)],
        },
    );
    bands.insert(
        "Mythic".to_string(),
        AffixBand {
            min_affixes: 2,
            max_affixes: 3,
            rolls: vec![roll("burnished", 6, 14), roll("resonant", 5, 12)],
        },
    );
    bands.insert(
        "Ancient".to_string(),
        AffixBand {
            min_affixes: 2,
            max_affixes: 3,
            rolls: vec![roll("burnished", 8, 16), roll("resonant", 6, 14)],
        },
    );
    bands.insert(
        "Relic".to_string(),
        AffixBand {
            min_affixes: 2,
            max_affixes: 4,
            rolls: vec![roll("burnished", 10, 18), roll("resonant", 8, 16)],
        },
    );
    bands.insert(
        "Legendary".to_string(),
        AffixBand {
            min_affixes: 3,
            max_affixes: 4,
            rolls: vec![roll("burnished", 12, 20), roll("resonant", 10, 18)],
        },
    );
    bands.insert(
        "Transcendent".to_string(),
        AffixBand {
            min_affixes: 3,
            max_affixes: 5,
            rolls: vec![roll("burnished", 15, 25), roll("resonant", 12, 20)],
        },
    );
    bands.insert(
        "OneOfOne".to_string(),
        AffixBand {
            min_affixes: 4,
            max_affixes: 5,
            rolls: vec![roll("burnished", 20, 30), roll("resonant", 15, 25)],
        },
    );
    bands
}
