use serde::{Deserialize, Serialize};

/// Closed set of equipment effect kinds.
///
/// Additive kinds sum across equipped items, multiplicative kinds multiply,
/// charge kinds sum into spendable pools. The serde ids double as the wire
/// ids in content packs and replay logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    RiskAdd,
    RiskMult,
    ExitAdd,
    ExitMult,
    RarityStep,
    LootChanceAdd,
    GreedDeltaOnContinue,
    HealOnMilestone,
    ReviveCharges,
    SkipRoomCharges,
    HealCharges,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: EffectKind,
    pub magnitude: f64,
}

/// One rarity tier. Position in the content-pack table is the tier index;
/// lower index means more common.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityDef {
    pub name: String,
    pub weight: f64,
    pub value_multiplier: f64,
    pub color: String,
}

/// A rolled affix: cosmetic id plus a value bonus in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub id: String,
    pub value: i64,
}

/// Vocabulary ids a procedural item was assembled from. Together with depth
/// and roll index these fully determine the item's identity hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemComponents {
    pub prefix: String,
    pub base: String,
    pub suffix: String,
    pub glyph: Option<String>,
}

/// An item a run can produce.
///
/// Fixed artifacts are curated in the content pack and are the only items
/// that grant effects. Procedural items are pure value: generated name,
/// affixes, and worth, with no gameplay effects ever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    FixedArtifact {
        id: String,
        name: String,
        rarity: String,
        effects: Vec<Effect>,
        value: i64,
        lore: String,
    },
    Procedural {
        hash: String,
        name: String,
        rarity: String,
        base_value: i64,
        affixes: Vec<Affix>,
        value: i64,
        components: ItemComponents,
    },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::FixedArtifact { name, .. } => name,
            Item::Procedural { name, .. } => name,
        }
    }

    pub fn rarity(&self) -> &str {
        match self {
            Item::FixedArtifact { rarity, .. } => rarity,
            Item::Procedural { rarity, .. } => rarity,
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Item::FixedArtifact { value, .. } => *value,
            Item::Procedural { value, .. } => *value,
        }
    }

    /// Stable identity: artifact id or procedural hash.
    pub fn identity(&self) -> &str {
        match self {
            Item::FixedArtifact { id, .. } => id,
            Item::Procedural { hash, .. } => hash,
        }
    }

    /// Effects granted while equipped. Procedural items never have any.
    pub fn effects(&self) -> &[Effect] {
        match self {
            Item::FixedArtifact { effects, .. } => effects,
            Item::Procedural { .. } => &[],
        }
    }
}
