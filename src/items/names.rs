//! Procedural item names: tier-biased vocabulary selection and identity
//! hashing.
//!
//! A name is prefix + base + suffix, optionally decorated with a glyph at
//! Epic-or-better rarity. The identity hash is derived only from depth, roll
//! index, and the chosen component ids, never from wall-clock time, so two
//! identical inputs always produce the same item.

use super::types::ItemComponents;
use crate::content::pack::ContentPack;
use crate::core::rng::GameRng;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedName {
    pub name: String,
    pub hash: String,
    pub base_value: i64,
    pub components: ItemComponents,
}

/// Weighted pick by cumulative subtraction in input order, falling back to
/// the first entry when floating-point rounding keeps the running total
/// positive. Always consumes exactly one draw.
pub(crate) fn pick_weighted<'a, T>(
    rng: &mut GameRng,
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
) -> &'a T {
    let total: f64 = items.iter().map(&weight).sum();
    let mut remaining = rng.next_float(0.0, total);
    for item in items {
        remaining -= weight(item);
        if remaining <= 0.0 {
            return item;
        }
    }
    &items[0]
}

/// Tier-biased weight: entries whose bias fits under the rarity's tier
/// preference get weight `bias * 2`, everything else weight 1. High rarities
/// prefer dramatic vocabulary but never exclude the mundane.
fn tier_weight(tier_bias: u32, rarity_tier: usize) -> f64 {
    let preference = (rarity_tier as f64 / 3.0).min(3.0);
    if tier_bias as f64 <= preference {
        tier_bias as f64 * 2.0
    } else {
        1.0
    }
}

/// 32-bit string hash (`h*31 + unit` with ToInt32 wrap), absolute value,
/// rendered as at most 8 hex chars. Shared with seed-string hashing so a
/// validator needs exactly one hash routine.
pub(crate) fn hash32(s: &str) -> String {
    let hex = format!("{:x}", crate::core::rng::hash_seed_string(s));
    hex.chars().take(8).collect()
}

/// Generate the name, components, and identity hash for one procedural item.
///
/// Draw order (part of the replay contract): prefix, base, suffix, then for
/// rarity tier >= 3 one glyph-chance draw and, on success, one glyph pick.
pub fn generate_name(
    rng: &mut GameRng,
    pack: &ContentPack,
    rarity_tier: usize,
    depth: u32,
    roll_index: u32,
) -> GeneratedName {
    let prefix = pick_weighted(rng, &pack.prefixes, |e| tier_weight(e.tier_bias, rarity_tier));
    let base = pick_weighted(rng, &pack.bases, |_| 1.0);
    let suffix = pick_weighted(rng, &pack.suffixes, |e| tier_weight(e.tier_bias, rarity_tier));

    let mut glyph = None;
    if rarity_tier >= 3 {
        let glyph_chance = 0.10 + 0.05 * (rarity_tier as f64 - 3.0);
        if rng.next() < glyph_chance {
            glyph = rng.choice(&pack.glyphs).cloned();
        }
    }

    let mut name = format!("{} {} {}", prefix.name, base.name, suffix.name);
    if let Some(g) = &glyph {
        name.push(' ');
        name.push_str(g);
    }

    let hash_input = format!(
        "{}:{}:{}:{}:{}:{}",
        depth,
        roll_index,
        prefix.id,
        base.id,
        suffix.id,
        glyph.as_deref().unwrap_or("-"),
    );

    GeneratedName {
        name,
        hash: hash32(&hash_input),
        base_value: base.base_value,
        components: ItemComponents {
            prefix: prefix.id.clone(),
            base: base.id.clone(),
            suffix: suffix.id.clone(),
            glyph,
        },
    }
}
