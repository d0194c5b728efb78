//! Statistical properties of the rarity roll over large draw counts.

use descent::core::rng::GameRng;
use descent::items::loot::{LootEngine, RarityRollFlags};
use descent::ContentPack;

fn tally_rolls(flags: RarityRollFlags, draws_per_seed: u32, seeds: u32) -> Vec<u64> {
    let pack = ContentPack::default();
    let engine = LootEngine::new();
    let mut counts = vec![0u64; pack.rarities.len()];
    for i in 0..seeds {
        // Spread seeds across the 32-bit space instead of using a dense
        // low range.
        let mut rng = GameRng::new(i.wrapping_mul(2_654_435_761));
        for _ in 0..draws_per_seed {
            counts[engine.roll_rarity(&mut rng, &pack, flags, 0)] += 1;
        }
    }
    counts
}

#[test]
fn test_unmodified_rolls_converge_to_declared_weights() {
    let pack = ContentPack::default();
    let counts = tally_rolls(RarityRollFlags::default(), 100, 1000);
    let n: u64 = counts.iter().sum();
    assert_eq!(n, 100_000);

    let total_weight: f64 = pack.rarities.iter().map(|r| r.weight).sum();
    for (tier, rarity) in pack.rarities.iter().enumerate() {
        let expected = rarity.weight / total_weight * n as f64;
        let observed = counts[tier] as f64;
        let tolerance = (expected * 0.1).max(300.0);
        assert!(
            (observed - expected).abs() <= tolerance,
            "{}: expected ~{expected:.0}, observed {observed:.0}",
            rarity.name
        );
    }
}

#[test]
fn test_pity_suppresses_common() {
    let plain = tally_rolls(RarityRollFlags::default(), 50, 400);
    let pity = tally_rolls(
        RarityRollFlags {
            pity: true,
            ..Default::default()
        },
        50,
        400,
    );
    assert!(
        pity[0] < plain[0],
        "pity must lower Common frequency: plain {} vs pity {}",
        plain[0],
        pity[0]
    );
}

#[test]
fn test_milestone_shifts_mass_to_high_tiers() {
    let plain = tally_rolls(RarityRollFlags::default(), 50, 400);
    let milestone = tally_rolls(
        RarityRollFlags {
            milestone: true,
            ..Default::default()
        },
        50,
        400,
    );
    let high_plain: u64 = plain[3..].iter().sum();
    let high_milestone: u64 = milestone[3..].iter().sum();
    assert!(
        high_milestone > high_plain,
        "milestone rolls should favor tier 3+: plain {high_plain} vs milestone {high_milestone}"
    );
}

#[test]
fn test_curse_trades_common_for_quality() {
    let plain = tally_rolls(RarityRollFlags::default(), 50, 400);
    let cursed = tally_rolls(
        RarityRollFlags {
            curse: true,
            ..Default::default()
        },
        50,
        400,
    );
    // The suppression covers every tier below 3, not just Common.
    for tier in 0..3 {
        assert!(
            cursed[tier] < plain[tier],
            "curse must lower tier {tier} frequency: plain {} vs cursed {}",
            plain[tier],
            cursed[tier]
        );
    }
    let high_plain: u64 = plain[3..].iter().sum();
    let high_cursed: u64 = cursed[3..].iter().sum();
    assert!(high_cursed > high_plain, "curse must raise high-tier frequency");
}

#[test]
fn test_rarity_step_equipment_shifts_every_roll() {
    let pack = ContentPack::default();
    let engine = LootEngine::new();
    let mut stepped_common = 0u64;
    for i in 0..200u32 {
        let mut rng = GameRng::new(i.wrapping_mul(2_654_435_761));
        for _ in 0..50 {
            if engine.roll_rarity(&mut rng, &pack, RarityRollFlags::default(), 1) == 0 {
                stepped_common += 1;
            }
        }
    }
    assert_eq!(
        stepped_common, 0,
        "a +1 rarity step makes tier 0 unreachable"
    );
}
