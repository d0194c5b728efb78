// Run bootstrap
pub const STARTING_HP: u32 = 3;
pub const STARTING_MAX_HP: u32 = 3;
pub const SAFE_ROOMS_AT_START: u32 = 2;
pub const GREED_MAX: u32 = 10;

// Loot pacing
pub const BASE_LOOT_CHANCE: f64 = 0.18;
pub const CURSE_LOOT_BONUS: f64 = 0.15;

// Risk fairness: sub-cutover risk accumulates instead of rolling, so a
// persistently low risk still guarantees death eventually.
pub const RISK_ACCUMULATOR_CUTOVER: f64 = 15.0;
pub const RISK_ACCUMULATOR_TRIGGER: f64 = 100.0;
pub const RISK_CLAMP_MAX: f64 = 95.0;
pub const EXIT_CLAMP_MAX: f64 = 95.0;

// Milestone rooms
pub const MILESTONE_INTERVAL: u32 = 5;
pub const GAUNTLET_RISK_BONUS: f64 = 15.0;
pub const GAUNTLET_LOOT_ROLLS: u32 = 2;
pub const ALTAR_GREED_COST: u32 = 2;
pub const ALTAR_HEAL: u32 = 1;
pub const ALTAR_EXIT_BONUS: f64 = 10.0;

// Standard-room hazards
pub const TRAP_DAMAGE: u32 = 1;
pub const SHRINE_GREED_COST: u32 = 2;
pub const SHRINE_HEAL: u32 = 1;
pub const TREASURE_PILE_MIN: i64 = 75;
pub const TREASURE_PILE_MAX: i64 = 200;

// Scoring
pub const GREED_SCORE_STEP: f64 = 0.1;

// Consumables granted at run start
pub const STARTING_SMOKE_BOMBS: u32 = 0;
pub const STARTING_FIELD_BANDAGES: u32 = 1;

// Bumped whenever default content changes shape; submissions carry it so the
// validator can reject runs played against a different pack.
pub const CONTENT_VERSION: &str = "1.0.0";
