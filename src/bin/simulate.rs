//! Headless run simulator CLI.
//!
//! Plays scripted policies against the deterministic core to sanity-check
//! balance and to produce replay/submission artifacts for validator testing.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 1000 random-seed runs
//!   cargo run --bin simulate -- -n 100           # 100 runs
//!   cargo run --bin simulate -- --seed 42        # one reproducible run
//!   cargo run --bin simulate -- --seed-string daily-xyz --json

use descent::core::run_state::{HazardKind, MilestoneChoice, Phase};
use descent::core::session::{RunSession, TurnOutcome};
use descent::items::types::Item;
use descent::ContentPack;
use std::env;

#[derive(Debug, Clone)]
struct SimConfig {
    num_runs: u32,
    seed: Option<u32>,
    seed_string: Option<String>,
    policy: Policy,
    target_depth: u32,
    print_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Push deep, grab treasure, gauntlet every milestone.
    Greedy,
    /// Exit at the first opportunity past the target depth, shrine when hurt.
    Cautious,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            seed_string: None,
            policy: Policy::Cautious,
            target_depth: 10,
            print_json: false,
        }
    }
}

#[derive(Debug, Default)]
struct SimReport {
    runs: u32,
    victories: u32,
    deaths: u32,
    total_score: i64,
    best_score: i64,
    total_depth: u64,
    deepest: u32,
    items_seen: u64,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("DESCENT RUN SIMULATOR");
    println!();
    println!("Configuration:");
    println!("  Runs:         {}", config.num_runs);
    println!("  Policy:       {:?}", config.policy);
    println!("  Target depth: {}", config.target_depth);
    if let Some(seed) = config.seed {
        println!("  Seed:         {}", seed);
    }
    if let Some(s) = &config.seed_string {
        println!("  Seed string:  {}", s);
    }
    println!();

    let mut report = SimReport::default();
    let single_seeded = config.seed.is_some() || config.seed_string.is_some();
    let runs = if single_seeded { 1 } else { config.num_runs };

    let mut last_session = None;
    for _ in 0..runs {
        let session = play_run(&config);
        tally(&mut report, &session);
        last_session = Some(session);
    }

    print_report(&report);

    if config.print_json {
        if let Some(session) = &last_session {
            match session.submission() {
                Ok(submission) => match submission.to_json() {
                    Ok(json) => println!("\n{json}"),
                    Err(err) => eprintln!("failed to serialize submission: {err}"),
                },
                Err(err) => eprintln!("failed to build submission: {err}"),
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--seed-string" => {
                if i + 1 < args.len() {
                    config.seed_string = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-d" | "--depth" => {
                if i + 1 < args.len() {
                    config.target_depth = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--policy" => {
                if i + 1 < args.len() {
                    config.policy = match args[i + 1].as_str() {
                        "greedy" => Policy::Greedy,
                        _ => Policy::Cautious,
                    };
                    i += 1;
                }
            }
            "--json" => {
                config.print_json = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("unknown argument: {other}");
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn print_help() {
    println!("Usage: simulate [OPTIONS]");
    println!();
    println!("  -n, --runs N         number of runs (default 1000)");
    println!("  -s, --seed N         fixed numeric seed (implies one run)");
    println!("      --seed-string S  seed from a string (implies one run)");
    println!("  -d, --depth N        depth after which the policy exits (default 10)");
    println!("      --policy P       greedy | cautious (default cautious)");
    println!("      --json           print the last run's submission payload");
}

fn play_run(config: &SimConfig) -> RunSession {
    let pack = ContentPack::default();
    let mut session = match (&config.seed_string, config.seed) {
        (Some(s), _) => RunSession::from_seed_string(s, pack, false),
        (None, Some(seed)) => RunSession::new(seed, pack, false),
        (None, None) => RunSession::with_random_seed(pack),
    };

    // Hard cap so a pathological policy cannot loop forever.
    for _ in 0..500 {
        let room = match session.enter_room() {
            Ok(room) => room,
            Err(_) => break,
        };

        if room.exit_available && room.depth >= config.target_depth {
            let _ = session.choose_exit();
            break;
        }

        let outcome = if room.milestone {
            let choice = match config.policy {
                Policy::Greedy => MilestoneChoice::Gauntlet,
                Policy::Cautious => {
                    if session.state().hp < session.state().max_hp {
                        MilestoneChoice::Altar
                    } else {
                        MilestoneChoice::Continue
                    }
                }
            };
            session.choose_milestone(choice)
        } else if let Some(hazard) = room.hazard {
            match (config.policy, hazard) {
                (Policy::Greedy, HazardKind::Treasure)
                | (Policy::Greedy, HazardKind::Curse)
                | (Policy::Cautious, HazardKind::Beacon) => session.choose_hazard(hazard),
                (Policy::Cautious, HazardKind::Shrine)
                    if session.state().hp < session.state().max_hp =>
                {
                    session.choose_hazard(hazard)
                }
                _ => session.choose_continue(),
            }
        } else {
            session.choose_continue()
        };

        match outcome {
            Ok(TurnOutcome::Loot { items }) => {
                for item in items {
                    route_item(&mut session, item);
                }
            }
            Ok(TurnOutcome::Died { .. }) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        if session.state().hp == 1 {
            let _ = session.use_field_bandage();
        }
    }
    session
}

/// Equip effect-bearing artifacts into free slots; bank everything else.
fn route_item(session: &mut RunSession, item: Item) {
    if !item.effects().is_empty() {
        for slot in 0..2 {
            if session.ledger().is_slot_free(slot) {
                if let Ok(displaced) = session.equip(item, slot) {
                    if let Some(old) = displaced {
                        session.bank(old);
                    }
                    return;
                }
                return;
            }
        }
    }
    session.bank(item);
}

fn tally(report: &mut SimReport, session: &RunSession) {
    let state = session.state();
    report.runs += 1;
    match state.phase {
        Phase::Victory => report.victories += 1,
        Phase::Dead => report.deaths += 1,
        Phase::InRun => {}
    }
    report.total_score += state.score;
    report.best_score = report.best_score.max(state.score);
    report.total_depth += state.depth as u64;
    report.deepest = report.deepest.max(state.depth);
    report.items_seen +=
        (session.ledger().banked_items().len() + session.ledger().equipped_items().len()) as u64;
}

fn print_report(report: &SimReport) {
    let runs = report.runs.max(1);
    println!("Results:");
    println!(
        "  Victories:   {} ({:.1}%)",
        report.victories,
        report.victories as f64 * 100.0 / runs as f64
    );
    println!("  Deaths:      {}", report.deaths);
    println!("  Avg score:   {}", report.total_score / runs as i64);
    println!("  Best score:  {}", report.best_score);
    println!(
        "  Avg depth:   {:.1}",
        report.total_depth as f64 / runs as f64
    );
    println!("  Deepest:     {}", report.deepest);
    println!("  Items found: {}", report.items_seen);
}
