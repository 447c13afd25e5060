//! SKYSHIELD command-line host.
//!
//! Usage:
//!   skyshield --variant tactical --seed 7
//!   skyshield --ruleset my_rules.json --realtime --max-ticks 3600
//!   RUST_LOG=debug skyshield --json

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use skyshield_app::autopilot;
use skyshield_app::runner::{self, RunReport};
use skyshield_core::constants::TICK_RATE;
use skyshield_core::enums::Variant;
use skyshield_scoreboard::Scoreboard;
use skyshield_sim::{Ruleset, SimConfig};

#[derive(Parser)]
#[command(name = "skyshield")]
#[command(about = "Run a SKYSHIELD air-defense game with an autopilot gunner")]
struct Args {
    /// Preset ruleset: classic, tactical, aerodynamic or elite
    #[arg(long, default_value = "classic")]
    variant: Variant,

    /// Load the ruleset from a JSON file instead of a preset
    #[arg(long)]
    ruleset: Option<PathBuf>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks if the turret is still standing
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Pace the game loop in wall-clock time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Gunner driving the turret
    #[arg(long, default_value = "sentry")]
    gunner: String,

    /// Name recorded on the scoreboard
    #[arg(long, default_value = "AUTOPILOT")]
    pilot: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let ruleset = match &args.ruleset {
        Some(path) => Ruleset::load(path)
            .with_context(|| format!("failed loading ruleset {}", path.display()))?,
        None => Ruleset::preset(args.variant),
    };
    let config = SimConfig {
        seed: args.seed,
        tick_rate: args.tick_rate,
        ruleset,
    };
    config.validate().context("invalid simulation config")?;

    let mut gunner = autopilot::create_gunner(&args.gunner)
        .ok_or_else(|| anyhow!("unknown gunner '{}'", args.gunner))?;

    log::info!(
        "Running {} ruleset, seed {}, {} Hz{}",
        config.ruleset.name,
        config.seed,
        config.tick_rate,
        if args.realtime { ", real time" } else { "" }
    );
    let report = if args.realtime {
        runner::run_realtime(config, gunner.as_mut(), args.max_ticks)?
    } else {
        runner::run_headless(config, gunner.as_mut(), args.max_ticks)?
    };

    let mut scoreboard = Scoreboard::new();
    let rank = scoreboard
        .submit(&args.pilot, &report.summary)
        .context("failed recording score")?;

    if args.json {
        let out = serde_json::json!({
            "report": report,
            "rank": rank,
            "stats": scoreboard.stats(args.pilot.trim()),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("failed encoding report")?
        );
    } else {
        print_report(&args.pilot, &report, &scoreboard);
    }
    Ok(())
}

fn print_report(pilot: &str, report: &RunReport, scoreboard: &Scoreboard) {
    let s = &report.summary;
    println!("=== {} ===", if report.game_over { "GAME OVER" } else { "TIME UP" });
    println!("  Ruleset:    {} (seed {})", report.ruleset, report.seed);
    println!("  Gunner:     {}", report.gunner);
    println!("  Score:      {}", s.score);
    println!("  Kills:      {}", s.kills);
    println!("  Waves:      {}", s.waves_survived);
    println!("  Survived:   {:.1}s ({} ticks)", s.survival_secs, report.ticks);
    if let Some(stats) = scoreboard.stats(pilot.trim()) {
        println!(
            "  Accuracy:   {:.1}% ({}/{})",
            stats.accuracy() * 100.0,
            stats.shots_hit,
            stats.shots_fired
        );
    }
}
