//! Headless grid-world agent simulation.
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (`SIM_*`, optionally via `.env`)
//! 2. Logging to stderr and an optional log file
//! 3. A populated [`ai_runtime::Simulation`] built from an ASCII map
//!
//! It then runs the configured number of ticks, logs one summary line per
//! tick and prints the final influence fields and actor layout to stdout.
//!
//! # Examples
//!
//! ```bash
//! SIM_TICKS=100 SIM_MONSTERS=10 RUST_LOG=ai_runtime=debug cargo run -p dungeon-ai
//! ```

mod config;
mod dump;
mod logging;
mod scenario;

use ai_runtime::{ActorFlags, influence};
use anyhow::Result;
use game_core::Team;

use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        seed = config.seed,
        ticks = config.ticks,
        dt = config.dt,
        monsters = config.monsters,
        "Starting simulation"
    );

    let map = scenario::load_map(&config)?;
    let mut sim = scenario::build(&map, &config)?;

    for _ in 0..config.ticks {
        let report = sim.step();
        let kills = report.kills();
        tracing::info!(
            tick = report.tick,
            moves = report.moves(),
            attacks = report.attacks(),
            kills = kills.len(),
            failed = report.failed.len(),
            alive = sim.world().actor_count(),
            "tick"
        );

        let player_alive = sim
            .world()
            .actors()
            .any(|actor| actor.flags.contains(ActorFlags::PLAYER));
        if !player_alive {
            tracing::info!(tick = report.tick, "player defeated, stopping early");
            break;
        }
    }

    let world = sim.world();
    println!("== actors after {} ticks ==", sim.tick_count());
    print!("{}", dump::render_actors(world));

    println!("\n== approach map: player ==");
    let approach = influence::approach_map(world, Team::PLAYER);
    print!("{}", dump::render_field(world.grid(), &approach));

    println!("\n== flee map: player ==");
    let flee = influence::flee_map(world, Team::PLAYER, world.config().flee_multiplier);
    print!("{}", dump::render_field(world.grid(), &flee));

    println!("\n== hive pack map ==");
    let hive = influence::hive_pack_map(world);
    print!("{}", dump::render_field(world.grid(), &hive));

    println!("\n== pack pressure map ==");
    let pressure = dump::pack_pressure(world)?;
    print!("{}", dump::render_field(world.grid(), &pressure));

    if let Some(target_map) = sim.fields().target_map() {
        println!("\n== flow target map ==");
        print!("{}", dump::render_field(world.grid(), target_map));
    }

    Ok(())
}
