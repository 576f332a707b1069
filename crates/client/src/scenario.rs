//! Builds a populated simulation from an ASCII map.
//!
//! Map glyphs: `#` wall, `.` floor, `@` player, `M` patrolling monster,
//! `+` health pickup, `*` powerup.

use ai_runtime::providers::ai::presets;
use ai_runtime::providers::fsm::presets as fsm_presets;
use ai_runtime::{Actor, ActorFlags, Brain, Separation, Simulation, SteeringProfile, World};
use anyhow::{Context, Result, bail};
use behavior_tree::Arbitration;
use game_core::{AiConfig, Grid, Position};
use tracing::{debug, info};

use crate::config::SimConfig;

pub const DEFAULT_MAP: &str = "\
####################
#@.....#...........#
#......#....M......#
#..+...#.......*...#
#......####..#######
#..................#
#....M.....#.......#
#..........#...+...#
#######....#.......#
#..........#....M..#
#...*..............#
####################";

const MARKERS: &str = "@M+*";
const PICKUP_AMOUNT: f32 = 25.0;
const SIGHT: f32 = 6.0;

/// Roles cycled through when spawning extra monsters.
#[derive(Clone, Copy, Debug)]
enum Archetype {
    Berserker,
    Scavenger,
    Utility,
    Healer,
    Swarm,
}

const ARCHETYPES: [Archetype; 5] = [
    Archetype::Berserker,
    Archetype::Scavenger,
    Archetype::Utility,
    Archetype::Healer,
    Archetype::Swarm,
];

pub fn load_map(config: &SimConfig) -> Result<String> {
    match &config.map_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display())),
        None => Ok(DEFAULT_MAP.to_owned()),
    }
}

/// Parses `map`, spawns everything it marks plus `config.monsters` extra
/// monsters and points the flow field at the player.
pub fn build(map: &str, config: &SimConfig) -> Result<Simulation> {
    let (grid, markers) = Grid::from_ascii_with_markers(map, MARKERS)?;
    let ai_config = AiConfig::default().with_flow_step_count(config.flow_steps);
    let world = World::new(grid, config.seed).with_config(ai_config);
    let mut sim = Simulation::new(world).with_dt(config.dt);

    let mut player = None;
    for (position, glyph) in markers {
        match glyph {
            '@' => {
                if player.is_some() {
                    bail!("map has more than one player at {position}");
                }
                player = Some(sim.world_mut().spawn_actor(Actor::player(position))?);
            }
            'M' => {
                sim.spawn(
                    Actor::monster(position),
                    fsm_presets::patrol_monster(position, SIGHT, 40.0)?,
                )?;
            }
            '+' => {
                sim.world_mut()
                    .spawn_pickup(ai_runtime::PickupKind::Health, position, PICKUP_AMOUNT);
            }
            '*' => {
                sim.world_mut()
                    .spawn_pickup(ai_runtime::PickupKind::Powerup, position, PICKUP_AMOUNT);
            }
            _ => {}
        }
    }

    for (i, archetype) in ARCHETYPES.iter().cycle().take(config.monsters).enumerate() {
        let position = sim.world_mut().random_free_tile()?;
        spawn_archetype(&mut sim, *archetype, position, config.seed.wrapping_add(i as u64))?;
        debug!(?archetype, %position, "monster spawned");
    }

    let target = player.and_then(|id| sim.world().actor(id)).map(|actor| actor.position);
    sim.set_flow_target(target);

    info!(
        actors = sim.world().actor_count(),
        flow_target = ?target,
        "scenario ready"
    );
    Ok(sim)
}

fn spawn_archetype(
    sim: &mut Simulation,
    archetype: Archetype,
    position: Position,
    seed: u64,
) -> Result<()> {
    let actor = Actor::monster(position);
    match archetype {
        Archetype::Berserker => {
            sim.spawn_with(actor, |a| Ok(Brain::Tree(presets::berserker(a, SIGHT)?)))?;
        }
        Archetype::Scavenger => {
            sim.spawn_with(actor, |a| {
                Ok(Brain::Tree(presets::scavenger(a, SIGHT * 2.0, 60.0)?))
            })?;
        }
        Archetype::Utility => {
            sim.spawn_with(actor, |a| {
                Ok(Brain::Tree(presets::utility_monster(
                    a,
                    SIGHT,
                    Arbitration::Stochastic,
                    true,
                    seed,
                )?))
            })?;
        }
        Archetype::Healer => {
            sim.spawn(
                actor.with_heal_cooldown(4),
                fsm_presets::healer_companion(15.0, 60.0)?,
            )?;
        }
        Archetype::Swarm => {
            let separation = Separation {
                threshold: AiConfig::DEFAULT_SEPARATION_THRESHOLD,
                force: AiConfig::DEFAULT_SEPARATION_FORCE,
            };
            sim.world_mut().spawn_actor(
                actor
                    .with_flags(ActorFlags::HIVE)
                    .with_motion(SteeringProfile::flow_follower(separation)),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_spawns_markers_and_extras() {
        let config = SimConfig::default();
        let sim = build(DEFAULT_MAP, &config).unwrap();

        let players = sim
            .world()
            .actors()
            .filter(|a| a.flags.contains(ActorFlags::PLAYER))
            .count();
        assert_eq!(players, 1);
        assert_eq!(sim.world().actor_count(), 1 + 3 + config.monsters);
        assert_eq!(sim.world().pickups().count(), 4);
        assert_eq!(sim.fields().target(), Some(Position::new(1, 1)));
    }

    #[test]
    fn two_players_are_rejected() {
        let map = "#####\n#@.@#\n#####";
        assert!(build(map, &SimConfig::default()).is_err());
    }

    #[test]
    fn runs_without_a_player() {
        let map = "#####\n#.M.#\n#####";
        let config = SimConfig {
            monsters: 0,
            ..SimConfig::default()
        };
        let mut sim = build(map, &config).unwrap();
        assert!(sim.fields().flow().is_none());
        sim.step();
        assert_eq!(sim.tick_count(), 1);
    }
}
