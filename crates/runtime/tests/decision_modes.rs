use ai_runtime::providers::ai::presets;
use ai_runtime::providers::fsm::presets as fsm_presets;
use ai_runtime::{Actor, Brain, Simulation, World};
use behavior_tree::Arbitration;
use game_core::{Grid, Position};

fn open_simulation(seed: u64) -> Simulation {
    Simulation::new(World::new(Grid::new(12, 12).unwrap(), seed))
}

/// A waypoint walker follows a closed two-stop route back and forth.
#[test]
fn waypoint_walker_loops_its_route() {
    let mut sim = open_simulation(1);
    let route = sim
        .world_mut()
        .add_waypoint_loop(&[Position::new(1, 1), Position::new(4, 1)])
        .unwrap();
    let walker = sim
        .spawn_with(Actor::monster(Position::new(1, 1)), |actor| {
            Ok(presets::waypoint_walker(actor, route[0])?.into())
        })
        .unwrap();

    for _ in 0..3 {
        sim.step();
    }
    assert_eq!(sim.world().actor(walker).unwrap().position, Position::new(4, 1));

    for _ in 0..3 {
        sim.step();
    }
    assert_eq!(sim.world().actor(walker).unwrap().position, Position::new(1, 1));
}

/// A healer companion adopts the nearest teammate, walks toward it and
/// heals it once per cooldown cycle.
#[test]
fn healer_companion_heals_on_cooldown() {
    let mut sim = open_simulation(2);
    let healer = sim
        .spawn(
            Actor::monster(Position::new(1, 1)).with_heal_cooldown(3),
            fsm_presets::healer_companion(10.0, 50.0).unwrap(),
        )
        .unwrap();
    let master = sim
        .world_mut()
        .spawn_actor(Actor::monster(Position::new(6, 1)).with_hitpoints(20.0))
        .unwrap();

    for _ in 0..3 {
        sim.step();
    }
    assert_eq!(sim.world().actor(healer).unwrap().master, Some(master));
    assert_eq!(sim.world().actor(master).unwrap().hitpoints, 30.0);

    for _ in 0..4 {
        sim.step();
    }
    assert_eq!(sim.world().actor(master).unwrap().hitpoints, 40.0);
    assert!(sim.world().actor(healer).unwrap().position.x > 1);
}

/// Behavior trees and state machines share one world and one tick.
#[test]
fn mixed_brains_fight_the_same_player() {
    let mut sim = open_simulation(3);
    let player = sim
        .world_mut()
        .spawn_actor(Actor::player(Position::new(6, 6)).with_hitpoints(1000.0))
        .unwrap();
    sim.spawn_with(Actor::monster(Position::new(2, 6)), |actor| {
        Ok(Brain::Tree(presets::berserker(actor, 8.0)?))
    })
    .unwrap();
    sim.spawn(
        Actor::monster(Position::new(6, 2)),
        fsm_presets::patrol_monster(Position::new(6, 2), 6.0, 10.0).unwrap(),
    )
    .unwrap();

    let mut attacks = 0;
    for _ in 0..10 {
        attacks += sim.step().attacks();
    }
    assert!(attacks >= 2);
    assert!(sim.world().actor(player).unwrap().hitpoints < 1000.0);
}

/// Seeded stochastic arbitration replays identically.
#[test]
fn stochastic_utility_is_reproducible() {
    fn run(seed: u64) -> Vec<Position> {
        let mut sim = open_simulation(seed);
        for (i, x) in [2, 5, 9].into_iter().enumerate() {
            sim.spawn_with(Actor::monster(Position::new(x, 3)), |actor| {
                Ok(presets::utility_monster(
                    actor,
                    6.0,
                    Arbitration::Stochastic,
                    true,
                    seed + i as u64,
                )?
                .into())
            })
            .unwrap();
        }
        sim.world_mut()
            .spawn_actor(Actor::player(Position::new(5, 9)))
            .unwrap();

        for _ in 0..25 {
            sim.step();
        }
        sim.world().actors().map(|actor| actor.position).collect()
    }

    assert_eq!(run(42), run(42));
}
