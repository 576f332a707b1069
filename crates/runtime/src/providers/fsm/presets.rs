//! Ready-made state machines.
//!
//! ```text
//! patrol_monster()
//!   patrol ──enemy & hurt──▶ flee ──no enemy near──▶ heal
//!     │  ▲                     ▲                       │
//!   enemy│ no enemy          hurt                healthy│
//!     ▼  │                     │                       ▼
//!   move_to_enemy ─────────────┘                    patrol
//!
//! healer_companion()
//!   find_master ──has master──▶ move_to_ally ◀──cooling──┐
//!        ▲                        │                      │
//!        └────master lost─────────┴──master hurt & ready──▶ heal_master
//! ```

use game_core::Position;

use super::StateMachine;
use super::states::{FindMaster, FleeFromEnemy, Heal, HealMaster, MoveToAlly, MoveToEnemy, Patrol};
use super::transitions::{
    EnemyAvailable, HasMaster, HealCooledDown, HitpointsLessThan, MasterHitpointsLessThan, and,
    not,
};
use crate::error::Result;

/// Wander radius around the patrol anchor.
pub const PATROL_RADIUS: f32 = 3.0;
/// Hit points regenerated per turn while recovering.
pub const REGEN_PER_TURN: f32 = 5.0;

/// Patrols around `anchor`, chases enemies within `chase_radius`, flees
/// below `flee_below` hit points and regenerates once out of reach.
///
/// Giving up a chase and ending a flight use wider radii than starting one,
/// so the machine does not oscillate at the boundary.
pub fn patrol_monster(anchor: Position, chase_radius: f32, flee_below: f32) -> Result<StateMachine> {
    let give_up_radius = chase_radius + 2.0;
    let safe_radius = chase_radius + 4.0;

    let mut fsm = StateMachine::new();
    let patrol = fsm.add_state(Patrol::new(anchor, PATROL_RADIUS));
    let chase = fsm.add_state(MoveToEnemy);
    let flee = fsm.add_state(FleeFromEnemy);
    let heal = fsm.add_state(Heal::new(REGEN_PER_TURN));

    fsm.add_transition(
        patrol,
        flee,
        and(EnemyAvailable::new(chase_radius), HitpointsLessThan::new(flee_below)),
    )?;
    fsm.add_transition(patrol, chase, EnemyAvailable::new(chase_radius))?;
    fsm.add_transition(patrol, heal, HitpointsLessThan::new(flee_below))?;

    fsm.add_transition(chase, flee, HitpointsLessThan::new(flee_below))?;
    fsm.add_transition(chase, patrol, not(EnemyAvailable::new(give_up_radius)))?;

    fsm.add_transition(flee, heal, not(EnemyAvailable::new(safe_radius)))?;

    fsm.add_transition(heal, flee, EnemyAvailable::new(chase_radius))?;
    fsm.add_transition(heal, patrol, not(HitpointsLessThan::new(flee_below)))?;

    Ok(fsm)
}

/// Follows the nearest teammate and heals it by `heal_amount` whenever it
/// drops below `master_below` and the heal cooldown allows.
pub fn healer_companion(heal_amount: f32, master_below: f32) -> Result<StateMachine> {
    let mut fsm = StateMachine::new();
    let find = fsm.add_state(FindMaster);
    let follow = fsm.add_state(MoveToAlly);
    let heal = fsm.add_state(HealMaster::new(heal_amount));

    fsm.add_transition(find, follow, HasMaster)?;

    fsm.add_transition(follow, find, not(HasMaster))?;
    fsm.add_transition(
        follow,
        heal,
        and(MasterHitpointsLessThan::new(master_below), HealCooledDown),
    )?;

    fsm.add_transition(heal, find, not(HasMaster))?;
    fsm.add_transition(heal, follow, not(HealCooledDown))?;

    Ok(fsm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::AiContext;
    use crate::world::{Actor, World};
    use game_core::{Action, EntityId, Grid};

    fn context(actor: Actor) -> (AiContext, EntityId) {
        let mut world = World::new(Grid::new(16, 16).unwrap(), 8);
        let id = world.spawn_actor(actor).unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        (ctx, id)
    }

    #[test]
    fn patrol_monster_engages_and_disengages() {
        let anchor = Position::new(5, 5);
        let (mut ctx, _) = context(Actor::monster(anchor));
        let mut fsm = patrol_monster(anchor, 3.0, 40.0).unwrap();

        let player = ctx.world.spawn_actor(Actor::player(Position::new(7, 5))).unwrap();
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("move_to_enemy"));

        fsm.tick(&mut ctx);
        assert_eq!(ctx.action(), Action::MoveRight);

        ctx.world.actor_mut(player).unwrap().position = Position::new(15, 15);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("patrol"));
    }

    #[test]
    fn patrol_monster_flees_then_recovers() {
        let anchor = Position::new(5, 5);
        let (mut ctx, me) = context(Actor::monster(anchor).with_hitpoints(30.0));
        let mut fsm = patrol_monster(anchor, 3.0, 40.0).unwrap();

        let player = ctx.world.spawn_actor(Actor::player(Position::new(5, 7))).unwrap();
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("flee_from_enemy"));

        fsm.tick(&mut ctx);
        assert_eq!(ctx.action(), Action::MoveUp);

        ctx.world.remove_actor(player);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("heal"));

        for _ in 0..3 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_name(), Some("patrol"));
        assert!(ctx.world.actor(me).unwrap().hitpoints >= 40.0);
    }

    #[test]
    fn healer_companion_cycles_between_follow_and_heal() {
        let (mut ctx, me) = context(Actor::monster(Position::new(1, 1)).with_heal_cooldown(3));
        let master = ctx
            .world
            .spawn_actor(Actor::monster(Position::new(6, 1)).with_hitpoints(20.0))
            .unwrap();
        let mut fsm = healer_companion(10.0, 50.0).unwrap();

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("move_to_ally"));
        assert_eq!(ctx.world.actor(me).unwrap().master, Some(master));

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("heal_master"));

        fsm.tick(&mut ctx);
        assert_eq!(ctx.world.actor(master).unwrap().hitpoints, 30.0);
        assert_eq!(fsm.current_name(), Some("move_to_ally"));

        ctx.world.remove_actor(master);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_name(), Some("find_master"));
    }
}
