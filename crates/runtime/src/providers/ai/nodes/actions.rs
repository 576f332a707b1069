//! Action nodes for agent behavior trees.
//!
//! Action nodes write the agent's intent for this tick, or act on the world
//! directly (consuming pickups, advancing a waypoint). Movement leaves only
//! choose a direction; walls and occupants are handled when the action is
//! resolved.

use behavior_tree::utility::weighted_index;
use behavior_tree::{Behavior, Status};
use game_core::{Action, BbHandle, BlackboardError, EntityId, Position};
use rand::Rng;

use crate::providers::ai::AiContext;
use crate::world::{Actor, PickupKind};

/// Walks toward the entity stored in `target`.
///
/// - `Running` while not on the target's tile (a move is issued)
/// - `Success` once co-located (no move is issued)
/// - `Failure` if the slot is unset or the target no longer exists
pub struct MoveToEntity {
    target: BbHandle<EntityId>,
}

impl MoveToEntity {
    pub fn new(target: BbHandle<EntityId>) -> Self {
        Self { target }
    }
}

impl Behavior<AiContext> for MoveToEntity {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let (Some(from), Some(to)) = (ctx.position(), ctx.entity_position(self.target)) else {
            return Status::Failure;
        };
        if from == to {
            return Status::Success;
        }
        ctx.set_action(Action::move_towards(from, to));
        Status::Running
    }
}

/// Steps directly away from the entity stored in `target`.
///
/// `Running` while the target exists, `Failure` otherwise.
pub struct Flee {
    target: BbHandle<EntityId>,
}

impl Flee {
    pub fn new(target: BbHandle<EntityId>) -> Self {
        Self { target }
    }
}

impl Behavior<AiContext> for Flee {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let (Some(from), Some(threat)) = (ctx.position(), ctx.entity_position(self.target)) else {
            return Status::Failure;
        };
        ctx.set_action(Action::move_away(from, threat));
        Status::Running
    }
}

/// Wanders randomly around an anchor, walking back whenever it strays
/// further than `radius` tiles.
///
/// The anchor is the actor's tile when the node is built. Always `Running`
/// while the anchor is readable.
pub struct Patrol {
    pub radius: f32,
    anchor: BbHandle<Position>,
}

impl Patrol {
    /// Builds the node and pins the anchor to `actor`'s current tile.
    pub fn anchored(
        actor: &mut Actor,
        anchor: BbHandle<Position>,
        radius: f32,
    ) -> Result<Self, BlackboardError> {
        actor.blackboard.set(anchor, actor.position)?;
        Ok(Self { radius, anchor })
    }
}

impl Behavior<AiContext> for Patrol {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let (Some(from), Some(anchor)) = (ctx.position(), ctx.read(self.anchor)) else {
            return Status::Failure;
        };

        let action = if from.distance(anchor) > self.radius {
            Action::move_towards(from, anchor)
        } else {
            let pick = ctx.rng().gen_range(0..Action::MOVES.len());
            Action::MOVES[pick]
        };
        ctx.set_action(action);
        Status::Running
    }
}

/// Heals in place until hit points reach `threshold`.
///
/// `Running` with a `HealSelf` intent while below, `Success` otherwise.
pub struct PatchUp {
    pub threshold: f32,
}

impl PatchUp {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Behavior<AiContext> for PatchUp {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        if actor.hitpoints >= self.threshold {
            return Status::Success;
        }
        ctx.set_action(Action::HealSelf);
        Status::Running
    }
}

/// Random walk that tends to keep its heading.
///
/// Relative to the previous tick's move, continuing is weighted 1.0, turning
/// 0.4 and reversing 0.1. Without a previous move every direction is equally
/// likely. Always `Running`.
#[derive(Default)]
pub struct StickyExplore;

impl StickyExplore {
    pub const SAME: f32 = 1.0;
    pub const PERPENDICULAR: f32 = 0.4;
    pub const OPPOSITE: f32 = 0.1;
    pub const UNIFORM: f32 = 0.25;

    pub fn new() -> Self {
        Self
    }

    /// Sampling weights over [`Action::MOVES`] given the previous action.
    pub fn weights(previous: Action) -> [f32; 4] {
        Action::MOVES.map(|candidate| {
            if !previous.is_move() {
                Self::UNIFORM
            } else if candidate == previous {
                Self::SAME
            } else if candidate == previous.inverse() {
                Self::OPPOSITE
            } else {
                Self::PERPENDICULAR
            }
        })
    }
}

impl Behavior<AiContext> for StickyExplore {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let Some(previous) = ctx.actor().map(|actor| actor.previous_action) else {
            return Status::Failure;
        };
        let weights = Self::weights(previous);
        let pick = weighted_index(ctx.rng(), &weights).unwrap_or(0);
        ctx.set_action(Action::MOVES[pick]);
        Status::Running
    }
}

fn consume_pickups(ctx: &mut AiContext, kind: PickupKind) -> Status {
    let Some(at) = ctx.position() else {
        return Status::Failure;
    };
    let Some(amount) = ctx.world.take_pickups_at(at, kind) else {
        return Status::Failure;
    };
    let Some(actor) = ctx.actor_mut() else {
        return Status::Failure;
    };
    match kind {
        PickupKind::Health => actor.hitpoints += amount,
        PickupKind::Powerup => actor.melee_damage += amount,
    }
    Status::Success
}

/// Consumes every health pickup on the agent's tile, adding to hit points.
///
/// `Success` if anything was consumed, `Failure` otherwise.
pub struct PickupHealth;

impl Behavior<AiContext> for PickupHealth {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        consume_pickups(ctx, PickupKind::Health)
    }
}

/// Consumes every powerup on the agent's tile, adding to melee damage.
///
/// `Success` if anything was consumed, `Failure` otherwise.
pub struct PickupPowerup;

impl Behavior<AiContext> for PickupPowerup {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        consume_pickups(ctx, PickupKind::Powerup)
    }
}

/// Advances the waypoint stored in `waypoint` to its successor.
///
/// `Success` if the successor exists, `Failure` otherwise.
pub struct ChooseNextWaypoint {
    waypoint: BbHandle<EntityId>,
}

impl ChooseNextWaypoint {
    pub fn new(waypoint: BbHandle<EntityId>) -> Self {
        Self { waypoint }
    }
}

impl Behavior<AiContext> for ChooseNextWaypoint {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let next = ctx
            .read(self.waypoint)
            .and_then(|current| ctx.world.waypoint(current))
            .and_then(|current| current.next)
            .filter(|next| ctx.world.waypoint(*next).is_some());

        match next {
            Some(next) if ctx.write(self.waypoint, next) => Status::Success,
            _ => Status::Failure,
        }
    }
}

/// Idles for this tick. Always `Success`.
pub struct Wait;

impl Behavior<AiContext> for Wait {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        ctx.set_action(Action::Nop);
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::nodes::AgentSlots;
    use crate::world::World;
    use game_core::Grid;

    fn context(at: Position) -> (AiContext, AgentSlots) {
        let mut world = World::new(Grid::new(10, 10).unwrap(), 5);
        let id = world.spawn_actor(Actor::monster(at)).unwrap();
        let slots = AgentSlots::register(&mut world.actor_mut(id).unwrap().blackboard).unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        (ctx, slots)
    }

    #[test]
    fn move_to_entity_runs_then_succeeds_then_fails_on_death() {
        let (mut ctx, slots) = context(Position::new(2, 2));
        let enemy = ctx.world.spawn_actor(Actor::player(Position::new(5, 2))).unwrap();
        ctx.write(slots.target, enemy);

        let mut node = MoveToEntity::new(slots.target);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.action(), Action::MoveRight);

        ctx.actor_mut().unwrap().position = Position::new(5, 2);
        ctx.world.remove_actor(enemy);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn move_to_entity_succeeds_on_arrival() {
        let (mut ctx, slots) = context(Position::new(2, 2));
        let pickup = ctx
            .world
            .spawn_pickup(PickupKind::Health, Position::new(2, 2), 1.0);
        ctx.write(slots.target, pickup);

        assert_eq!(MoveToEntity::new(slots.target).tick(&mut ctx), Status::Success);
        assert_eq!(ctx.action(), Action::Nop);
    }

    #[test]
    fn move_to_entity_fails_on_unset_slot() {
        let (mut ctx, slots) = context(Position::new(2, 2));
        assert_eq!(MoveToEntity::new(slots.target).tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn flee_steps_away() {
        let (mut ctx, slots) = context(Position::new(4, 4));
        let enemy = ctx.world.spawn_actor(Actor::player(Position::new(4, 6))).unwrap();
        ctx.write(slots.target, enemy);

        assert_eq!(Flee::new(slots.target).tick(&mut ctx), Status::Running);
        assert_eq!(ctx.action(), Action::MoveUp);
    }

    #[test]
    fn patrol_walks_back_to_its_anchor() {
        let (mut ctx, slots) = context(Position::new(1, 1));
        let mut node = Patrol::anchored(ctx.actor_mut().unwrap(), slots.anchor, 2.0).unwrap();
        assert_eq!(ctx.read(slots.anchor), Some(Position::new(1, 1)));

        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert!(ctx.action().is_move());

        ctx.actor_mut().unwrap().position = Position::new(8, 1);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.action(), Action::MoveLeft);
    }

    #[test]
    fn patch_up_heals_until_threshold() {
        let (mut ctx, _) = context(Position::new(1, 1));
        ctx.actor_mut().unwrap().hitpoints = 40.0;

        let mut node = PatchUp::new(50.0);
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.action(), Action::HealSelf);

        ctx.actor_mut().unwrap().hitpoints = 50.0;
        assert_eq!(node.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn sticky_weights_favour_the_previous_heading() {
        assert_eq!(
            StickyExplore::weights(Action::MoveLeft),
            [1.0, 0.1, 0.4, 0.4]
        );
        assert_eq!(StickyExplore::weights(Action::MoveDown), [0.4, 0.4, 0.1, 1.0]);
        assert_eq!(StickyExplore::weights(Action::HealSelf), [0.25; 4]);
    }

    #[test]
    fn sticky_explore_always_moves() {
        let (mut ctx, _) = context(Position::new(5, 5));
        let mut node = StickyExplore::new();
        for _ in 0..20 {
            assert_eq!(node.tick(&mut ctx), Status::Running);
            let action = ctx.action();
            assert!(action.is_move());
            ctx.actor_mut().unwrap().previous_action = action;
        }
    }

    #[test]
    fn pickups_are_consumed_into_stats() {
        let (mut ctx, _) = context(Position::new(3, 3));
        ctx.world
            .spawn_pickup(PickupKind::Health, Position::new(3, 3), 10.0);
        ctx.world
            .spawn_pickup(PickupKind::Powerup, Position::new(3, 3), 5.0);

        assert_eq!(PickupHealth.tick(&mut ctx), Status::Success);
        assert_eq!(PickupHealth.tick(&mut ctx), Status::Failure);
        assert_eq!(PickupPowerup.tick(&mut ctx), Status::Success);

        let actor = ctx.actor().unwrap();
        assert_eq!(actor.hitpoints, 110.0);
        assert_eq!(actor.melee_damage, 25.0);
    }

    #[test]
    fn waypoints_advance_along_links() {
        let (mut ctx, slots) = context(Position::new(0, 0));
        let a = ctx.world.add_waypoint(Position::new(0, 0));
        let b = ctx.world.add_waypoint(Position::new(5, 0));
        ctx.world.link_waypoint(a, b).unwrap();
        ctx.write(slots.waypoint, a);

        let mut node = ChooseNextWaypoint::new(slots.waypoint);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.read(slots.waypoint), Some(b));
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }
}
