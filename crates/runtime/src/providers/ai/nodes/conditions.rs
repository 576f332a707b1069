//! Condition nodes for agent behavior trees.
//!
//! Condition nodes check the world and return Success or Failure. The
//! `Find*` nodes additionally record what they found in the blackboard.

use behavior_tree::{Behavior, Status};
use game_core::{BbHandle, EntityId};
use tracing::trace;

use crate::providers::ai::AiContext;
use crate::world::PickupKind;

/// Looks for the nearest actor of another team within `radius` tiles.
///
/// Success stores its id in `target`. Failure leaves the slot untouched.
///
/// # Example
///
/// ```rust,ignore
/// // Chase anything hostile within 3 tiles
/// sequence(vec![
///     Box::new(FindEnemy::new(slots.target, 3.0)),
///     Box::new(MoveToEntity::new(slots.target)),
/// ])
/// ```
pub struct FindEnemy {
    pub radius: f32,
    target: BbHandle<EntityId>,
}

impl FindEnemy {
    pub fn new(target: BbHandle<EntityId>, radius: f32) -> Self {
        Self { radius, target }
    }
}

impl Behavior<AiContext> for FindEnemy {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let Some((enemy, distance)) = ctx.world.nearest_enemy(ctx.entity(), self.radius) else {
            return Status::Failure;
        };

        if !ctx.write(self.target, enemy) {
            return Status::Failure;
        }
        trace!(entity = %ctx.entity(), %enemy, distance, "enemy found");
        Status::Success
    }
}

/// Looks for the nearest pickup of `kind` within `radius` tiles.
///
/// Success stores its id in `target`.
pub struct FindPickup {
    pub kind: PickupKind,
    pub radius: f32,
    target: BbHandle<EntityId>,
}

impl FindPickup {
    pub fn new(target: BbHandle<EntityId>, kind: PickupKind, radius: f32) -> Self {
        Self {
            kind,
            radius,
            target,
        }
    }
}

impl Behavior<AiContext> for FindPickup {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        let Some(from) = ctx.position() else {
            return Status::Failure;
        };
        let Some((pickup, _)) = ctx.world.nearest_pickup(from, self.kind, self.radius) else {
            return Status::Failure;
        };

        if ctx.write(self.target, pickup) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Success iff the agent's hit points are below `threshold`.
pub struct IsLowHp {
    pub threshold: f32,
}

impl IsLowHp {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Behavior<AiContext> for IsLowHp {
    fn tick(&mut self, ctx: &mut AiContext) -> Status {
        match ctx.actor() {
            Some(actor) if actor.hitpoints < self.threshold => Status::Success,
            _ => Status::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::nodes::AgentSlots;
    use crate::world::{Actor, World};
    use game_core::{Grid, Position};

    fn context(hitpoints: f32) -> (AiContext, AgentSlots) {
        let mut world = World::new(Grid::new(8, 8).unwrap(), 11);
        let id = world
            .spawn_actor(Actor::monster(Position::new(0, 0)).with_hitpoints(hitpoints))
            .unwrap();
        let slots = AgentSlots::register(&mut world.actor_mut(id).unwrap().blackboard).unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        (ctx, slots)
    }

    #[test]
    fn find_enemy_records_the_nearest_hostile() {
        let (mut ctx, slots) = context(100.0);
        ctx.world.spawn_actor(Actor::monster(Position::new(1, 0))).unwrap();
        let near = ctx.world.spawn_actor(Actor::player(Position::new(2, 0))).unwrap();
        ctx.world.spawn_actor(Actor::player(Position::new(3, 0))).unwrap();

        let mut node = FindEnemy::new(slots.target, 5.0);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.read(slots.target), Some(near));

        node.radius = 1.5;
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn find_pickup_filters_by_kind() {
        let (mut ctx, slots) = context(100.0);
        ctx.world
            .spawn_pickup(PickupKind::Powerup, Position::new(1, 1), 5.0);
        let health = ctx
            .world
            .spawn_pickup(PickupKind::Health, Position::new(3, 3), 5.0);

        let mut node = FindPickup::new(slots.pickup, PickupKind::Health, 10.0);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.read(slots.pickup), Some(health));

        let mut near_only = FindPickup::new(slots.pickup, PickupKind::Health, 2.0);
        assert_eq!(near_only.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn is_low_hp_is_strict() {
        let (mut ctx, _) = context(50.0);
        assert_eq!(IsLowHp::new(50.0).tick(&mut ctx), Status::Failure);
        assert_eq!(IsLowHp::new(50.5).tick(&mut ctx), Status::Success);
    }
}
