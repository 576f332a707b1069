//! Evaluation context shared by every behavior-tree node.
//!
//! The [`AiContext`] owns the [`World`] and is focused on one entity at a
//! time. The simulation focuses each agent in turn and ticks that agent's
//! tree against the context, so nodes always see:
//!
//! - the world (grid, actors, pickups, waypoints)
//! - the evaluating entity and its blackboard
//! - the world's seeded random source
//!
//! Actions written through [`AiContext::set_action`] overwrite each other
//! within a tick; the last write wins.

use game_core::{Action, BbHandle, Blackboard, BlackboardValue, EntityId, Position};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::world::{Actor, World};

pub struct AiContext {
    /// The world every node reads and mutates.
    pub world: World,

    /// The entity currently being evaluated.
    entity: EntityId,
}

impl AiContext {
    /// Wraps a world. The context starts unfocused; call [`focus`](Self::focus)
    /// before ticking a tree.
    pub fn new(world: World) -> Self {
        Self {
            world,
            entity: EntityId(0),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn focus(&mut self, entity: EntityId) {
        self.entity = entity;
    }

    /// The focused actor, or `None` if it has died.
    pub fn actor(&self) -> Option<&Actor> {
        self.world.actor(self.entity)
    }

    pub fn actor_mut(&mut self) -> Option<&mut Actor> {
        self.world.actor_mut(self.entity)
    }

    pub fn position(&self) -> Option<Position> {
        self.actor().map(|actor| actor.position)
    }

    pub fn blackboard(&self) -> Option<&Blackboard> {
        self.actor().map(|actor| &actor.blackboard)
    }

    /// Reads a blackboard slot of the focused actor.
    ///
    /// Every failure (dead actor, unset slot, foreign handle) reads as `None`
    /// so leaves can turn it into `Status::Failure`.
    pub fn read<T: BlackboardValue>(&self, handle: BbHandle<T>) -> Option<T> {
        self.blackboard()?.try_get(handle)
    }

    /// Writes a blackboard slot of the focused actor. Returns `false` when
    /// the write was rejected.
    pub fn write<T: BlackboardValue>(&mut self, handle: BbHandle<T>, value: T) -> bool {
        self.actor_mut()
            .is_some_and(|actor| actor.blackboard.set(handle, value).is_ok())
    }

    /// Sets the focused actor's intent for this tick, replacing any earlier one.
    pub fn set_action(&mut self, action: Action) {
        let entity = self.entity;
        if let Some(actor) = self.actor_mut() {
            if actor.action != Action::Nop && actor.action != action {
                trace!(%entity, from = %actor.action, to = %action, "action overwritten");
            }
            actor.action = action;
        }
    }

    pub fn action(&self) -> Action {
        self.actor().map_or(Action::Nop, |actor| actor.action)
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.world.rng()
    }

    /// Tile of a live entity referenced from the blackboard.
    pub fn entity_position(&self, handle: BbHandle<EntityId>) -> Option<Position> {
        let target = self.read(handle)?;
        self.world.entity_position(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Actor;
    use game_core::Grid;

    fn context() -> (AiContext, EntityId) {
        let mut world = World::new(Grid::new(4, 4).unwrap(), 3);
        let id = world.spawn_actor(Actor::monster(Position::new(1, 1))).unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        (ctx, id)
    }

    #[test]
    fn later_actions_overwrite_earlier_ones() {
        let (mut ctx, _) = context();
        ctx.set_action(Action::MoveLeft);
        ctx.set_action(Action::HealSelf);
        assert_eq!(ctx.action(), Action::HealSelf);
    }

    #[test]
    fn reads_fail_soft_after_death() {
        let (mut ctx, id) = context();
        let handle = ctx
            .actor_mut()
            .unwrap()
            .blackboard
            .register::<Position>("anchor")
            .unwrap();
        assert!(ctx.write(handle, Position::new(2, 2)));
        assert_eq!(ctx.read(handle), Some(Position::new(2, 2)));

        ctx.world.remove_actor(id);
        assert_eq!(ctx.read(handle), None);
        assert!(!ctx.write(handle, Position::ORIGIN));
        assert_eq!(ctx.action(), Action::Nop);
    }
}
