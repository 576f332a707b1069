//! Stock transition guards and their combinators.

use super::Transition;
use crate::providers::ai::AiContext;

/// Some hostile actor is within `radius` tiles.
pub struct EnemyAvailable {
    pub radius: f32,
}

impl EnemyAvailable {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Transition for EnemyAvailable {
    fn is_available(&self, ctx: &AiContext) -> bool {
        ctx.world.nearest_enemy(ctx.entity(), self.radius).is_some()
    }
}

pub struct HitpointsLessThan {
    pub threshold: f32,
}

impl HitpointsLessThan {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Transition for HitpointsLessThan {
    fn is_available(&self, ctx: &AiContext) -> bool {
        ctx.actor().is_some_and(|actor| actor.hitpoints < self.threshold)
    }
}

/// The agent has a master and the master is alive.
pub struct HasMaster;

impl Transition for HasMaster {
    fn is_available(&self, ctx: &AiContext) -> bool {
        ctx.actor()
            .and_then(|actor| actor.master)
            .is_some_and(|master| ctx.world.is_alive(master))
    }
}

pub struct MasterHitpointsLessThan {
    pub threshold: f32,
}

impl MasterHitpointsLessThan {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Transition for MasterHitpointsLessThan {
    fn is_available(&self, ctx: &AiContext) -> bool {
        ctx.actor()
            .and_then(|actor| actor.master)
            .and_then(|master| ctx.world.actor(master))
            .is_some_and(|master| master.hitpoints < self.threshold)
    }
}

/// The heal cooldown has run out. Agents without a cooldown are always
/// ready.
pub struct HealCooledDown;

impl Transition for HealCooledDown {
    fn is_available(&self, ctx: &AiContext) -> bool {
        ctx.actor().is_some_and(|actor| {
            actor
                .heal_cooldown
                .is_none_or(|cooldown| cooldown.is_ready())
        })
    }
}

/// Holds when the wrapped guard does not.
pub struct Not(pub Box<dyn Transition>);

impl Transition for Not {
    fn is_available(&self, ctx: &AiContext) -> bool {
        !self.0.is_available(ctx)
    }
}

/// Holds when both guards hold. The right side is skipped when the left
/// side fails.
pub struct And(pub Box<dyn Transition>, pub Box<dyn Transition>);

impl Transition for And {
    fn is_available(&self, ctx: &AiContext) -> bool {
        self.0.is_available(ctx) && self.1.is_available(ctx)
    }
}

pub fn not(inner: impl Transition + 'static) -> Not {
    Not(Box::new(inner))
}

pub fn and(lhs: impl Transition + 'static, rhs: impl Transition + 'static) -> And {
    And(Box::new(lhs), Box::new(rhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Actor, World};
    use game_core::{Grid, Position};

    fn context(actor: Actor) -> AiContext {
        let mut world = World::new(Grid::new(10, 10).unwrap(), 4);
        let id = world.spawn_actor(actor).unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        ctx
    }

    #[test]
    fn enemy_available_uses_inclusive_radius() {
        let mut ctx = context(Actor::monster(Position::new(0, 0)));
        ctx.world.spawn_actor(Actor::player(Position::new(3, 0))).unwrap();

        assert!(EnemyAvailable::new(3.0).is_available(&ctx));
        assert!(!EnemyAvailable::new(2.9).is_available(&ctx));
    }

    #[test]
    fn combinators_compose() {
        let ctx = context(Actor::monster(Position::new(0, 0)).with_hitpoints(30.0));

        assert!(and(HitpointsLessThan::new(50.0), not(EnemyAvailable::new(5.0))).is_available(&ctx));
        assert!(!and(HitpointsLessThan::new(10.0), HealCooledDown).is_available(&ctx));
        assert!(not(HasMaster).is_available(&ctx));
    }

    #[test]
    fn master_guards_require_a_live_master() {
        let mut ctx = context(Actor::monster(Position::new(0, 0)).with_heal_cooldown(3));
        let master = ctx
            .world
            .spawn_actor(Actor::monster(Position::new(2, 2)).with_hitpoints(40.0))
            .unwrap();
        ctx.actor_mut().unwrap().master = Some(master);

        assert!(HasMaster.is_available(&ctx));
        assert!(MasterHitpointsLessThan::new(50.0).is_available(&ctx));
        assert!(HealCooledDown.is_available(&ctx));

        ctx.actor_mut().unwrap().heal_cooldown.as_mut().unwrap().trigger();
        assert!(!HealCooledDown.is_available(&ctx));

        ctx.world.remove_actor(master);
        assert!(!HasMaster.is_available(&ctx));
        assert!(!MasterHitpointsLessThan::new(50.0).is_available(&ctx));
    }
}
