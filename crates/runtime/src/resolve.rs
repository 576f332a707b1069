//! Turns each actor's intent into world changes.
//!
//! Actors resolve in id order. An actor killed earlier in the same pass
//! does not act.

use game_core::{Action, EntityId, GridOracle, Position};
use tracing::{debug, trace};

use crate::world::World;

/// What one actor's intent did this turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Idle,
    Moved {
        from: Position,
        to: Position,
    },
    /// Wall, grid edge or teammate in the way.
    Blocked {
        at: Position,
    },
    Attacked {
        target: EntityId,
        damage: f32,
        killed: bool,
    },
    Healed {
        amount: f32,
    },
}

/// Resolves a single actor's current action.
pub fn resolve_action(world: &mut World, id: EntityId) -> Outcome {
    let Some(actor) = world.actor(id) else {
        return Outcome::Idle;
    };
    let (from, action, team, damage) = (actor.position, actor.action, actor.team, actor.melee_damage);

    match action {
        Action::Nop | Action::Heal => Outcome::Idle,
        Action::HealSelf => {
            let amount = world.config().self_heal_amount;
            if let Some(actor) = world.actor_mut(id) {
                actor.hitpoints += amount;
            }
            Outcome::Healed { amount }
        }
        Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown => {
            let to = action.apply(from);
            if !world.grid().is_walkable(to) {
                return Outcome::Blocked { at: to };
            }

            match world.actor_at(to) {
                Some(occupant) => {
                    let hostile = world
                        .actor(occupant)
                        .is_some_and(|other| team.is_hostile_to(other.team));
                    if hostile {
                        attack(world, id, occupant, damage)
                    } else {
                        Outcome::Blocked { at: to }
                    }
                }
                None => {
                    if let Some(actor) = world.actor_mut(id) {
                        actor.position = to;
                        if let Some(motion) = actor.motion.as_mut() {
                            motion.position = to.to_vec2();
                        }
                    }
                    Outcome::Moved { from, to }
                }
            }
        }
    }
}

fn attack(world: &mut World, attacker: EntityId, target: EntityId, damage: f32) -> Outcome {
    let Some(victim) = world.actor_mut(target) else {
        return Outcome::Idle;
    };
    victim.hitpoints -= damage;
    let killed = victim.hitpoints <= 0.0;
    trace!(%attacker, %target, damage, remaining = victim.hitpoints, "melee hit");

    if killed {
        world.remove_actor(target);
        debug!(%attacker, %target, "actor killed");
    }
    Outcome::Attacked {
        target,
        damage,
        killed,
    }
}

/// Resolves every actor in id order and counts down heal cooldowns.
pub fn resolve_all(world: &mut World) -> Vec<(EntityId, Outcome)> {
    let mut outcomes = Vec::with_capacity(world.actor_count());
    for id in world.actor_ids() {
        if !world.is_alive(id) {
            continue;
        }
        outcomes.push((id, resolve_action(world, id)));
    }

    for actor in world.actors_mut() {
        if let Some(cooldown) = actor.heal_cooldown.as_mut() {
            cooldown.tick();
        }
    }
    outcomes
}
