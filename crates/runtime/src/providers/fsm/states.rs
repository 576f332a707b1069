//! Stock states.
//!
//! Enemy-driven states target the nearest hostile actor at any distance and
//! do nothing when there is none. Ally-driven states act on the agent's
//! master and do nothing without one.

use game_core::{Action, Position};
use rand::Rng;
use tracing::trace;

use super::State;
use crate::providers::ai::AiContext;

fn nearest_enemy_position(ctx: &AiContext) -> Option<Position> {
    let (enemy, _) = ctx.world.nearest_enemy(ctx.entity(), f32::INFINITY)?;
    ctx.world.actor(enemy).map(|actor| actor.position)
}

fn master_position(ctx: &AiContext) -> Option<Position> {
    let master = ctx.actor()?.master?;
    ctx.world.actor(master).map(|actor| actor.position)
}

/// Does nothing.
pub struct Nop;

impl State for Nop {
    fn name(&self) -> &'static str {
        "nop"
    }

    fn act(&mut self, _ctx: &mut AiContext) {}
}

/// Placeholder for melee engagement. Attacks happen when a move is resolved
/// into an enemy, so this state issues no intent of its own.
pub struct AttackEnemy;

impl State for AttackEnemy {
    fn name(&self) -> &'static str {
        "attack_enemy"
    }

    fn act(&mut self, _ctx: &mut AiContext) {}
}

pub struct MoveToEnemy;

impl State for MoveToEnemy {
    fn name(&self) -> &'static str {
        "move_to_enemy"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        if let (Some(from), Some(enemy)) = (ctx.position(), nearest_enemy_position(ctx)) {
            ctx.set_action(Action::move_towards(from, enemy));
        }
    }
}

pub struct FleeFromEnemy;

impl State for FleeFromEnemy {
    fn name(&self) -> &'static str {
        "flee_from_enemy"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        if let (Some(from), Some(enemy)) = (ctx.position(), nearest_enemy_position(ctx)) {
            ctx.set_action(Action::move_away(from, enemy));
        }
    }
}

/// Random walk around a fixed anchor with a walk back when further than
/// `radius`.
pub struct Patrol {
    pub anchor: Position,
    pub radius: f32,
}

impl Patrol {
    pub fn new(anchor: Position, radius: f32) -> Self {
        Self { anchor, radius }
    }
}

impl State for Patrol {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        let Some(from) = ctx.position() else {
            return;
        };
        let action = if from.distance(self.anchor) > self.radius {
            Action::move_towards(from, self.anchor)
        } else {
            let pick = ctx.rng().gen_range(0..Action::MOVES.len());
            Action::MOVES[pick]
        };
        ctx.set_action(action);
    }
}

/// Regenerates `per_turn` hit points every tick.
pub struct Heal {
    pub per_turn: f32,
}

impl Heal {
    pub fn new(per_turn: f32) -> Self {
        Self { per_turn }
    }
}

impl State for Heal {
    fn name(&self) -> &'static str {
        "heal"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        if let Some(actor) = ctx.actor_mut() {
            actor.hitpoints += self.per_turn;
            ctx.set_action(Action::Heal);
        }
    }
}

/// Adopts the nearest other actor of the same team as master.
pub struct FindMaster;

impl State for FindMaster {
    fn name(&self) -> &'static str {
        "find_master"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        let Some((ally, _)) = ctx.world.nearest_ally(ctx.entity()) else {
            return;
        };
        if let Some(actor) = ctx.actor_mut() {
            trace!(entity = %actor.id, master = %ally, "master adopted");
            actor.master = Some(ally);
        }
    }
}

pub struct MoveToAlly;

impl State for MoveToAlly {
    fn name(&self) -> &'static str {
        "move_to_ally"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        if let (Some(from), Some(master)) = (ctx.position(), master_position(ctx)) {
            ctx.set_action(Action::move_towards(from, master));
        }
    }
}

/// Heals the master by `amount` whenever the heal cooldown is ready, then
/// restarts the cooldown. Agents without a cooldown heal every tick.
pub struct HealMaster {
    pub amount: f32,
}

impl HealMaster {
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }
}

impl State for HealMaster {
    fn name(&self) -> &'static str {
        "heal_master"
    }

    fn act(&mut self, ctx: &mut AiContext) {
        let Some(actor) = ctx.actor_mut() else {
            return;
        };
        let Some(master) = actor.master else {
            return;
        };
        if let Some(cooldown) = actor.heal_cooldown.as_mut() {
            if !cooldown.is_ready() {
                return;
            }
            cooldown.trigger();
        }
        ctx.set_action(Action::Heal);

        if let Some(master) = ctx.world.actor_mut(master) {
            master.hitpoints += self.amount;
        }
    }
}
