//! Complete behavior trees for common agent archetypes.
//!
//! Each preset registers the slots it needs on the actor's blackboard before
//! the actor is spawned, so handle resolution happens once per agent:
//!
//! ```text
//! patroller()
//!   └─ Selector
//!       ├─ Sequence [IsLowHp, FindEnemy, Flee]
//!       ├─ Sequence [FindEnemy, MoveToEntity]
//!       └─ Patrol
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut actor = Actor::monster(position);
//! let tree = presets::patroller(&mut actor, 3.0, 40.0)?;
//! let id = simulation.spawn(actor, Brain::Tree(tree))?;
//! ```

use behavior_tree::builder::{selector, sequence, utility_selector};
use behavior_tree::{Arbitration, Behavior, Cooldown, Scorer};
use game_core::{BlackboardError, EntityId};

use super::context::AiContext;
use super::nodes::{
    AgentSlots, ChooseNextWaypoint, FindEnemy, FindPickup, Flee, IsLowHp, MoveToEntity, PatchUp,
    Patrol, PickupHealth, PickupPowerup, StickyExplore, Wait,
};
use crate::world::{Actor, PickupKind};

/// Owned behavior tree evaluated against an [`AiContext`].
pub type BehaviorTree = Box<dyn Behavior<AiContext>>;

/// Radius an anchored patroller wanders within.
pub const PATROL_RADIUS: f32 = 2.0;

// ============================================================================
// Priority trees
// ============================================================================

/// Guards its spawn point: flees when hurt, chases enemies that come close,
/// wanders around the anchor otherwise.
pub fn patroller(
    actor: &mut Actor,
    chase_radius: f32,
    flee_below: f32,
) -> Result<BehaviorTree, BlackboardError> {
    let slots = AgentSlots::register(&mut actor.blackboard)?;
    let patrol = Patrol::anchored(actor, slots.anchor, PATROL_RADIUS)?;

    Ok(selector(vec![
        sequence(vec![
            Box::new(IsLowHp::new(flee_below)),
            Box::new(FindEnemy::new(slots.target, chase_radius)),
            Box::new(Flee::new(slots.target)),
        ]),
        sequence(vec![
            Box::new(FindEnemy::new(slots.target, chase_radius)),
            Box::new(MoveToEntity::new(slots.target)),
        ]),
        Box::new(patrol),
    ]))
}

/// Charges the nearest enemy in sight and explores otherwise.
pub fn berserker(actor: &mut Actor, sight: f32) -> Result<BehaviorTree, BlackboardError> {
    let slots = AgentSlots::register(&mut actor.blackboard)?;

    Ok(selector(vec![
        sequence(vec![
            Box::new(FindEnemy::new(slots.target, sight)),
            Box::new(MoveToEntity::new(slots.target)),
        ]),
        Box::new(StickyExplore::new()),
    ]))
}

/// Collects health when hurt and powerups otherwise, exploring between
/// finds.
pub fn scavenger(
    actor: &mut Actor,
    sight: f32,
    hurt_below: f32,
) -> Result<BehaviorTree, BlackboardError> {
    let slots = AgentSlots::register(&mut actor.blackboard)?;

    Ok(selector(vec![
        sequence(vec![
            Box::new(IsLowHp::new(hurt_below)),
            Box::new(FindPickup::new(slots.pickup, PickupKind::Health, sight)),
            selector(vec![
                Box::new(PickupHealth),
                Box::new(MoveToEntity::new(slots.pickup)),
            ]),
        ]),
        sequence(vec![
            Box::new(FindPickup::new(slots.pickup, PickupKind::Powerup, sight)),
            selector(vec![
                Box::new(PickupPowerup),
                Box::new(MoveToEntity::new(slots.pickup)),
            ]),
        ]),
        Box::new(StickyExplore::new()),
    ]))
}

/// Walks a waypoint route starting at `first`, idling if the route breaks.
pub fn waypoint_walker(
    actor: &mut Actor,
    first: EntityId,
) -> Result<BehaviorTree, BlackboardError> {
    let slots = AgentSlots::register(&mut actor.blackboard)?;
    actor.blackboard.set(slots.waypoint, first)?;

    Ok(selector(vec![
        sequence(vec![
            Box::new(MoveToEntity::new(slots.waypoint)),
            Box::new(ChooseNextWaypoint::new(slots.waypoint)),
            Box::new(MoveToEntity::new(slots.waypoint)),
        ]),
        Box::new(MoveToEntity::new(slots.waypoint)),
        Box::new(Wait),
    ]))
}

// ============================================================================
// Utility trees
// ============================================================================

/// Hit points at which the utility monster stops wanting to fight.
pub const COMFORT_HITPOINTS: f32 = Actor::DEFAULT_HITPOINTS;

fn enemy_distance(ctx: &AiContext, sight: f32) -> Option<f32> {
    ctx.world
        .nearest_enemy(ctx.entity(), sight)
        .map(|(_, distance)| distance)
}

fn hitpoints(ctx: &AiContext) -> f32 {
    ctx.actor().map_or(0.0, |actor| actor.hitpoints)
}

/// Chooses between fighting, fleeing, healing and exploring by score.
///
/// - fight scales with own hit points while an enemy is in sight
/// - flee scales with missing hit points while an enemy is in sight
/// - heal scales with missing hit points when no enemy is in sight
/// - explore is a constant fallback
///
/// With `cooldown`, the last chosen option keeps a decaying bonus so the
/// monster does not flip between close scores every tick.
pub fn utility_monster(
    actor: &mut Actor,
    sight: f32,
    arbitration: Arbitration,
    cooldown: bool,
    seed: u64,
) -> Result<BehaviorTree, BlackboardError> {
    const EXPLORE_SCORE: f32 = 20.0;

    let slots = AgentSlots::register(&mut actor.blackboard)?;

    let fight: Scorer<AiContext> = Box::new(move |ctx: &AiContext| match enemy_distance(ctx, sight) {
        Some(_) => hitpoints(ctx),
        None => 0.0,
    });
    let flee: Scorer<AiContext> = Box::new(move |ctx: &AiContext| match enemy_distance(ctx, sight) {
        Some(_) => (COMFORT_HITPOINTS - hitpoints(ctx)).max(0.0),
        None => 0.0,
    });
    let heal: Scorer<AiContext> = Box::new(move |ctx: &AiContext| match enemy_distance(ctx, sight) {
        Some(_) => 0.0,
        None => (COMFORT_HITPOINTS - hitpoints(ctx)).max(0.0),
    });
    let explore: Scorer<AiContext> = Box::new(|_: &AiContext| EXPLORE_SCORE);

    let chase: BehaviorTree = sequence(vec![
        Box::new(FindEnemy::new(slots.target, sight)),
        Box::new(MoveToEntity::new(slots.target)),
    ]);
    let run: BehaviorTree = sequence(vec![
        Box::new(FindEnemy::new(slots.target, sight)),
        Box::new(Flee::new(slots.target)),
    ]);
    let patch_up: BehaviorTree = Box::new(PatchUp::new(COMFORT_HITPOINTS));
    let wander: BehaviorTree = Box::new(StickyExplore::new());

    Ok(utility_selector(
        vec![(chase, fight), (run, flee), (patch_up, heal), (wander, explore)],
        arbitration,
        cooldown.then(Cooldown::default),
        seed,
    ))
}
