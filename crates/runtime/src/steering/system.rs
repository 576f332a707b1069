use game_core::math::truncate;
use game_core::{EntityId, FlowField, GridOracle, Position, Team};
use glam::Vec2;
use tracing::trace;

use super::behaviors;
use super::Primary;
use crate::world::{Motion, World};

/// Tick-start view of one actor as seen by every other actor's steering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicSnapshot {
    pub id: EntityId,
    pub team: Team,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Takes part in separation.
    pub separates: bool,
    pub kinematic: bool,
}

/// Positions and velocities of every actor, in id order.
///
/// Non-kinematic actors appear at their tile with zero velocity so they can
/// still be sought or fled from.
pub fn snapshot(world: &World) -> Vec<KinematicSnapshot> {
    world
        .actors()
        .map(|actor| KinematicSnapshot {
            id: actor.id,
            team: actor.team,
            position: actor.world_position(),
            velocity: actor.velocity(),
            separates: actor
                .motion
                .as_ref()
                .is_some_and(|m| m.profile.separation.is_some()),
            kinematic: actor.motion.is_some(),
        })
        .collect()
}

fn nearest_hostile(
    snapshot: &[KinematicSnapshot],
    id: EntityId,
    team: Team,
    position: Vec2,
) -> Option<&KinematicSnapshot> {
    snapshot
        .iter()
        .filter(|other| other.id != id && team.is_hostile_to(other.team))
        .fold(None, |best: Option<&KinematicSnapshot>, candidate| match best {
            Some(b) if b.position.distance_squared(position)
                <= candidate.position.distance_squared(position) =>
            {
                best
            }
            _ => Some(candidate),
        })
}

fn steer_for(
    snapshot: &[KinematicSnapshot],
    id: EntityId,
    team: Team,
    motion: &Motion,
    flow: Option<&FlowField>,
) -> Vec2 {
    let Motion {
        position,
        velocity,
        max_speed,
        profile,
        ..
    } = *motion;
    let mut steer = Vec2::ZERO;

    if let Some(primary) = profile.primary
        && let Some(target) = nearest_hostile(snapshot, id, team, position)
    {
        steer += match primary {
            Primary::Seek => behaviors::seek(position, velocity, target.position, max_speed),
            Primary::Flee => behaviors::flee(position, velocity, target.position, max_speed),
            Primary::Pursue => behaviors::pursue(
                position,
                velocity,
                target.position,
                target.velocity,
                max_speed,
            ),
            Primary::Evade => behaviors::evade(
                position,
                velocity,
                target.position,
                target.velocity,
                max_speed,
            ),
        };
    }

    if let Some(separation) = profile.separation {
        let neighbors = snapshot
            .iter()
            .filter(|other| other.id != id && other.separates)
            .map(|other| other.position);
        steer += behaviors::separation(
            position,
            velocity,
            neighbors,
            separation.threshold,
            separation.force,
            max_speed,
        );
    }

    if profile.alignment {
        let neighbors = snapshot
            .iter()
            .filter(|other| other.id != id && other.kinematic)
            .map(|other| (other.position, other.velocity));
        steer += behaviors::alignment(position, neighbors);
    }

    if profile.flow_follow
        && let Some(flow) = flow
        && let Some(follow) = behaviors::flow_follow(position, velocity, flow, max_speed)
    {
        steer += follow;
    }

    steer
}

/// Resets and recomputes the steering vector of every kinematic actor.
///
/// All contributions read the same tick-start snapshot.
pub fn accumulate(world: &mut World, flow: Option<&FlowField>) {
    let snapshot = snapshot(world);

    for actor in world.actors_mut() {
        let Some(motion) = actor.motion.as_mut() else {
            continue;
        };
        motion.steer = steer_for(&snapshot, actor.id, actor.team, motion, flow);
        trace!(id = %actor.id, steer = ?motion.steer, "steering accumulated");
    }
}

/// Applies each actor's steering as an acceleration-limited velocity
/// correction and advances its continuous position by `dt`.
///
/// The actor's tile follows its continuous position only onto walkable
/// tiles no other actor holds.
pub fn integrate(world: &mut World, dt: f32) {
    for id in world.actor_ids() {
        let Some(motion) = world.actor_mut(id).and_then(|a| a.motion.as_mut()) else {
            continue;
        };

        let correction = truncate(motion.steer, motion.max_speed) * dt * motion.acceleration;
        motion.velocity = truncate(motion.velocity + correction, motion.max_speed);
        motion.position += motion.velocity * dt;
        let tile = Position::from_vec2(motion.position);

        if world.grid().is_walkable(tile)
            && world.actor_at(tile).is_none_or(|other| other == id)
            && let Some(actor) = world.actor_mut(id)
            && actor.position != tile
        {
            trace!(%id, from = %actor.position, to = %tile, "tile synced");
            actor.position = tile;
        }
    }
}
