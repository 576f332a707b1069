//! In-memory entity store the decision layer reads and writes.
//!
//! Entities are kept in ordered maps keyed by [`EntityId`], so every
//! iteration order is deterministic for a given spawn sequence.

mod actor;
mod items;

pub use actor::{Actor, ActorFlags, HealCooldown, Motion};
pub use items::{Pickup, PickupKind, Waypoint};

use std::collections::BTreeMap;

use game_core::{AiConfig, EntityId, Grid, GridOracle, Position, Team};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Result, RuntimeError};

pub struct World {
    grid: Grid,
    config: AiConfig,
    actors: BTreeMap<EntityId, Actor>,
    pickups: BTreeMap<EntityId, Pickup>,
    waypoints: BTreeMap<EntityId, Waypoint>,
    next_id: u32,
    rng: ChaCha8Rng,
}

impl World {
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            config: AiConfig::default(),
            actors: BTreeMap::new(),
            pickups: BTreeMap::new(),
            waypoints: BTreeMap::new(),
            next_id: 1,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ===== actors =====

    /// Adds an actor on a free walkable tile and returns its id.
    pub fn spawn_actor(&mut self, mut actor: Actor) -> Result<EntityId> {
        let position = actor.position;
        if !self.grid.is_walkable(position) {
            return Err(RuntimeError::SpawnBlocked(position));
        }
        if let Some(occupant) = self.actor_at(position) {
            return Err(RuntimeError::SpawnOccupied { position, occupant });
        }

        let id = self.allocate_id();
        actor.id = id;
        debug!(%id, %position, team = actor.team.0, "spawned actor");
        self.actors.insert(id, actor);
        Ok(id)
    }

    pub fn remove_actor(&mut self, id: EntityId) -> Option<Actor> {
        let removed = self.actors.remove(&id);
        if removed.is_some() {
            debug!(%id, "removed actor");
        }
        removed
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn try_actor_mut(&mut self, id: EntityId) -> Result<&mut Actor> {
        self.actors
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownEntity(id))
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn actors_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.values_mut()
    }

    pub fn actor_ids(&self) -> Vec<EntityId> {
        self.actors.keys().copied().collect()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        self.actors
            .values()
            .find(|actor| actor.position == position)
            .map(|actor| actor.id)
    }

    /// Closest actor of another team within `radius` tiles (Euclidean).
    pub fn nearest_enemy(&self, id: EntityId, radius: f32) -> Option<(EntityId, f32)> {
        let me = self.actor(id)?;
        self.nearest_actor_where(me.position, |other| {
            other.id != id && me.is_hostile_to(other)
        })
        .filter(|(_, distance)| *distance <= radius)
    }

    /// Closest other actor of the same team, at any distance.
    pub fn nearest_ally(&self, id: EntityId) -> Option<(EntityId, f32)> {
        let me = self.actor(id)?;
        self.nearest_actor_where(me.position, |other| {
            other.id != id && other.team == me.team
        })
    }

    /// Ties keep the lowest id.
    fn nearest_actor_where(
        &self,
        from: Position,
        mut filter: impl FnMut(&Actor) -> bool,
    ) -> Option<(EntityId, f32)> {
        self.actors
            .values()
            .filter(|other| filter(*other))
            .map(|other| (other.id, from.distance(other.position)))
            .fold(None, |best: Option<(EntityId, f32)>, candidate| match best {
                Some((_, d)) if d <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    pub fn team_positions(&self, team: Team) -> impl Iterator<Item = Position> + '_ {
        self.actors
            .values()
            .filter(move |actor| actor.team == team)
            .map(|actor| actor.position)
    }

    pub fn flagged_positions(&self, flags: ActorFlags) -> impl Iterator<Item = Position> + '_ {
        self.actors
            .values()
            .filter(move |actor| actor.flags.contains(flags))
            .map(|actor| actor.position)
    }

    /// A random walkable tile with no actor on it.
    pub fn random_free_tile(&mut self) -> Result<Position> {
        let free: Vec<Position> = self
            .grid
            .dimensions()
            .positions()
            .filter(|p| self.grid.is_walkable(*p) && self.actor_at(*p).is_none())
            .collect();
        if free.is_empty() {
            return Err(RuntimeError::NoFreeTile);
        }
        let pick = self.rng.gen_range(0..free.len());
        Ok(free[pick])
    }

    // ===== pickups =====

    pub fn spawn_pickup(&mut self, kind: PickupKind, position: Position, amount: f32) -> EntityId {
        let id = self.allocate_id();
        self.pickups.insert(
            id,
            Pickup {
                id,
                position,
                kind,
                amount,
            },
        );
        id
    }

    pub fn pickup(&self, id: EntityId) -> Option<&Pickup> {
        self.pickups.get(&id)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.values()
    }

    pub fn nearest_pickup(
        &self,
        from: Position,
        kind: PickupKind,
        radius: f32,
    ) -> Option<(EntityId, f32)> {
        self.pickups
            .values()
            .filter(|p| p.kind == kind)
            .map(|p| (p.id, from.distance(p.position)))
            .fold(None, |best: Option<(EntityId, f32)>, candidate| match best {
                Some((_, d)) if d <= candidate.1 => best,
                _ => Some(candidate),
            })
            .filter(|(_, distance)| *distance <= radius)
    }

    /// Removes every pickup of `kind` on `position` and returns the total amount.
    pub fn take_pickups_at(&mut self, position: Position, kind: PickupKind) -> Option<f32> {
        let taken: Vec<EntityId> = self
            .pickups
            .values()
            .filter(|p| p.position == position && p.kind == kind)
            .map(|p| p.id)
            .collect();
        if taken.is_empty() {
            return None;
        }
        let total = taken
            .iter()
            .filter_map(|id| self.pickups.remove(id))
            .map(|p| p.amount)
            .sum();
        Some(total)
    }

    // ===== waypoints =====

    pub fn add_waypoint(&mut self, position: Position) -> EntityId {
        let id = self.allocate_id();
        self.waypoints.insert(
            id,
            Waypoint {
                id,
                position,
                next: None,
            },
        );
        id
    }

    pub fn link_waypoint(&mut self, from: EntityId, to: EntityId) -> Result<()> {
        if !self.waypoints.contains_key(&to) {
            return Err(RuntimeError::UnknownEntity(to));
        }
        let waypoint = self
            .waypoints
            .get_mut(&from)
            .ok_or(RuntimeError::UnknownEntity(from))?;
        waypoint.next = Some(to);
        Ok(())
    }

    /// Creates waypoints at `positions` linked in order and closed into a loop.
    pub fn add_waypoint_loop(&mut self, positions: &[Position]) -> Result<Vec<EntityId>> {
        let ids: Vec<EntityId> = positions.iter().map(|p| self.add_waypoint(*p)).collect();
        for (i, id) in ids.iter().enumerate() {
            self.link_waypoint(*id, ids[(i + 1) % ids.len()])?;
        }
        Ok(ids)
    }

    pub fn waypoint(&self, id: EntityId) -> Option<&Waypoint> {
        self.waypoints.get(&id)
    }

    // ===== any entity =====

    /// Tile of any live entity: actor, pickup or waypoint.
    pub fn entity_position(&self, id: EntityId) -> Option<Position> {
        self.actors
            .get(&id)
            .map(|a| a.position)
            .or_else(|| self.pickups.get(&id).map(|p| p.position))
            .or_else(|| self.waypoints.get(&id).map(|w| w.position))
    }
}
