//! Tick driver tying decisions, resolution and steering together.
//!
//! One [`Simulation::step`] runs, in order:
//!
//! 1. every brain against the world, in entity id order
//! 2. action resolution ([`crate::resolve`]) and cooldown countdown
//! 3. steering accumulation from a snapshot, then integration
//! 4. bookkeeping: intents move to `previous_action`, dead brains drop
//!
//! The target/flow field pair lives in a [`FieldCache`] and is only rebuilt
//! when the flow target changes.

use std::collections::BTreeMap;

use behavior_tree::{Behavior, Status};
use game_core::{Action, EntityId, FlowField, Grid, GridOracle, Position, ScalarField};
use tracing::{debug, trace, warn};

use crate::error::{Result, RuntimeError};
use crate::influence;
use crate::providers::ai::{AiContext, BehaviorTree};
use crate::providers::fsm::StateMachine;
use crate::resolve::{self, Outcome};
use crate::steering;
use crate::world::{Actor, World};

/// Decision mode of one agent. The two modes are mutually exclusive.
pub enum Brain {
    Tree(BehaviorTree),
    Fsm(StateMachine),
}

impl Brain {
    /// Runs one decision pass. State machines have no root status.
    pub fn tick(&mut self, ctx: &mut AiContext) -> Option<Status> {
        match self {
            Self::Tree(tree) => Some(tree.tick(ctx)),
            Self::Fsm(fsm) => {
                fsm.tick(ctx);
                None
            }
        }
    }
}

impl From<BehaviorTree> for Brain {
    fn from(tree: BehaviorTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<StateMachine> for Brain {
    fn from(fsm: StateMachine) -> Self {
        Self::Fsm(fsm)
    }
}

struct TargetFields {
    target: Position,
    map: ScalarField,
    flow: FlowField,
}

/// Target map and the flow field derived from it.
///
/// Both fields are built before either is published, so readers never see
/// a map paired with a stale flow.
#[derive(Default)]
pub struct FieldCache {
    current: Option<TargetFields>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<Position> {
        self.current.as_ref().map(|fields| fields.target)
    }

    pub fn target_map(&self) -> Option<&ScalarField> {
        self.current.as_ref().map(|fields| &fields.map)
    }

    pub fn flow(&self) -> Option<&FlowField> {
        self.current.as_ref().map(|fields| &fields.flow)
    }

    /// Points the cache at `target`, or clears it with `None`.
    ///
    /// Returns `true` when the fields were rebuilt or discarded.
    pub fn set_target(&mut self, grid: &Grid, target: Option<Position>, flow_steps: u32) -> bool {
        if self.target() == target {
            return false;
        }
        self.current = target.map(|target| {
            let map = influence::to_target_map(grid, target);
            let flow = FlowField::extract(&map, flow_steps);
            TargetFields { target, map, flow }
        });
        debug!(?target, "flow target changed");
        true
    }

    /// Selecting the current target again clears it.
    pub fn toggle_target(&mut self, grid: &Grid, target: Position, flow_steps: u32) {
        let next = (self.target() != Some(target)).then_some(target);
        self.set_target(grid, next, flow_steps);
    }
}

/// What happened during one [`Simulation::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Resolved intents in id order.
    pub outcomes: Vec<(EntityId, Outcome)>,
    /// Agents whose tree root returned `Failure`.
    pub failed: Vec<EntityId>,
}

impl TickReport {
    pub fn moves(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Moved { .. }))
            .count()
    }

    pub fn attacks(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Attacked { .. }))
            .count()
    }

    pub fn kills(&self) -> Vec<EntityId> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                Outcome::Attacked {
                    target,
                    killed: true,
                    ..
                } => Some(*target),
                _ => None,
            })
            .collect()
    }
}

pub struct Simulation {
    ctx: AiContext,
    brains: BTreeMap<EntityId, Brain>,
    fields: FieldCache,
    tick: u64,
    dt: f32,
}

impl Simulation {
    pub const DEFAULT_DT: f32 = 0.1;

    pub fn new(world: World) -> Self {
        Self {
            ctx: AiContext::new(world),
            brains: BTreeMap::new(),
            fields: FieldCache::new(),
            tick: 0,
            dt: Self::DEFAULT_DT,
        }
    }

    /// Integration time step for kinematic actors.
    #[must_use]
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    pub fn fields(&self) -> &FieldCache {
        &self.fields
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn brain(&self, id: EntityId) -> Option<&Brain> {
        self.brains.get(&id)
    }

    /// Spawns an actor driven by `brain`.
    pub fn spawn(&mut self, actor: Actor, brain: impl Into<Brain>) -> Result<EntityId> {
        let id = self.ctx.world.spawn_actor(actor)?;
        self.brains.insert(id, brain.into());
        Ok(id)
    }

    /// Spawns an actor whose brain needs the actor itself at build time,
    /// typically to register blackboard slots.
    pub fn spawn_with<F>(&mut self, mut actor: Actor, build: F) -> Result<EntityId>
    where
        F: FnOnce(&mut Actor) -> Result<Brain>,
    {
        let brain = build(&mut actor)?;
        self.spawn(actor, brain)
    }

    /// Replaces the brain of an existing actor.
    pub fn attach(&mut self, id: EntityId, brain: impl Into<Brain>) -> Result<()> {
        if !self.ctx.world.is_alive(id) {
            return Err(RuntimeError::UnknownEntity(id));
        }
        self.brains.insert(id, brain.into());
        Ok(())
    }

    /// Sets or clears the tile flow-following actors head for.
    pub fn set_flow_target(&mut self, target: Option<Position>) {
        let steps = self.ctx.world.config().flow_step_count;
        if let Some(position) = target
            && !self.ctx.world.grid().dimensions().contains(position)
        {
            warn!(%position, "flow target outside the grid ignored");
            return;
        }
        self.fields.set_target(self.ctx.world.grid(), target, steps);
    }

    /// Toggles the flow target: picking the current target clears it.
    pub fn select_flow_target(&mut self, target: Position) {
        let next = (self.fields.target() != Some(target)).then_some(target);
        self.set_flow_target(next);
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> TickReport {
        let mut failed = Vec::new();

        for (&id, brain) in self.brains.iter_mut() {
            if !self.ctx.world.is_alive(id) {
                continue;
            }
            self.ctx.focus(id);
            if brain.tick(&mut self.ctx) == Some(Status::Failure) {
                trace!(entity = %id, "tree failed this tick");
                failed.push(id);
            }
        }

        let outcomes = resolve::resolve_all(&mut self.ctx.world);

        steering::accumulate(&mut self.ctx.world, self.fields.flow());
        steering::integrate(&mut self.ctx.world, self.dt);

        for actor in self.ctx.world.actors_mut() {
            actor.previous_action = actor.action;
            actor.action = Action::Nop;
        }
        let world = &self.ctx.world;
        self.brains.retain(|id, _| world.is_alive(*id));

        let report = TickReport {
            tick: self.tick,
            outcomes,
            failed,
        };
        self.tick += 1;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::presets;
    use crate::providers::fsm::presets as fsm_presets;
    use crate::providers::fsm::states;
    use game_core::Grid;

    fn world() -> World {
        World::new(Grid::new(12, 12).unwrap(), 11)
    }

    #[test]
    fn field_cache_rebuilds_only_on_change() {
        let grid = Grid::new(5, 5).unwrap();
        let mut cache = FieldCache::new();

        assert!(cache.set_target(&grid, Some(Position::new(2, 2)), 2));
        assert!(!cache.set_target(&grid, Some(Position::new(2, 2)), 2));
        assert_eq!(cache.target_map().unwrap().get(Position::new(0, 0)), Some(4.0));

        cache.toggle_target(&grid, Position::new(2, 2), 2);
        assert!(cache.target().is_none());
        assert!(cache.flow().is_none());
        assert!(cache.target_map().is_none());
    }

    #[test]
    fn berserker_reaches_and_kills_a_player() {
        let mut sim = Simulation::new(world());
        let player = sim
            .world_mut()
            .spawn_actor(Actor::player(Position::new(5, 1)).with_hitpoints(30.0))
            .unwrap();
        let monster = sim
            .spawn_with(Actor::monster(Position::new(1, 1)), |actor| {
                Ok(presets::berserker(actor, 10.0)?.into())
            })
            .unwrap();

        let mut kills = Vec::new();
        for _ in 0..8 {
            kills.extend(sim.step().kills());
        }
        assert_eq!(kills, vec![player]);
        assert!(sim.world().is_alive(monster));
        assert_eq!(sim.tick_count(), 8);
    }

    #[test]
    fn brains_of_dead_actors_are_dropped() {
        let mut sim = Simulation::new(world());
        let mut idle = StateMachine::new();
        idle.add_state(states::Nop);
        let victim = sim
            .spawn(Actor::monster(Position::new(2, 1)).with_hitpoints(5.0), idle)
            .unwrap();
        let player = sim
            .world_mut()
            .spawn_actor(Actor::player(Position::new(1, 1)))
            .unwrap();
        sim.world_mut().actor_mut(player).unwrap().action = Action::MoveRight;

        let report = sim.step();
        assert_eq!(report.kills(), vec![victim]);
        assert!(sim.brain(victim).is_none());
    }

    #[test]
    fn intents_become_previous_actions() {
        let mut sim = Simulation::new(world());
        let player = sim
            .world_mut()
            .spawn_actor(Actor::player(Position::new(3, 3)))
            .unwrap();
        sim.world_mut().actor_mut(player).unwrap().action = Action::MoveDown;

        let report = sim.step();
        assert_eq!(report.moves(), 1);
        let actor = sim.world().actor(player).unwrap();
        assert_eq!(actor.previous_action, Action::MoveDown);
        assert_eq!(actor.action, Action::Nop);
        assert_eq!(actor.position, Position::new(3, 4));
    }

    #[test]
    fn attach_rejects_unknown_entities() {
        let mut sim = Simulation::new(world());
        let fsm = fsm_presets::healer_companion(5.0, 50.0).unwrap();
        assert_eq!(
            sim.attach(EntityId(99), fsm),
            Err(RuntimeError::UnknownEntity(EntityId(99)))
        );
    }

    #[test]
    fn flow_target_outside_the_grid_is_ignored() {
        let mut sim = Simulation::new(world());
        sim.set_flow_target(Some(Position::new(40, 40)));
        assert!(sim.fields().target().is_none());

        sim.select_flow_target(Position::new(4, 4));
        assert_eq!(sim.fields().target(), Some(Position::new(4, 4)));
        sim.select_flow_target(Position::new(4, 4));
        assert!(sim.fields().target().is_none());
    }
}
