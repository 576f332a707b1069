use std::fmt;

use tracing::debug;

use super::{State, Transition};
use crate::error::{Result, RuntimeError};
use crate::providers::ai::AiContext;

/// Index of a state inside the [`StateMachine`] that minted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.0)
    }
}

struct Edge {
    guard: Box<dyn Transition>,
    to: StateId,
}

/// States plus per-state guarded edges.
///
/// The first state added is the initial state. Its `enter` is not called.
#[derive(Default)]
pub struct StateMachine {
    states: Vec<Box<dyn State>>,
    edges: Vec<Vec<Edge>>,
    current: usize,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, state: impl State + 'static) -> StateId {
        self.states.push(Box::new(state));
        self.edges.push(Vec::new());
        StateId(self.states.len() - 1)
    }

    /// Adds an edge tested after every edge already leaving `from`.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        guard: impl Transition + 'static,
    ) -> Result<()> {
        if to.0 >= self.states.len() {
            return Err(RuntimeError::UnknownState(to.0));
        }
        let edges = self
            .edges
            .get_mut(from.0)
            .ok_or(RuntimeError::UnknownState(from.0))?;
        edges.push(Edge {
            guard: Box::new(guard),
            to,
        });
        Ok(())
    }

    pub fn current(&self) -> StateId {
        StateId(self.current)
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.states.get(self.current).map(|state| state.name())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Acts in the current state, then takes the first available edge.
    pub fn tick(&mut self, ctx: &mut AiContext) {
        let Some(state) = self.states.get_mut(self.current) else {
            return;
        };
        state.act(ctx);

        let next = self.edges[self.current]
            .iter()
            .find(|edge| edge.guard.is_available(ctx))
            .map(|edge| edge.to.0);

        if let Some(next) = next {
            debug!(
                entity = %ctx.entity(),
                from = self.states[self.current].name(),
                to = self.states[next].name(),
                "state switch"
            );
            self.states[self.current].exit(ctx);
            self.current = next;
            self.states[self.current].enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Actor, World};
    use game_core::{Grid, Position};

    struct Counting {
        name: &'static str,
    }

    impl State for Counting {
        fn name(&self) -> &'static str {
            self.name
        }

        fn enter(&mut self, ctx: &mut AiContext) {
            if let Some(actor) = ctx.actor_mut() {
                actor.melee_damage += 100.0;
            }
        }

        fn exit(&mut self, ctx: &mut AiContext) {
            if let Some(actor) = ctx.actor_mut() {
                actor.melee_damage += 10.0;
            }
        }

        fn act(&mut self, ctx: &mut AiContext) {
            if let Some(actor) = ctx.actor_mut() {
                actor.hitpoints += 1.0;
            }
        }
    }

    struct HitpointsAbove(f32);

    impl Transition for HitpointsAbove {
        fn is_available(&self, ctx: &AiContext) -> bool {
            ctx.actor().is_some_and(|a| a.hitpoints > self.0)
        }
    }

    struct Never;

    impl Transition for Never {
        fn is_available(&self, _ctx: &AiContext) -> bool {
            false
        }
    }

    fn context() -> AiContext {
        let mut world = World::new(Grid::new(3, 3).unwrap(), 1);
        let id = world
            .spawn_actor(
                Actor::monster(Position::new(1, 1))
                    .with_hitpoints(0.0)
                    .with_melee_damage(0.0),
            )
            .unwrap();
        let mut ctx = AiContext::new(world);
        ctx.focus(id);
        ctx
    }

    #[test]
    fn acts_before_testing_transitions_and_fires_exit_enter() {
        let mut ctx = context();
        let mut fsm = StateMachine::new();
        let a = fsm.add_state(Counting { name: "a" });
        let b = fsm.add_state(Counting { name: "b" });
        fsm.add_transition(a, b, HitpointsAbove(1.5)).unwrap();

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current(), a);

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current(), b);
        assert_eq!(fsm.current_name(), Some("b"));
        assert_eq!(ctx.actor().unwrap().melee_damage, 110.0);
    }

    #[test]
    fn first_available_edge_wins() {
        let mut ctx = context();
        let mut fsm = StateMachine::new();
        let a = fsm.add_state(Counting { name: "a" });
        let b = fsm.add_state(Counting { name: "b" });
        let c = fsm.add_state(Counting { name: "c" });
        fsm.add_transition(a, b, Never).unwrap();
        fsm.add_transition(a, c, HitpointsAbove(0.0)).unwrap();
        fsm.add_transition(a, b, HitpointsAbove(0.0)).unwrap();

        fsm.tick(&mut ctx);
        assert_eq!(fsm.current(), c);
    }

    #[test]
    fn stays_put_without_an_available_edge() {
        let mut ctx = context();
        let mut fsm = StateMachine::new();
        let a = fsm.add_state(Counting { name: "a" });
        let b = fsm.add_state(Counting { name: "b" });
        fsm.add_transition(a, b, Never).unwrap();

        for _ in 0..3 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current(), a);
        assert_eq!(ctx.actor().unwrap().hitpoints, 3.0);
    }

    #[test]
    fn rejects_foreign_state_ids() {
        let mut other = StateMachine::new();
        other.add_state(Counting { name: "x" });
        let foreign = other.add_state(Counting { name: "y" });

        let mut fsm = StateMachine::new();
        let a = fsm.add_state(Counting { name: "a" });
        assert_eq!(
            fsm.add_transition(a, foreign, Never),
            Err(RuntimeError::UnknownState(1))
        );
    }

    #[test]
    fn empty_machine_is_inert() {
        let mut ctx = context();
        let mut fsm = StateMachine::new();
        fsm.tick(&mut ctx);
        assert!(fsm.is_empty());
        assert_eq!(fsm.current_name(), None);
    }
}
