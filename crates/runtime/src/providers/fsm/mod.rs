//! Finite-state-machine decision making.
//!
//! An alternative to behavior trees for agents whose logic is a handful of
//! modes. Each tick the current [`State`] acts, then its outgoing
//! [`Transition`]s are tested in insertion order and the first one that
//! holds switches the machine for the next tick. There is no implicit
//! default transition.
//!
//! States and transitions run against the same [`AiContext`] the behavior
//! trees use, focused on the evaluating agent.

pub mod machine;
pub mod presets;
pub mod states;
pub mod transitions;

pub use machine::{StateId, StateMachine};

use crate::providers::ai::AiContext;

/// One mode of a state machine.
pub trait State: Send {
    fn name(&self) -> &'static str;

    /// Called once when the machine switches into this state.
    fn enter(&mut self, _ctx: &mut AiContext) {}

    /// Called once when the machine switches out of this state.
    fn exit(&mut self, _ctx: &mut AiContext) {}

    /// Per-tick side effect on the agent and the world.
    fn act(&mut self, ctx: &mut AiContext);
}

/// Guard on an edge between two states.
pub trait Transition: Send {
    fn is_available(&self, ctx: &AiContext) -> bool;
}
