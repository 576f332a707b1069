//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access the world, the evaluating
//! entity and its blackboard.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
///
/// Evaluation takes `&mut self` because some nodes keep private bookkeeping
/// between ticks (e.g., the cooldown state and sampler of a
/// [`crate::UtilitySelector`]). Each agent owns its own tree, so this never
/// needs sharing.
pub trait Behavior<C>: Send {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context. Nodes can read the world
    ///   and modify it (e.g., set the agent's action or write a blackboard
    ///   slot).
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior is still in progress this tick
    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
