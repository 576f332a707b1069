//! Lightweight behavior tree library for tick-driven agent simulations.
//!
//! Trees are evaluated from the root once per tick. `Running` only informs
//! the parent composites within the same evaluation pass; nothing is resumed
//! across ticks, so a node that returned `Running` last tick is simply
//! evaluated again from scratch.
//!
//! - **Context-generic**: nodes are generic over a context type `C` that
//!   carries the world view, the evaluating entity and its blackboard
//! - **Exclusive ownership**: composites own their children; dropping a
//!   tree drops every subtree
//! - **Utility arbitration**: [`UtilitySelector`] picks children by score,
//!   deterministically or by weighted sampling, with optional inertia
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`]
//! - Decorator nodes: [`Inverter`]
//! - Scored choice: [`UtilitySelector`] with [`Arbitration`] and [`Cooldown`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod status;
pub mod utility;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Parallel, Selector, Sequence};
pub use decorator::Inverter;
pub use status::Status;
pub use utility::{Arbitration, Cooldown, Scorer, UtilitySelector};
