//! Decision providers for grid-world agents.
//!
//! An agent is driven by exactly one of them:
//!
//! - [`ai`]: behavior trees with utility arbitration
//! - [`fsm`]: explicit states with guarded transitions

pub mod ai;
pub mod fsm;
