//! Behavior-tree decision making for agents.
//!
//! Each agent owns one tree, built at spawn time and re-evaluated from the
//! root every tick:
//!
//! 1. **Focus**: the simulation points the shared [`AiContext`] at the agent
//! 2. **Evaluate**: the tree walks its composites and leaves, querying the
//!    world and writing the agent's blackboard
//! 3. **Intent**: leaves set the agent's [`game_core::Action`]; the last
//!    write in the pass wins
//!
//! # Core Components
//!
//! - [`AiContext`]: world access, focused entity, blackboard helpers
//! - [`nodes`]: condition and action leaves
//! - [`presets`]: complete trees for common archetypes

pub mod context;
pub mod nodes;
pub mod presets;

pub use context::AiContext;
pub use nodes::AgentSlots;
pub use presets::BehaviorTree;
