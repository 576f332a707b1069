//! Grid-world behavior tree nodes.
//!
//! This module contains the leaves agents are assembled from. Nodes are
//! divided into:
//!
//! - `conditions`: Nodes that query the world and record what they found
//! - `actions`: Nodes that set the agent's intent or consume items
//!
//! Leaves never propagate errors. A dead agent, a dead target or an unset
//! blackboard slot makes the leaf return `Status::Failure`.

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;

use game_core::{BbHandle, Blackboard, BlackboardError, EntityId, Position};

/// Blackboard slots shared by the stock leaves, resolved once per agent at
/// tree-build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentSlots {
    /// Entity the agent is chasing or fleeing from.
    pub target: BbHandle<EntityId>,
    /// Pickup the agent is heading for.
    pub pickup: BbHandle<EntityId>,
    /// Waypoint the agent is heading for.
    pub waypoint: BbHandle<EntityId>,
    /// Patrol anchor.
    pub anchor: BbHandle<Position>,
}

impl AgentSlots {
    pub const TARGET: &'static str = "target";
    pub const PICKUP: &'static str = "pickup";
    pub const WAYPOINT: &'static str = "waypoint";
    pub const ANCHOR: &'static str = "anchor";

    pub fn register(blackboard: &mut Blackboard) -> Result<Self, BlackboardError> {
        Ok(Self {
            target: blackboard.register(Self::TARGET)?,
            pickup: blackboard.register(Self::PICKUP)?,
            waypoint: blackboard.register(Self::WAYPOINT)?,
            anchor: blackboard.register(Self::ANCHOR)?,
        })
    }
}
