//! Deterministic data model and field algorithms for grid-world agents.
//!
//! `game-core` defines the canonical types (tiles, positions, actions,
//! blackboards) and the pure algorithms built on them: scalar influence
//! fields relaxed over the walkable grid and the flow fields derived from
//! them. Nothing here performs I/O or owns entities; the runtime crate wires
//! these pieces to agents.
pub mod action;
pub mod blackboard;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod math;
pub mod types;

pub use action::Action;
pub use blackboard::{BbHandle, Blackboard, BlackboardValue, Value, ValueKind};
pub use config::AiConfig;
pub use error::{AiError, BlackboardError, ErrorSeverity, GridError};
pub use field::{FieldBlend, FlowField, ScalarField};
pub use grid::{Grid, GridDimensions, GridOracle, TileKind};
pub use types::{EntityId, Position, Team};
