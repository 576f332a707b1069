//! Errors surfaced by the runtime API.
//!
//! Decision-time failures never reach this type: leaves that hit a missing
//! blackboard entry or a dead target report `Status::Failure` instead. These
//! variants cover setup and world-mutation calls made by the embedding code.
use game_core::{AiError, BlackboardError, EntityId, ErrorSeverity, GridError, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("cannot spawn on blocked tile {0}")]
    SpawnBlocked(Position),

    #[error("cannot spawn on {position}: occupied by {occupant}")]
    SpawnOccupied {
        position: Position,
        occupant: EntityId,
    },

    #[error("no free walkable tile left for spawning")]
    NoFreeTile,

    #[error("state {0} is not part of this state machine")]
    UnknownState(usize),

    #[error(transparent)]
    Blackboard(#[from] BlackboardError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl AiError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) | Self::SpawnOccupied { .. } | Self::NoFreeTile => {
                ErrorSeverity::Recoverable
            }
            Self::SpawnBlocked(_) | Self::UnknownState(_) => ErrorSeverity::Validation,
            Self::Blackboard(e) => e.severity(),
            Self::Grid(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "RUNTIME_UNKNOWN_ENTITY",
            Self::SpawnBlocked(_) => "RUNTIME_SPAWN_BLOCKED",
            Self::SpawnOccupied { .. } => "RUNTIME_SPAWN_OCCUPIED",
            Self::NoFreeTile => "RUNTIME_NO_FREE_TILE",
            Self::UnknownState(_) => "RUNTIME_UNKNOWN_STATE",
            Self::Blackboard(e) => e.error_code(),
            Self::Grid(e) => e.error_code(),
        }
    }
}
