//! Common error infrastructure for game-core.
//!
//! Every error enum in the workspace reports an [`ErrorSeverity`] through the
//! [`AiError`] trait so callers can decide whether to retry, reject, or log a
//! bug without matching on concrete variants.

use crate::types::Position;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Examples: key not written yet, target tile occupied
    Recoverable,

    /// Invalid input; retrying without changes will fail again.
    ///
    /// Examples: malformed map text, type mismatch on a blackboard key
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Uniform classification interface implemented by every error enum.
pub trait AiError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, useful in logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Errors raised by [`Blackboard`](crate::Blackboard) accesses.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlackboardError {
    #[error("blackboard entry `{name}` has not been written")]
    NotFound { name: &'static str },

    #[error("blackboard key `{name}` is registered as {registered}, requested as {requested}")]
    TypeMismatch {
        name: &'static str,
        registered: &'static str,
        requested: &'static str,
    },

    #[error("blackboard handle {index} does not belong to this blackboard")]
    UnknownHandle { index: usize },
}

impl AiError for BlackboardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::Recoverable,
            Self::TypeMismatch { .. } => ErrorSeverity::Validation,
            Self::UnknownHandle { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "BLACKBOARD_NOT_FOUND",
            Self::TypeMismatch { .. } => "BLACKBOARD_TYPE_MISMATCH",
            Self::UnknownHandle { .. } => "BLACKBOARD_UNKNOWN_HANDLE",
        }
    }
}

/// Errors raised while building or querying a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognised map glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("field size {found} does not match grid area {expected}")]
    SizeMismatch { expected: usize, found: usize },
}

impl AiError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds(_) => ErrorSeverity::Recoverable,
            Self::EmptyDimensions { .. } | Self::RaggedRow { .. } | Self::UnknownGlyph { .. } => {
                ErrorSeverity::Validation
            }
            Self::SizeMismatch { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDimensions { .. } => "GRID_EMPTY",
            Self::RaggedRow { .. } => "GRID_RAGGED_ROW",
            Self::UnknownGlyph { .. } => "GRID_UNKNOWN_GLYPH",
            Self::OutOfBounds(_) => "GRID_OUT_OF_BOUNDS",
            Self::SizeMismatch { .. } => "GRID_SIZE_MISMATCH",
        }
    }
}
