//! Discrete per-tick intents.

use crate::types::Position;

/// The single discrete intent an agent holds for the current tick.
///
/// Later decision steps overwrite earlier ones within the same tick.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Action {
    #[default]
    Nop,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Heal another actor. Hit points are applied by the deciding state.
    Heal,
    HealSelf,
}

impl Action {
    /// The four movement actions in the fixed order left, right, up, down.
    pub const MOVES: [Action; 4] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
    ];

    pub fn is_move(self) -> bool {
        self.delta().is_some()
    }

    /// Tile offset of a movement action.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Action::MoveLeft => Some((-1, 0)),
            Action::MoveRight => Some((1, 0)),
            Action::MoveUp => Some((0, -1)),
            Action::MoveDown => Some((0, 1)),
            _ => None,
        }
    }

    /// Destination tile of a movement action, or `from` for non-moves.
    pub fn apply(self, from: Position) -> Position {
        match self.delta() {
            Some((dx, dy)) => from.offset(dx, dy),
            None => from,
        }
    }

    /// The opposite move. Non-move actions map to themselves.
    pub fn inverse(self) -> Action {
        match self {
            Action::MoveLeft => Action::MoveRight,
            Action::MoveRight => Action::MoveLeft,
            Action::MoveUp => Action::MoveDown,
            Action::MoveDown => Action::MoveUp,
            other => other,
        }
    }

    pub fn is_perpendicular_to(self, other: Action) -> bool {
        match (self.delta(), other.delta()) {
            (Some((ax, ay)), Some((bx, by))) => ax * bx + ay * by == 0,
            _ => false,
        }
    }

    /// Single-step move that reduces the larger axis of the offset first.
    ///
    /// Horizontal wins only when strictly larger; otherwise the move is
    /// vertical, which means a zero offset yields `MoveDown`.
    pub fn move_towards(from: Position, to: Position) -> Action {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Action::MoveRight
            } else {
                Action::MoveLeft
            }
        } else if dy < 0 {
            Action::MoveUp
        } else {
            Action::MoveDown
        }
    }

    pub fn move_away(from: Position, threat: Position) -> Action {
        Self::move_towards(from, threat).inverse()
    }
}
