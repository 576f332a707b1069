use std::fmt;

use arrayvec::ArrayVec;

/// Unique identifier for any entity tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allegiance of an actor. Actors of different teams are hostile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub u32);

impl Team {
    /// Team controlled by the player.
    pub const PLAYER: Self = Self(0);
    /// Default team for spawned monsters.
    pub const MONSTERS: Self = Self(1);

    pub fn is_hostile_to(self, other: Team) -> bool {
        self != other
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `x` grows to the right and `y` grows downward, so "up" is `y - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Euclidean distance in tiles.
    pub fn distance(self, other: Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbours in the fixed order left, right, up, down.
    pub fn orthogonal(self) -> ArrayVec<Position, 4> {
        ArrayVec::from([
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ])
    }

    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x as f32, self.y as f32)
    }

    /// Tile containing a continuous position, rounding to the nearest centre.
    pub fn from_vec2(v: glam::Vec2) -> Self {
        Self::new((v.x + 0.5).floor() as i32, (v.y + 0.5).floor() as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
