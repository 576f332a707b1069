use game_core::{EntityId, Position};

/// What a pickup grants when consumed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PickupKind {
    /// Adds to hit points.
    Health,
    /// Adds to melee damage.
    Powerup,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pickup {
    pub id: EntityId,
    pub position: Position,
    pub kind: PickupKind,
    pub amount: f32,
}

/// A node of a patrol route. Routes are singly linked and may loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub id: EntityId,
    pub position: Position,
    pub next: Option<EntityId>,
}
