//! Influence maps built from world queries.
//!
//! Every generator returns a fresh field; nothing is updated incrementally.

use game_core::{Grid, Position, ScalarField, Team};

use crate::world::{ActorFlags, World};

/// Hop distance to the nearest member of `team`.
pub fn approach_map(world: &World, team: Team) -> ScalarField {
    ScalarField::generate(world.grid(), world.team_positions(team))
}

/// Repulsion from `team`: the approach map scaled by `multiplier` and
/// relaxed again.
pub fn flee_map(world: &World, team: Team, multiplier: f32) -> ScalarField {
    ScalarField::flee(&approach_map(world, team), world.grid(), multiplier)
}

/// Hop distance to the nearest pack member.
pub fn hive_pack_map(world: &World) -> ScalarField {
    ScalarField::generate(world.grid(), world.flagged_positions(ActorFlags::HIVE))
}

/// Hop distance to a single tile.
pub fn to_target_map(grid: &Grid, target: Position) -> ScalarField {
    ScalarField::generate(grid, [target])
}
