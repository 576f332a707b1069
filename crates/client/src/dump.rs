//! Plain-text renderings of fields and the actor layout.
use std::fmt::Write;

use ai_runtime::{ActorFlags, World, influence};
use game_core::{FieldBlend, Grid, GridError, GridOracle, ScalarField, Team, TileKind};

const CELL: usize = 4;
const PACK_WEIGHT: f32 = 0.5;

/// Distance to the player plus half the distance to the nearest pack member.
/// Low values mark tiles close to both.
pub fn pack_pressure(world: &World) -> Result<ScalarField, GridError> {
    let approach = influence::approach_map(world, Team::PLAYER);
    let pack = influence::hive_pack_map(world);
    FieldBlend::new(&approach, 1.0, 1.0)
        .with(&pack, PACK_WEIGHT, 1.0)
        .evaluate()
}

/// One row per grid row, each tile right-aligned in a fixed-width cell.
/// Walls print `#`, unreached tiles `.`, everything else its rounded value.
pub fn render_field(grid: &Grid, field: &ScalarField) -> String {
    let dims = grid.dimensions();
    let mut out = String::new();
    for (i, position) in dims.positions().enumerate() {
        let cell = match grid.tile(position) {
            Some(TileKind::Wall) | None => "#".to_owned(),
            Some(_) if !field.is_reached(position) => ".".to_owned(),
            Some(_) => format!("{:.0}", field.value_at(i)),
        };
        let _ = write!(out, "{cell:>CELL$}");
        if position.x + 1 == dims.width as i32 {
            out.push('\n');
        }
    }
    out
}

/// The map with `@` for players, `h` for pack members and `m` for other
/// monsters.
pub fn render_actors(world: &World) -> String {
    let grid = world.grid();
    let dims = grid.dimensions();
    let mut out = String::new();
    for position in dims.positions() {
        let glyph = match world.actor_at(position).and_then(|id| world.actor(id)) {
            Some(actor) if actor.flags.contains(ActorFlags::PLAYER) => '@',
            Some(actor) if actor.flags.contains(ActorFlags::HIVE) => 'h',
            Some(_) => 'm',
            None => grid.tile(position).map_or('#', TileKind::glyph),
        };
        out.push(glyph);
        if position.x + 1 == dims.width as i32 {
            out.push('\n');
        }
    }
    out
}
