use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::types::Position;

/// Read-only grid accessor consumed by the field generators.
pub trait GridOracle: Send + Sync {
    fn dimensions(&self) -> GridDimensions;
    fn is_walkable(&self, position: Position) -> bool;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width.max(1) as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// All positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.area()).map(move |i| self.position(i))
    }
}

/// Terrain class of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }
}

/// Immutable rectangular tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: GridDimensions,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// An all-floor grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let dimensions = GridDimensions::new(width, height);
        Ok(Self {
            dimensions,
            tiles: vec![TileKind::Floor; dimensions.area()],
        })
    }

    pub fn from_tiles(dimensions: GridDimensions, tiles: Vec<TileKind>) -> Result<Self, GridError> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GridError::EmptyDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        if tiles.len() != dimensions.area() {
            return Err(GridError::SizeMismatch {
                expected: dimensions.area(),
                found: tiles.len(),
            });
        }
        Ok(Self { dimensions, tiles })
    }

    /// Parses a map where `#` is a wall and `.` or space is floor.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        Self::from_ascii_with_markers(text, "").map(|(grid, _)| grid)
    }

    /// Parses a map whose `markers` glyphs denote floor tiles carrying a
    /// spawn annotation. The annotations are returned in row-major order.
    pub fn from_ascii_with_markers(
        text: &str,
        markers: &str,
    ) -> Result<(Self, Vec<(Position, char)>), GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut found = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row_width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let tile = match glyph {
                    '#' => TileKind::Wall,
                    '.' | ' ' => TileKind::Floor,
                    other if markers.contains(other) => {
                        found.push((position, other));
                        TileKind::Floor
                    }
                    other => {
                        return Err(GridError::UnknownGlyph {
                            glyph: other,
                            position,
                        });
                    }
                };
                tiles.push(tile);
            }
        }

        let dimensions = GridDimensions::new(width as u32, rows.len() as u32);
        Ok((Self::from_tiles(dimensions, tiles)?, found))
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        self.dimensions
            .index(position)
            .map(|index| self.tiles[index])
    }

    pub fn set_tile(&mut self, position: Position, kind: TileKind) -> Result<(), GridError> {
        let index = self
            .dimensions
            .index(position)
            .ok_or(GridError::OutOfBounds(position))?;
        self.tiles[index] = kind;
        Ok(())
    }

    /// In-bounds walkable orthogonal neighbours, left, right, up, down.
    pub fn walkable_neighbors(&self, position: Position) -> ArrayVec<Position, 4> {
        position
            .orthogonal()
            .into_iter()
            .filter(|p| self.is_walkable(*p))
            .collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }
}

impl GridOracle for Grid {
    fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(TileKind::is_walkable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ascii_with_markers() {
        let (grid, markers) = Grid::from_ascii_with_markers("#####\n#.M.#\n#####\n", "M").unwrap();
        assert_eq!(grid.dimensions(), GridDimensions::new(5, 3));
        assert!(grid.is_walkable(Position::new(2, 1)));
        assert!(!grid.is_walkable(Position::new(0, 1)));
        assert!(!grid.is_walkable(Position::new(-1, 1)));
        assert_eq!(markers, vec![(Position::new(2, 1), 'M')]);
        assert_eq!(grid.walkable_count(), 3);
    }

    #[test]
    fn rejects_ragged_rows_and_unknown_glyphs() {
        assert!(matches!(
            Grid::from_ascii("###\n##\n"),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            Grid::from_ascii("#?#\n"),
            Err(GridError::UnknownGlyph { glyph: '?', .. })
        ));
        assert!(matches!(
            Grid::from_ascii(""),
            Err(GridError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let grid = Grid::from_ascii("..#\n...\n").unwrap();
        let around = grid.walkable_neighbors(Position::new(1, 0));
        assert_eq!(
            around.as_slice(),
            &[Position::new(0, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn index_round_trips_positions() {
        let dims = GridDimensions::new(4, 3);
        assert_eq!(dims.index(Position::new(3, 2)), Some(11));
        assert_eq!(dims.position(11), Position::new(3, 2));
        assert_eq!(dims.index(Position::new(4, 0)), None);
    }
}
