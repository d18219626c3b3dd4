//! Tile codes and the level grid
//!
//! The grid is always rectangular; anything outside it reads as air.

use serde::{Deserialize, Serialize};

use crate::consts::TILE;

/// Tile codes as authored in level strings (`'0'..='8'`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Spike,
    Platform,
    DoorTop,
    DoorBottom,
    Castle,
}

/// Collision behaviour of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCategory {
    /// No interaction
    Air,
    /// Blocks on every axis
    Solid,
    /// Blocks downward motion onto its top edge only
    OneWay,
    /// Hurts the player through a reduced hitbox
    Deadly,
    /// No collision; used for exit detection
    Door,
}

impl Tile {
    /// Parse an authored tile character. Unknown characters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '0' => Tile::Air,
            '1' => Tile::Grass,
            '2' => Tile::Dirt,
            '3' => Tile::Stone,
            '4' => Tile::Spike,
            '5' => Tile::Platform,
            '6' => Tile::DoorTop,
            '7' => Tile::DoorBottom,
            '8' => Tile::Castle,
            _ => return None,
        })
    }

    pub fn category(self) -> TileCategory {
        match self {
            Tile::Air => TileCategory::Air,
            Tile::Grass | Tile::Dirt | Tile::Stone | Tile::Castle => TileCategory::Solid,
            Tile::Platform => TileCategory::OneWay,
            Tile::Spike => TileCategory::Deadly,
            Tile::DoorTop | Tile::DoorBottom => TileCategory::Door,
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.category() == TileCategory::Solid
    }
}

/// Rectangular tile grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from rows of equal length. Callers are expected to have
    /// normalized ragged input already (see `TileGrid::from_rows`).
    fn from_parts(cols: usize, rows: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(cols * rows, tiles.len());
        Self { cols, rows, tiles }
    }

    /// Build a grid from authored strings.
    ///
    /// Short rows are padded with air up to the widest row and unknown
    /// characters become air. Returns the grid plus a count of each kind of
    /// repair so the caller can report it.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> (Self, GridRepairs) {
        let cols = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut repairs = GridRepairs::default();
        let mut tiles = Vec::with_capacity(cols * rows.len());

        for row in rows {
            let row = row.as_ref();
            let mut width = 0;
            for c in row.chars() {
                width += 1;
                tiles.push(Tile::from_char(c).unwrap_or_else(|| {
                    repairs.unknown_tiles += 1;
                    Tile::Air
                }));
            }
            if width < cols {
                repairs.padded_rows += 1;
                tiles.extend(std::iter::repeat_n(Tile::Air, cols - width));
            }
        }

        (Self::from_parts(cols, rows.len(), tiles), repairs)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width in world units
    pub fn pixel_width(&self) -> f32 {
        self.cols as f32 * TILE
    }

    /// Height in world units
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * TILE
    }

    /// Tile at (col, row); out of range reads as air
    #[inline]
    pub fn get(&self, col: i32, row: i32) -> Tile {
        if col < 0 || row < 0 {
            return Tile::Air;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return Tile::Air;
        }
        self.tiles[row * self.cols + col]
    }

    #[inline]
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.get(col, row).is_solid()
    }

    /// Iterate all door cells in row-major order
    pub fn doors(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, t)| {
            (t.category() == TileCategory::Door)
                .then(|| ((i % self.cols) as i32, (i / self.cols) as i32))
        })
    }
}

/// Tile/column index containing a world coordinate
#[inline]
pub fn cell(v: f32) -> i32 {
    (v / TILE).floor() as i32
}

/// What `TileGrid::from_rows` had to fix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridRepairs {
    pub padded_rows: usize,
    pub unknown_tiles: usize,
}

impl GridRepairs {
    pub fn is_clean(&self) -> bool {
        self.padded_rows == 0 && self.unknown_tiles == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_categories() {
        assert_eq!(Tile::Grass.category(), TileCategory::Solid);
        assert_eq!(Tile::Castle.category(), TileCategory::Solid);
        assert_eq!(Tile::Platform.category(), TileCategory::OneWay);
        assert_eq!(Tile::Spike.category(), TileCategory::Deadly);
        assert_eq!(Tile::DoorTop.category(), TileCategory::Door);
        assert_eq!(Tile::Air.category(), TileCategory::Air);
    }

    #[test]
    fn test_ragged_rows_and_unknown_codes_are_repaired() {
        let (grid, repairs) = TileGrid::from_rows(&["0110", "1x", "2222"]);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(repairs.padded_rows, 1);
        assert_eq!(repairs.unknown_tiles, 1);
        assert_eq!(grid.get(1, 1), Tile::Air);
        assert_eq!(grid.get(3, 1), Tile::Air);
        assert_eq!(grid.get(0, 1), Tile::Grass);
    }

    #[test]
    fn test_doors_in_scan_order() {
        let (grid, _) = TileGrid::from_rows(&["0060", "0070"]);
        let doors: Vec<_> = grid.doors().collect();
        assert_eq!(doors, vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn test_cell_floors_negative_coordinates() {
        assert_eq!(cell(-0.5), -1);
        assert_eq!(cell(15.9), 0);
        assert_eq!(cell(16.0), 1);
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_is_air(col in -50i32..100, row in -50i32..100) {
            let (grid, _) = TileGrid::from_rows(&["1111", "1111", "1111"]);
            let inside = (0..4).contains(&col) && (0..3).contains(&row);
            prop_assert_eq!(grid.is_solid(col, row), inside);
        }

        #[test]
        fn prop_grid_is_rectangular(rows in proptest::collection::vec("[0-9a-z]{0,12}", 1..8)) {
            let (grid, _) = TileGrid::from_rows(&rows);
            let widest = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
            prop_assert_eq!(grid.cols(), widest);
            prop_assert_eq!(grid.rows(), rows.len());
        }
    }
}
