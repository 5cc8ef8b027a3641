//! The tile grid.
//!
//! A fixed `cols × rows` array of tiles stored row-major. The grid is built
//! once by the level loader and never resized; moves only rewrite tiles.
//!
//! Positions outside the grid read as `Tile::Empty`, so "off the edge" and
//! "non-playable space" look the same to the move rules.

use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, Position, Tile};

/// Fixed-size tile grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Build a grid from row-major cells.
    ///
    /// Panics if `cells.len() != cols * rows`.
    #[must_use]
    pub fn from_cells(cols: usize, rows: usize, cells: Vec<Tile>) -> Self {
        assert_eq!(
            cells.len(),
            cols * rows,
            "Grid of {}x{} needs {} cells, got {}",
            cols,
            rows,
            cols * rows,
            cells.len()
        );
        Self { cols, rows, cells }
    }

    /// Build a grid with every cell set to `tile`.
    #[must_use]
    pub fn filled(cols: usize, rows: usize, tile: Tile) -> Self {
        Self::from_cells(cols, rows, vec![tile; cols * rows])
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// True when the cell vector matches the declared dimensions.
    ///
    /// Always true for grids built through `from_cells`; deserialized grids
    /// are checked with this before use.
    #[must_use]
    pub(crate) fn is_well_formed(&self) -> bool {
        self.cols.checked_mul(self.rows) == Some(self.cells.len())
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_in_bounds(pos) {
            Some(pos.y as usize * self.cols + pos.x as usize)
        } else {
            None
        }
    }

    /// True iff `0 <= x < cols` and `0 <= y < rows`.
    #[must_use]
    #[inline]
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.cols && (pos.y as usize) < self.rows
    }

    /// Tile at `pos`, or `Tile::Empty` when out of bounds.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.index(pos).map_or(Tile::Empty, |i| self.cells[i])
    }

    /// In bounds and not `Empty`.
    #[must_use]
    pub fn is_playable_at(&self, pos: Position) -> bool {
        self.tile_at(pos).is_playable()
    }

    /// Holds a `Block` or `BlockOnTarget`.
    #[must_use]
    pub fn is_occupied_by_block(&self, pos: Position) -> bool {
        self.tile_at(pos).is_block()
    }

    /// Set a tile directly. Used while building levels.
    pub(crate) fn set_tile(&mut self, pos: Position, tile: Tile) {
        let i = self
            .index(pos)
            .unwrap_or_else(|| panic!("Position {} is outside the {}x{} grid", pos, self.cols, self.rows));
        self.cells[i] = tile;
    }

    /// Revert an occupied cell to its underlying terrain.
    ///
    /// Returns the kind of entity that was removed.
    ///
    /// Panics if the cell holds no entity: the grid and the entity registry
    /// have gone out of sync.
    pub(crate) fn clear_entity_from(&mut self, pos: Position) -> EntityKind {
        let tile = self.tile_at(pos);
        match (tile.occupant(), tile.vacated()) {
            (Some(kind), Some(terrain)) => {
                self.set_tile(pos, terrain);
                kind
            }
            _ => panic!("Invariant violation: no entity to clear at {} (found {:?})", pos, tile),
        }
    }

    /// Put an entity of `kind` on the free terrain at `pos`.
    ///
    /// Panics unless the cell is free `Ground` or `Target`.
    pub(crate) fn place_entity(&mut self, kind: EntityKind, pos: Position) {
        let tile = self.tile_at(pos);
        match tile.occupied_by(kind) {
            Some(occupied) => self.set_tile(pos, occupied),
            None => panic!("Invariant violation: cannot place {:?} at {} (found {:?})", kind, pos, tile),
        }
    }

    /// Number of `BlockOnTarget` cells.
    #[must_use]
    pub fn count_blocks_on_target(&self) -> usize {
        self.count(|t| t == Tile::BlockOnTarget)
    }

    /// Number of target cells, occupied or not.
    #[must_use]
    pub fn count_targets(&self) -> usize {
        self.count(Tile::is_target)
    }

    /// Number of cells matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.cells.iter().filter(|&&t| pred(t)).count()
    }

    /// Iterate over `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &t)| (Position::new((i % cols) as i32, (i / cols) as i32), t))
    }

    /// Write the grid in level-text format: one line per row, codes
    /// separated by commas, rows joined by `\n`.
    ///
    /// ```
    /// use sokoban_engine::state::Grid;
    /// use sokoban_engine::core::Tile;
    ///
    /// let grid = Grid::from_cells(2, 1, vec![Tile::Player, Tile::Target]);
    /// assert_eq!(grid.to_level_text(), "3,2");
    /// ```
    #[must_use]
    pub fn to_level_text(&self) -> String {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|t| t.code().to_string()).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.cells.chunks(self.cols.max(1)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
        }
        Ok(())
    }
}
