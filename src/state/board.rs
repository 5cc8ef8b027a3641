//! Board: the grid and the entity registry kept in step.
//!
//! `Board` is the grid state the move rules operate on. Read access is
//! public so hosts can inspect the level; every mutation is crate-internal
//! and goes through the move resolver.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::registry::EntityRegistry;
use crate::core::{EngineError, EntityId, EntityKind, Position, Tile};

/// Tile grid plus entity positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    registry: EntityRegistry,
    block_count: usize,
}

impl Board {
    /// Combine a grid and a registry.
    ///
    /// The block count is taken from the registry. Call `check_invariants`
    /// if the two did not come from the level loader.
    #[must_use]
    pub fn new(grid: Grid, registry: EntityRegistry) -> Self {
        let block_count = registry.block_count();
        Self {
            grid,
            registry,
            block_count,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Number of blocks, fixed at load time.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    // === Grid queries ===

    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.grid.tile_at(pos)
    }

    #[must_use]
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.is_in_bounds(pos)
    }

    #[must_use]
    pub fn is_playable_at(&self, pos: Position) -> bool {
        self.grid.is_playable_at(pos)
    }

    #[must_use]
    pub fn is_occupied_by_block(&self, pos: Position) -> bool {
        self.grid.is_occupied_by_block(pos)
    }

    #[must_use]
    pub fn count_blocks_on_target(&self) -> usize {
        self.grid.count_blocks_on_target()
    }

    /// Every block rests on a target.
    #[must_use]
    pub fn all_blocks_on_target(&self) -> bool {
        self.count_blocks_on_target() == self.block_count
    }

    // === Registry queries ===

    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Position> {
        self.registry.position(id)
    }

    #[must_use]
    pub fn player_position(&self) -> Position {
        self.registry.player_position()
    }

    #[must_use]
    pub fn entity_at(&self, pos: Position) -> Option<EntityId> {
        self.registry.entity_at(pos)
    }

    // === Mutation (move resolver only) ===

    /// Update the registry only; the grid is left untouched.
    pub(crate) fn set_entity_position(&mut self, id: EntityId, pos: Position) -> Position {
        self.registry.set_position(id, pos)
    }

    pub(crate) fn clear_entity_from(&mut self, pos: Position) -> EntityKind {
        self.grid.clear_entity_from(pos)
    }

    pub(crate) fn place_entity(&mut self, kind: EntityKind, pos: Position) {
        self.grid.place_entity(kind, pos);
    }

    /// Move one entity to `to`: clear its old cell, place it on the new
    /// one, then update the registry. Returns the old position.
    ///
    /// The destination must be free playable terrain.
    pub(crate) fn move_entity(&mut self, id: EntityId, to: Position) -> Position {
        let from = self
            .entity_position(id)
            .unwrap_or_else(|| panic!("Entity {} is not registered", id));
        let cleared = self.clear_entity_from(from);
        debug_assert_eq!(cleared, id.kind(), "{} found a {:?} tile at {}", id, cleared, from);
        self.place_entity(id.kind(), to);
        self.set_entity_position(id, to);
        from
    }

    // === Validation ===

    /// Verify that the grid and the registry describe the same board.
    ///
    /// Checks, in order:
    /// - the grid's cell count matches its dimensions
    /// - the registry holds the player plus `block_count` blocks
    /// - the reverse index mirrors the forward index
    /// - each entity stands in bounds on a tile of its own kind
    /// - no occupied tile exists without a registered entity
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let violation = |msg: String| Err(EngineError::InvariantViolation(msg));

        if !self.grid.is_well_formed() {
            return violation(format!(
                "grid of {}x{} has {} cells",
                self.grid.cols(),
                self.grid.rows(),
                self.grid.cells().len()
            ));
        }
        if self.block_count.checked_add(1) != Some(self.registry.len()) {
            return violation(format!(
                "registry holds {} entities for {} blocks",
                self.registry.len(),
                self.block_count
            ));
        }
        if !self.registry.is_consistent() {
            return violation("registry reverse index is out of sync".to_string());
        }
        for (id, pos) in self.registry.iter() {
            if !self.grid.is_in_bounds(pos) {
                return violation(format!("{} is out of bounds at {}", id, pos));
            }
            let tile = self.grid.tile_at(pos);
            if tile.occupant() != Some(id.kind()) {
                return violation(format!("{} at {} stands on {:?}", id, pos, tile));
            }
        }
        let occupied = self.grid.count(|t| t.occupant().is_some());
        if occupied != self.registry.len() {
            return violation(format!(
                "grid has {} occupied cells, registry has {} entities",
                occupied,
                self.registry.len()
            ));
        }
        Ok(())
    }
}
