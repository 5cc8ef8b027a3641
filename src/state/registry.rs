//! Entity registry: where each mobile entity currently stands.
//!
//! The registry is a bidirectional index:
//! - `EntityId -> Position`, dense, indexed by the raw entity ID
//! - `Position -> EntityId`, for reverse lookups without scanning
//!
//! Both directions are updated together by `set_position`. The registry
//! never touches the grid; keeping the two in step is the board's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Position};

/// Bidirectional entity/position index.
///
/// ## Usage
///
/// ```
/// use sokoban_engine::state::EntityRegistry;
/// use sokoban_engine::core::{EntityId, Position};
///
/// let registry = EntityRegistry::new(Position::new(1, 1), [Position::new(2, 1)]);
///
/// assert_eq!(registry.position(EntityId::PLAYER), Some(Position::new(1, 1)));
/// assert_eq!(registry.entity_at(Position::new(2, 1)), Some(EntityId::block(0)));
/// assert_eq!(registry.block_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Position>", into = "Vec<Position>")]
pub struct EntityRegistry {
    /// Positions indexed by raw entity ID (player first).
    positions: Vec<Position>,

    /// Reverse index: position -> entity.
    occupants: FxHashMap<Position, EntityId>,
}

impl EntityRegistry {
    /// Create a registry holding the player and the given blocks.
    ///
    /// Blocks receive IDs in iteration order starting at `EntityId::block(0)`.
    ///
    /// Panics if two entities share a position.
    #[must_use]
    pub fn new(player: Position, blocks: impl IntoIterator<Item = Position>) -> Self {
        let positions: Vec<Position> = std::iter::once(player).chain(blocks).collect();
        let registry = Self::from(positions);
        assert_eq!(
            registry.occupants.len(),
            registry.positions.len(),
            "Two entities registered at the same position"
        );
        registry
    }

    /// Number of registered entities (player included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for registries built with `new`; a restored registry
    /// may be empty and is then rejected by the invariant check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of registered blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// Current position of an entity.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<Position> {
        self.positions.get(id.raw() as usize).copied()
    }

    /// The player's current position.
    ///
    /// Panics on an empty registry.
    #[must_use]
    pub fn player_position(&self) -> Position {
        self.positions[0]
    }

    /// The entity standing at `pos`, if any.
    #[must_use]
    pub fn entity_at(&self, pos: Position) -> Option<EntityId> {
        self.occupants.get(&pos).copied()
    }

    /// Check if an entity is registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        (id.raw() as usize) < self.positions.len()
    }

    /// Move an entity to `pos`, updating both directions of the index.
    ///
    /// Returns the previous position.
    ///
    /// Panics if the entity is unknown or `pos` is held by another entity.
    pub(crate) fn set_position(&mut self, id: EntityId, pos: Position) -> Position {
        let slot = self
            .positions
            .get_mut(id.raw() as usize)
            .unwrap_or_else(|| panic!("Entity {} is not registered", id));
        let old = std::mem::replace(slot, pos);

        if self.occupants.get(&old) == Some(&id) {
            self.occupants.remove(&old);
        }
        if let Some(other) = self.occupants.insert(pos, id) {
            if other != id {
                panic!("Invariant violation: {} moved onto {} held by {}", id, pos, other);
            }
        }
        old
    }

    /// Iterate over `(id, position)` pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &p)| (EntityId(i as u32), p))
    }

    /// Iterate over block IDs.
    pub fn block_ids(&self) -> impl Iterator<Item = EntityId> {
        (0..self.block_count() as u32).map(EntityId::block)
    }

    /// True when the reverse index mirrors the forward one exactly.
    #[must_use]
    pub(crate) fn is_consistent(&self) -> bool {
        self.occupants.len() == self.positions.len()
            && self.iter().all(|(id, pos)| self.occupants.get(&pos) == Some(&id))
    }
}

impl From<Vec<Position>> for EntityRegistry {
    /// Rebuild the reverse index from dense positions.
    ///
    /// Duplicate positions leave the reverse index short; see `is_consistent`.
    fn from(positions: Vec<Position>) -> Self {
        let occupants = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, EntityId(i as u32)))
            .collect();
        Self { positions, occupants }
    }
}

impl From<EntityRegistry> for Vec<Position> {
    fn from(registry: EntityRegistry) -> Self {
        registry.positions
    }
}
