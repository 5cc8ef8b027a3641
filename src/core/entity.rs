//! Entity identification.
//!
//! Every mobile object on the grid (the player or a block) has a unique
//! `EntityId`.
//!
//! ## ID Layout
//!
//! - `0`: the player
//! - `1..=block_count`: blocks, numbered in row-major order of the level text
//!
//! ```
//! use sokoban_engine::core::{EntityId, EntityKind};
//!
//! let player = EntityId::PLAYER;
//! let first_block = EntityId::block(0);
//!
//! assert!(player.is_player());
//! assert_eq!(first_block.kind(), EntityKind::Block);
//! assert_eq!(first_block.block_index(), Some(0));
//! ```

use serde::{Deserialize, Serialize};

/// What kind of mobile object an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Block,
}

/// Unique identifier for a mobile entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The single player entity.
    pub const PLAYER: EntityId = EntityId(0);

    /// Entity ID of the block with the given 0-based index.
    #[must_use]
    pub const fn block(index: u32) -> Self {
        Self(index + 1)
    }

    /// Check if this entity ID refers to the player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == 0
    }

    /// The kind of entity this ID refers to.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        if self.is_player() {
            EntityKind::Player
        } else {
            EntityKind::Block
        }
    }

    /// Convert to a 0-based block index if this is a block entity.
    #[must_use]
    pub const fn block_index(self) -> Option<u32> {
        if self.is_player() {
            None
        } else {
            Some(self.0 - 1)
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.block_index() {
            None => write!(f, "Player"),
            Some(i) => write!(f, "Block({})", i),
        }
    }
}
