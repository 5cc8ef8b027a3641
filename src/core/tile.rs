//! Tile codes for grid cells.
//!
//! A tile encodes both the terrain of a cell (ground or target) and the
//! mobile entity standing on it, if any. The `*OnTarget` variants keep the
//! target terrain alive while a player or block occupies the cell.
//!
//! ## Codes
//!
//! | Code | Tile             |
//! |------|------------------|
//! | 0    | `Empty`          |
//! | 1    | `Ground`         |
//! | 2    | `Target`         |
//! | 3    | `Player`         |
//! | 4    | `Block`          |
//! | 5    | `PlayerOnTarget` |
//! | 6    | `BlockOnTarget`  |

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;

/// The content of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Non-playable space. Nothing ever moves here.
    Empty = 0,
    /// Plain floor.
    Ground = 1,
    /// Floor a block must end on.
    Target = 2,
    /// The player on plain floor.
    Player = 3,
    /// A block on plain floor.
    Block = 4,
    /// The player standing on a target.
    PlayerOnTarget = 5,
    /// A block resting on a target.
    BlockOnTarget = 6,
}

impl Tile {
    /// Highest valid tile code.
    pub const MAX_CODE: u8 = 6;

    /// Decode a tile from its level-text code.
    ///
    /// Returns `None` for codes outside `0..=6`.
    ///
    /// ```
    /// use sokoban_engine::core::Tile;
    ///
    /// assert_eq!(Tile::from_code(2), Some(Tile::Target));
    /// assert_eq!(Tile::from_code(7), None);
    /// ```
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Tile> {
        match code {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Ground),
            2 => Some(Tile::Target),
            3 => Some(Tile::Player),
            4 => Some(Tile::Block),
            5 => Some(Tile::PlayerOnTarget),
            6 => Some(Tile::BlockOnTarget),
            _ => None,
        }
    }

    /// The level-text code of this tile.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// True for any tile other than `Empty`.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        !matches!(self, Tile::Empty)
    }

    /// True for `Block` and `BlockOnTarget`.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Tile::Block | Tile::BlockOnTarget)
    }

    /// True for `Player` and `PlayerOnTarget`.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Tile::Player | Tile::PlayerOnTarget)
    }

    /// True when the underlying terrain is a target, occupied or not.
    #[must_use]
    pub const fn is_target(self) -> bool {
        matches!(self, Tile::Target | Tile::PlayerOnTarget | Tile::BlockOnTarget)
    }

    /// The entity standing on this tile, if any.
    #[must_use]
    pub const fn occupant(self) -> Option<EntityKind> {
        match self {
            Tile::Player | Tile::PlayerOnTarget => Some(EntityKind::Player),
            Tile::Block | Tile::BlockOnTarget => Some(EntityKind::Block),
            Tile::Empty | Tile::Ground | Tile::Target => None,
        }
    }

    /// The terrain left behind once the occupant leaves.
    ///
    /// Returns `None` for tiles without an occupant.
    #[must_use]
    pub const fn vacated(self) -> Option<Tile> {
        match self {
            Tile::Player | Tile::Block => Some(Tile::Ground),
            Tile::PlayerOnTarget | Tile::BlockOnTarget => Some(Tile::Target),
            Tile::Empty | Tile::Ground | Tile::Target => None,
        }
    }

    /// The tile produced by placing `kind` on this terrain.
    ///
    /// Returns `None` unless this tile is free `Ground` or `Target`.
    #[must_use]
    pub const fn occupied_by(self, kind: EntityKind) -> Option<Tile> {
        match (self, kind) {
            (Tile::Ground, EntityKind::Player) => Some(Tile::Player),
            (Tile::Ground, EntityKind::Block) => Some(Tile::Block),
            (Tile::Target, EntityKind::Player) => Some(Tile::PlayerOnTarget),
            (Tile::Target, EntityKind::Block) => Some(Tile::BlockOnTarget),
            _ => None,
        }
    }

    /// Single-character glyph in the usual Sokoban notation.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Tile::Empty => '#',
            Tile::Ground => '_',
            Tile::Target => '.',
            Tile::Player => '@',
            Tile::Block => '$',
            Tile::PlayerOnTarget => '+',
            Tile::BlockOnTarget => '*',
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
