//! Move results: the outcome of a move request, the entity moves it
//! performed, running statistics, and the puzzle phase.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, Position};

/// Result of one `try_move` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed: wall, edge, immovable block, or puzzle already solved.
    Blocked,
    /// The player moved (possibly pushing a block); the puzzle is not solved.
    Moved,
    /// The player moved and every block now rests on a target.
    MovedAndSolved,
}

impl MoveOutcome {
    /// True unless the move was blocked.
    #[must_use]
    pub fn moved(self) -> bool {
        !matches!(self, MoveOutcome::Blocked)
    }

    #[must_use]
    pub fn is_blocked(self) -> bool {
        matches!(self, MoveOutcome::Blocked)
    }

    #[must_use]
    pub fn solved(self) -> bool {
        matches!(self, MoveOutcome::MovedAndSolved)
    }
}

/// One entity relocated by an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityMove {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
}

impl EntityMove {
    #[must_use]
    pub fn new(entity: EntityId, from: Position, to: Position) -> Self {
        Self { entity, from, to }
    }
}

/// Entity moves of a single step: the pushed block (if any), then the player.
pub type MoveRecord = SmallVec<[EntityMove; 2]>;

/// Running counts of accepted moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    /// Accepted moves, pushes included.
    pub moves: u32,
    /// Accepted moves that pushed a block.
    pub pushes: u32,
}

/// Puzzle phase.
///
/// `Playing` loops on itself until a move solves the puzzle; `Solved` is
/// terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    Solved,
}
