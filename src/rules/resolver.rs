//! Sokoban move rules.
//!
//! One step per request:
//! 1. The player's destination must be playable, or the move is blocked.
//! 2. If a block stands there, the cell beyond it must be playable and free
//!    of blocks; the block moves first, then the player.
//! 3. Otherwise only the player moves.
//! 4. After any move, the puzzle is solved once every block rests on a
//!    target. A solved puzzle blocks all further moves.
//!
//! Planning reads the board without mutating it, so a rejected move never
//! leaves a partial change behind.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::outcome::{EntityMove, MoveOutcome, MoveRecord, MoveStats, Phase};
use crate::core::{Direction, EntityId, Position};
use crate::state::Board;

/// A move that passed every rule check and is ready to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlannedMove {
    player_to: Position,
    push: Option<(EntityId, Position)>,
}

/// Owns the board and applies move requests to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResolver {
    board: Board,
    phase: Phase,
    stats: MoveStats,
    last_moves: MoveRecord,
}

impl MoveResolver {
    /// Take ownership of a board.
    ///
    /// A board whose blocks already all rest on targets (including a board
    /// without blocks) starts out solved.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let phase = if board.all_blocks_on_target() {
            Phase::Solved
        } else {
            Phase::Playing
        };
        Self {
            board,
            phase,
            stats: MoveStats::default(),
            last_moves: MoveRecord::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    #[must_use]
    pub fn stats(&self) -> MoveStats {
        self.stats
    }

    /// Entity moves performed by the most recent `try_move`.
    ///
    /// Empty after a blocked move.
    #[must_use]
    pub fn last_moves(&self) -> &[EntityMove] {
        &self.last_moves
    }

    /// Attempt to move the player one cell along `direction`.
    ///
    /// ```
    /// use sokoban_engine::level::load_level;
    /// use sokoban_engine::rules::{MoveOutcome, MoveResolver};
    /// use sokoban_engine::core::Direction;
    ///
    /// let board = load_level("3,4,2").unwrap().into_board();
    /// let mut resolver = MoveResolver::new(board);
    ///
    /// assert_eq!(resolver.try_move(Direction::Left), MoveOutcome::Blocked);
    /// assert_eq!(resolver.try_move(Direction::Right), MoveOutcome::MovedAndSolved);
    /// assert_eq!(resolver.try_move(Direction::Left), MoveOutcome::Blocked);
    /// ```
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        self.last_moves.clear();

        if self.phase == Phase::Solved {
            trace!(%direction, "move ignored, puzzle already solved");
            return MoveOutcome::Blocked;
        }

        let Some(plan) = self.plan(direction) else {
            trace!(%direction, "move blocked");
            return MoveOutcome::Blocked;
        };

        self.apply(plan);

        let outcome = if self.board.all_blocks_on_target() {
            self.phase = Phase::Solved;
            MoveOutcome::MovedAndSolved
        } else {
            MoveOutcome::Moved
        };

        debug!(%direction, pushed = plan.push.is_some(), ?outcome, "move applied");
        if outcome == MoveOutcome::MovedAndSolved {
            info!(moves = self.stats.moves, pushes = self.stats.pushes, "puzzle solved");
        }
        outcome
    }

    /// Check the rules for a move without touching the board.
    fn plan(&self, direction: Direction) -> Option<PlannedMove> {
        let current = self.board.player_position();
        let next = current.step(direction);

        if !self.board.is_playable_at(next) {
            return None;
        }

        if !self.board.is_occupied_by_block(next) {
            return Some(PlannedMove {
                player_to: next,
                push: None,
            });
        }

        let beyond = next.step(direction);
        if !self.board.is_playable_at(beyond) || self.board.is_occupied_by_block(beyond) {
            return None;
        }

        let block = match self.board.entity_at(next) {
            Some(id) if !id.is_player() => id,
            other => panic!("Invariant violation: block tile at {} is registered to {:?}", next, other),
        };

        Some(PlannedMove {
            player_to: next,
            push: Some((block, beyond)),
        })
    }

    /// Apply a planned move. The block vacates its cell before the player
    /// steps onto it, so no cell ever holds two entities.
    fn apply(&mut self, plan: PlannedMove) {
        if let Some((block, to)) = plan.push {
            let from = self.board.move_entity(block, to);
            self.last_moves.push(EntityMove::new(block, from, to));
            self.stats.pushes = self.stats.pushes.saturating_add(1);
        }

        let from = self.board.move_entity(EntityId::PLAYER, plan.player_to);
        self.last_moves.push(EntityMove::new(EntityId::PLAYER, from, plan.player_to));
        self.stats.moves = self.stats.moves.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;
    use crate::level::load_level;

    fn resolver(text: &str) -> MoveResolver {
        MoveResolver::new(load_level(text).unwrap().into_board())
    }

    #[test]
    fn test_walk_onto_ground() {
        let mut r = resolver("3,1,4,2");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(r.board().player_position(), Position::new(1, 0));
        assert_eq!(r.board().tile_at(Position::new(0, 0)), Tile::Ground);
        assert_eq!(r.board().tile_at(Position::new(1, 0)), Tile::Player);
        assert_eq!(r.last_moves().len(), 1);
    }

    #[test]
    fn test_walk_onto_target_and_off_again() {
        // @ . $ .
        let mut r = resolver("3,2,1,4,2");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(r.board().tile_at(Position::new(1, 0)), Tile::PlayerOnTarget);

        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(r.board().tile_at(Position::new(1, 0)), Tile::Target);
        assert_eq!(r.board().tile_at(Position::new(2, 0)), Tile::Player);
    }

    #[test]
    fn test_blocked_by_edge_and_empty() {
        let mut r = resolver("0,3,4,2");
        assert_eq!(r.try_move(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(r.try_move(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(r.try_move(Direction::Down), MoveOutcome::Blocked);
        assert!(r.last_moves().is_empty());
        assert_eq!(r.stats(), MoveStats::default());
    }

    #[test]
    fn test_push_records_block_then_player() {
        let mut r = resolver("3,4,1,2");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);

        let moves = r.last_moves();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0], EntityMove::new(EntityId::block(0), Position::new(1, 0), Position::new(2, 0)));
        assert_eq!(moves[1], EntityMove::new(EntityId::PLAYER, Position::new(0, 0), Position::new(1, 0)));
        assert_eq!(r.stats(), MoveStats { moves: 1, pushes: 1 });
    }

    #[test]
    fn test_push_into_block_is_blocked() {
        let mut r = resolver("3,4,4,2,2");
        let before = r.board().clone();
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(r.board(), &before);
    }

    #[test]
    fn test_push_off_edge_is_blocked() {
        let mut r = resolver("2,3,4");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(r.board().entity_position(EntityId::block(0)), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_solve_is_terminal() {
        let mut r = resolver("3,4,2");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::MovedAndSolved);
        assert!(r.is_solved());

        let after = r.board().clone();
        for dir in Direction::ALL {
            assert_eq!(r.try_move(dir), MoveOutcome::Blocked);
        }
        assert_eq!(r.board(), &after);
        assert_eq!(r.stats().moves, 1);
    }

    #[test]
    fn test_pre_solved_board_starts_solved() {
        let r = resolver("3,6,1");
        assert_eq!(r.phase(), Phase::Solved);
    }

    #[test]
    fn test_push_block_off_target() {
        // @ * _ . $ .
        let mut r = resolver("3,6,1,2,4,2");
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(r.board().tile_at(Position::new(1, 0)), Tile::PlayerOnTarget);
        assert_eq!(r.board().tile_at(Position::new(2, 0)), Tile::Block);
        assert!(r.board().check_invariants().is_ok());
    }

    #[test]
    fn test_stats_saturate() {
        let mut r = resolver("3,4,1,1,2");
        r.stats = MoveStats { moves: u32::MAX, pushes: u32::MAX };
        assert_eq!(r.try_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(r.stats(), MoveStats { moves: u32::MAX, pushes: u32::MAX });
    }
}
