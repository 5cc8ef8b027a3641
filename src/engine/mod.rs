//! The puzzle engine facade.
//!
//! `Engine` is what a presentation layer talks to:
//! - `load_level` once, with the level text
//! - `try_move` per input event
//! - `entity_position` / `entities` / `is_solved` when redrawing
//!
//! ## Example
//!
//! ```
//! use sokoban_engine::{Direction, Engine, EntityId, MoveOutcome, Position};
//!
//! let mut engine = Engine::load_level("1,1,1,1\n1,3,4,2\n1,1,1,1").unwrap();
//!
//! assert_eq!(engine.try_move(Direction::Up), MoveOutcome::Moved);
//! assert_eq!(engine.try_move(Direction::Down), MoveOutcome::Moved);
//! assert_eq!(engine.try_move(Direction::Right), MoveOutcome::MovedAndSolved);
//!
//! assert!(engine.is_solved());
//! assert_eq!(engine.entity_position(EntityId::block(0)), Some(Position::new(3, 1)));
//! ```

pub mod snapshot;

use crate::core::{Direction, EngineConfig, EngineError, EntityId, Position};
use crate::level::load_level_with_config;
use crate::rules::{EntityMove, MoveOutcome, MoveResolver, MoveStats, Phase};
use crate::state::{Board, Grid};

/// A single puzzle session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
    resolver: MoveResolver,
}

impl Engine {
    /// Load a level with the default configuration.
    pub fn load_level(text: &str) -> Result<Self, EngineError> {
        Self::load_level_with_config(text, EngineConfig::default())
    }

    /// Load a level.
    ///
    /// No engine is built when the text fails to parse or validate.
    pub fn load_level_with_config(text: &str, config: EngineConfig) -> Result<Self, EngineError> {
        let level = load_level_with_config(text, &config)?;
        Ok(Self {
            config,
            resolver: MoveResolver::new(level.into_board()),
        })
    }

    /// Build an engine around an existing board.
    ///
    /// The board is validated first since it did not come from the loader.
    pub fn from_board(board: Board, config: EngineConfig) -> Result<Self, EngineError> {
        board.check_invariants()?;
        Ok(Self {
            config,
            resolver: MoveResolver::new(board),
        })
    }

    /// Attempt to move the player one cell along `direction`.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        self.resolver.try_move(direction)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.resolver.board()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.resolver.board().grid()
    }

    /// Current position of an entity, or `None` for an unknown ID.
    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Position> {
        self.board().entity_position(id)
    }

    #[must_use]
    pub fn player_position(&self) -> Position {
        self.board().player_position()
    }

    /// Every entity and its position, player first.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, Position)> + '_ {
        self.board().registry().iter()
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.board().block_count()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.resolver.is_solved()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.resolver.phase()
    }

    #[must_use]
    pub fn stats(&self) -> MoveStats {
        self.resolver.stats()
    }

    /// Entity moves performed by the most recent `try_move`.
    #[must_use]
    pub fn last_moves(&self) -> &[EntityMove] {
        self.resolver.last_moves()
    }

    /// Verify the board and the phase agree with each other.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let board = self.board();
        board.check_invariants()?;

        let expected = if board.all_blocks_on_target() {
            Phase::Solved
        } else {
            Phase::Playing
        };
        if self.phase() != expected {
            return Err(EngineError::InvariantViolation(format!(
                "phase is {:?} but {} of {} blocks rest on targets",
                self.phase(),
                board.count_blocks_on_target(),
                board.block_count()
            )));
        }
        Ok(())
    }
}
