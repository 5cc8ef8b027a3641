//! Error types.
//!
//! - `ParseError`: the level text is malformed
//! - `InvalidLevel`: the level text parses but describes an unplayable level
//! - `EngineError`: everything the public API can return
//!
//! Blocked moves are not errors; they are reported through `MoveOutcome`.

use thiserror::Error;

/// Malformed level text.
///
/// Line numbers are 1-based physical lines of the input (blank lines count).
/// Column numbers are 1-based field indices within the line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}, column {column}: `{token}` is not an integer")]
    NotAnInteger {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}, column {column}: tile code {code} is outside 0..=6")]
    CodeOutOfRange { line: usize, column: usize, code: i64 },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Structurally unplayable level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidLevel {
    #[error("level text contains no rows")]
    Empty,

    #[error("level has no player")]
    NoPlayer,

    #[error("level has {count} players, expected exactly one")]
    MultiplePlayers { count: usize },

    #[error("level has no blocks")]
    NoBlocks,

    #[error("level has {blocks} blocks but only {targets} targets")]
    NotEnoughTargets { blocks: usize, targets: usize },
}

/// Errors returned by the engine's public API.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid level: {0}")]
    InvalidLevel(#[from] InvalidLevel),

    /// Grid and entity registry disagree.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("level generation failed: {0}")]
    Generation(String),
}
