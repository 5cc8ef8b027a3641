//! Move rules.
//!
//! `MoveResolver` owns the board and is the only thing that mutates it.
//! Each request yields a `MoveOutcome`; positions are read back from the
//! board (or from the per-move `EntityMove` records) afterwards.

pub mod outcome;
pub mod resolver;

pub use outcome::{EntityMove, MoveOutcome, MoveRecord, MoveStats, Phase};
pub use resolver::MoveResolver;
