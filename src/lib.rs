//! # sokoban-engine
//!
//! A grid puzzle engine for Sokoban-style box-pushing levels.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: No rendering, input, or audio. A host feeds
//!    level text and directions in, and reads entity positions back out.
//!
//! 2. **One Owner**: The grid and the entity registry live in a single
//!    `Board` owned by the `MoveResolver`. Nothing else can mutate them.
//!
//! 3. **Terrain Memory**: Tiles encode both terrain and occupant, so a
//!    target stays a target while a player or block stands on it.
//!
//! ## Flow
//!
//! ```text
//! level text ──load──▶ Grid + EntityRegistry ──▶ Board ──▶ MoveResolver
//!                                                             ▲    │
//!                                         Direction ──try_move┘    ▼
//!                                                          MoveOutcome
//! ```
//!
//! ## Modules
//!
//! - `core`: Tiles, positions, directions, entity IDs, configuration, errors
//! - `state`: Grid, entity registry, board
//! - `level`: Level text loader
//! - `rules`: Move resolver, outcomes, phase
//! - `engine`: Session facade and snapshots
//! - `generator`: Seeded generation of solvable levels

pub mod core;
pub mod state;
pub mod level;
pub mod rules;
pub mod engine;
pub mod generator;

// Re-export commonly used types
pub use crate::core::{
    Direction, EngineConfig, EngineError, EntityId, EntityKind, InvalidLevel, ParseError, Position, Tile,
};

pub use crate::state::{Board, EntityRegistry, Grid};

pub use crate::level::{load_level, load_level_with_config, LoadedLevel};

pub use crate::rules::{EntityMove, MoveOutcome, MoveRecord, MoveResolver, MoveStats, Phase};

pub use crate::engine::Engine;

pub use crate::generator::{LevelGenerator, LevelRng};
