//! Core engine types: tiles, positions, entities, configuration, errors.
//!
//! These are the plain value types every other module builds on. None of
//! them hold game state.

pub mod tile;
pub mod position;
pub mod entity;
pub mod config;
pub mod error;

pub use tile::Tile;
pub use position::{Direction, Position};
pub use entity::{EntityId, EntityKind};
pub use config::EngineConfig;
pub use error::{EngineError, InvalidLevel, ParseError};
