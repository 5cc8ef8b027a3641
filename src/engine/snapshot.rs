//! Engine checkpoints.
//!
//! A snapshot captures the whole session (configuration, board, phase,
//! statistics) as `bincode` bytes. Restoring re-validates everything, so
//! bytes from an older format or a corrupted store never yield an engine
//! whose grid and registry disagree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Engine;
use crate::core::{EngineConfig, EngineError};
use crate::rules::MoveResolver;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    config: EngineConfig,
    resolver: MoveResolver,
}

impl Engine {
    /// Serialize the current session.
    pub fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            config: self.config.clone(),
            resolver: self.resolver.clone(),
        };
        bincode::serialize(&snapshot).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Rebuild a session from `snapshot` bytes.
    ///
    /// ```
    /// use sokoban_engine::{Direction, Engine};
    ///
    /// let mut engine = Engine::load_level("3,1,4,2").unwrap();
    /// engine.try_move(Direction::Right);
    ///
    /// let restored = Engine::restore(&engine.snapshot().unwrap()).unwrap();
    /// assert_eq!(restored, engine);
    /// ```
    pub fn restore(bytes: &[u8]) -> Result<Self, EngineError> {
        let snapshot: Snapshot =
            bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EngineError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let engine = Self {
            config: snapshot.config,
            resolver: snapshot.resolver,
        };
        engine.check_invariants()?;

        debug!(bytes = bytes.len(), moves = engine.stats().moves, "engine restored");
        Ok(engine)
    }
}
