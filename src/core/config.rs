//! Engine configuration.
//!
//! Hosts pass an `EngineConfig` when loading a level to decide how strictly
//! the loader treats degenerate levels. The defaults reject nothing a normal
//! Sokoban level would contain.

use serde::{Deserialize, Serialize};

/// Level acceptance rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Accept levels without blocks.
    ///
    /// Such a level has nothing left to do, so it loads already solved.
    /// When false, the loader fails with `InvalidLevel::NoBlocks`.
    pub allow_blockless: bool,

    /// Reject levels with fewer targets than blocks.
    ///
    /// When false, such levels load (with a warning) and can never be solved.
    pub require_enough_targets: bool,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept block-less levels as immediately solved.
    #[must_use]
    pub fn allow_blockless(mut self) -> Self {
        self.allow_blockless = true;
        self
    }

    /// Reject levels that cannot be solved for lack of targets.
    #[must_use]
    pub fn require_enough_targets(mut self) -> Self {
        self.require_enough_targets = true;
        self
    }
}
