//! Level text parsing.
//!
//! ## Format
//!
//! One grid row per line, tile codes separated by commas:
//!
//! ```text
//! 0,1,1,1,0
//! 1,3,4,2,1
//! 0,1,1,1,0
//! ```
//!
//! - Lines end with `\n` or `\r\n`; blank lines are skipped.
//! - The first row fixes the column count; every other row must match it.
//! - Whitespace around a code is ignored.
//!
//! The loader is pure: it returns data and never touches an engine.

use tracing::{debug, warn};

use crate::core::{EngineConfig, EngineError, EntityKind, InvalidLevel, ParseError, Position, Tile};
use crate::state::{Board, EntityRegistry, Grid};

/// Result of loading a level: the grid, the initial entity positions, and
/// the number of blocks the win condition waits for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedLevel {
    pub grid: Grid,
    pub registry: EntityRegistry,
    pub block_count: usize,
}

impl LoadedLevel {
    /// Hand the loaded data over to a board.
    #[must_use]
    pub fn into_board(self) -> Board {
        Board::new(self.grid, self.registry)
    }
}

/// Parse level text with the default configuration.
///
/// ```
/// use sokoban_engine::level::load_level;
/// use sokoban_engine::core::{EntityId, Position};
///
/// let level = load_level("1,3,4,2").unwrap();
/// assert_eq!(level.block_count, 1);
/// assert_eq!(level.registry.position(EntityId::PLAYER), Some(Position::new(1, 0)));
/// ```
pub fn load_level(text: &str) -> Result<LoadedLevel, EngineError> {
    load_level_with_config(text, &EngineConfig::default())
}

/// Parse level text.
///
/// Fails with `ParseError` for malformed text and `InvalidLevel` for text
/// that parses but cannot be played under `config`.
pub fn load_level_with_config(text: &str, config: &EngineConfig) -> Result<LoadedLevel, EngineError> {
    let mut cols: Option<usize> = None;
    let mut rows = 0usize;
    let mut cells = Vec::new();
    let mut players = Vec::new();
    let mut blocks = Vec::new();
    let mut targets = 0usize;

    for (line_idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = line_idx + 1;

        let fields: Vec<&str> = line.split(',').collect();
        let expected = *cols.get_or_insert(fields.len());
        if fields.len() != expected {
            return Err(ParseError::RaggedRow {
                line: line_no,
                expected,
                found: fields.len(),
            }
            .into());
        }

        for (x, field) in fields.iter().enumerate() {
            let tile = parse_tile(field, line_no, x + 1)?;
            let pos = Position::new(x as i32, rows as i32);
            match tile.occupant() {
                Some(EntityKind::Player) => players.push(pos),
                Some(EntityKind::Block) => blocks.push(pos),
                None => {}
            }
            if tile.is_target() {
                targets += 1;
            }
            cells.push(tile);
        }
        rows += 1;
    }

    let cols = match cols {
        Some(cols) => cols,
        None => return Err(InvalidLevel::Empty.into()),
    };

    let player = match players.as_slice() {
        [] => return Err(InvalidLevel::NoPlayer.into()),
        [player] => *player,
        _ => {
            return Err(InvalidLevel::MultiplePlayers { count: players.len() }.into());
        }
    };

    if blocks.is_empty() && !config.allow_blockless {
        return Err(InvalidLevel::NoBlocks.into());
    }

    if targets < blocks.len() {
        if config.require_enough_targets {
            return Err(InvalidLevel::NotEnoughTargets {
                blocks: blocks.len(),
                targets,
            }
            .into());
        }
        warn!(blocks = blocks.len(), targets, "level has fewer targets than blocks and cannot be solved");
    }

    let block_count = blocks.len();
    let grid = Grid::from_cells(cols, rows, cells);
    let registry = EntityRegistry::new(player, blocks);

    debug!(cols, rows, blocks = block_count, targets, "level loaded");

    Ok(LoadedLevel {
        grid,
        registry,
        block_count,
    })
}

fn parse_tile(field: &str, line: usize, column: usize) -> Result<Tile, ParseError> {
    let token = field.trim();
    let code: i64 = token.parse().map_err(|_| ParseError::NotAnInteger {
        line,
        column,
        token: token.to_string(),
    })?;
    u8::try_from(code)
        .ok()
        .and_then(Tile::from_code)
        .ok_or(ParseError::CodeOutOfRange { line, column, code })
}
