//! Seeded level generation by reverse play.
//!
//! The generator starts from a solved room (every block on its own target)
//! and walks the player around backwards: each step either walks or pulls
//! the block behind the player along. A pull is exactly a push played in
//! reverse, so the starting solution is always reachable again and every
//! generated level is solvable.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::rng::LevelRng;
use crate::core::{Direction, EngineConfig, EngineError, EntityId, Position, Tile};
use crate::engine::Engine;
use crate::state::{Board, EntityRegistry, Grid};

/// Fresh placements tried before a seed is given up on.
const MAX_PLACEMENTS: usize = 32;

/// Level generator settings.
///
/// ```
/// use sokoban_engine::generator::LevelGenerator;
/// use sokoban_engine::Engine;
///
/// let text = LevelGenerator::new().with_size(8, 6).with_blocks(2).generate(42).unwrap();
/// let engine = Engine::load_level(&text).unwrap();
/// assert_eq!(engine.block_count(), 2);
/// assert!(!engine.is_solved());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelGenerator {
    /// Grid width, border included.
    pub cols: usize,
    /// Grid height, border included.
    pub rows: usize,
    /// Number of blocks (and targets).
    pub blocks: usize,
    /// Reverse steps to play before the level is handed out.
    pub scramble_steps: usize,
    /// Chance that a step pulls the block behind the player.
    pub pull_probability: f64,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self {
            cols: 7,
            rows: 7,
            blocks: 2,
            scramble_steps: 60,
            pull_probability: 0.75,
        }
    }
}

impl LevelGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: usize) -> Self {
        self.blocks = blocks;
        self
    }

    #[must_use]
    pub fn with_scramble_steps(mut self, steps: usize) -> Self {
        self.scramble_steps = steps;
        self
    }

    #[must_use]
    pub fn with_pull_probability(mut self, probability: f64) -> Self {
        self.pull_probability = probability;
        self
    }

    /// Generate level text for `seed`.
    pub fn generate(&self, seed: u64) -> Result<String, EngineError> {
        Ok(self.generate_board(seed)?.grid().to_level_text())
    }

    /// Generate a level for `seed` and load it straight into an engine.
    pub fn generate_engine(&self, seed: u64, config: EngineConfig) -> Result<Engine, EngineError> {
        Engine::from_board(self.generate_board(seed)?, config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let fail = |msg: String| Err(EngineError::Generation(msg));

        if self.cols < 3 || self.rows < 3 {
            return fail(format!("grid must be at least 3x3, got {}x{}", self.cols, self.rows));
        }
        if self.blocks == 0 {
            return fail("at least one block is required".to_string());
        }
        let interior = (self.cols - 2) * (self.rows - 2);
        if interior < self.blocks + 2 {
            return fail(format!(
                "{} interior cells cannot hold {} blocks, the player and a free cell",
                interior, self.blocks
            ));
        }
        if self.cols < 5 && self.rows < 5 {
            return fail(format!(
                "a {}x{} grid has no interior line of three cells to pull a block along",
                self.cols, self.rows
            ));
        }
        if !(0.0..=1.0).contains(&self.pull_probability) {
            return fail(format!("pull probability {} is outside 0..=1", self.pull_probability));
        }
        Ok(())
    }

    fn generate_board(&self, seed: u64) -> Result<Board, EngineError> {
        self.validate()?;
        let mut rng = LevelRng::new(seed);

        let mut interior: Vec<Position> = (1..self.rows - 1)
            .flat_map(|y| (1..self.cols - 1).map(move |x| Position::new(x as i32, y as i32)))
            .collect();

        // A placement can leave every block unpullable (e.g. wedged in the
        // middle of a narrow room); start over from a fresh shuffle.
        for placement in 1..=MAX_PLACEMENTS {
            let mut board = self.place(&mut rng, &mut interior);
            let steps = self.scramble(&mut board, &mut rng);

            if !board.all_blocks_on_target() {
                debug!(
                    seed,
                    cols = self.cols,
                    rows = self.rows,
                    blocks = self.blocks,
                    steps,
                    placement,
                    "level generated"
                );
                return Ok(board);
            }
            trace!(seed, placement, "placement left every block on a target, reshuffling");
        }

        Err(EngineError::Generation(format!(
            "seed {} left every block on a target after {} placements",
            seed, MAX_PLACEMENTS
        )))
    }

    /// Solved room: empty border, ground interior, each block on its own
    /// target and the player on another interior cell.
    fn place(&self, rng: &mut LevelRng, interior: &mut [Position]) -> Board {
        let mut grid = Grid::filled(self.cols, self.rows, Tile::Empty);
        for &pos in interior.iter() {
            grid.set_tile(pos, Tile::Ground);
        }

        rng.shuffle(interior);
        let blocks = &interior[..self.blocks];
        let player = interior[self.blocks];
        for &pos in blocks {
            grid.set_tile(pos, Tile::BlockOnTarget);
        }
        grid.set_tile(player, Tile::Player);

        Board::new(grid, EntityRegistry::new(player, blocks.iter().copied()))
    }

    /// Play reverse steps until `scramble_steps` succeeded and the room is no
    /// longer solved, or the attempt budget runs out. Returns the steps played.
    fn scramble(&self, board: &mut Board, rng: &mut LevelRng) -> usize {
        let max_attempts = self.scramble_steps.max(1) * 8;
        let mut steps = 0;
        let mut attempts = 0;
        while attempts < max_attempts && (steps < self.scramble_steps || board.all_blocks_on_target()) {
            attempts += 1;
            if reverse_step(board, rng, self.pull_probability) {
                steps += 1;
            }
        }
        steps
    }
}

/// Play one step backwards: the player walks one cell and may drag the
/// block directly behind it. Returns false when the step was not possible.
fn reverse_step(board: &mut Board, rng: &mut LevelRng, pull_probability: f64) -> bool {
    let Some(&direction) = rng.choose(&Direction::ALL) else {
        return false;
    };
    let player = board.player_position();
    let ahead = player.step(direction);

    if !board.is_playable_at(ahead) || board.is_occupied_by_block(ahead) {
        return false;
    }

    let behind = player.step(direction.opposite());
    let pulled = match board.entity_at(behind) {
        Some(id) if !id.is_player() && rng.gen_bool(pull_probability) => Some(id),
        _ => None,
    };

    board.move_entity(EntityId::PLAYER, ahead);
    if let Some(block) = pulled {
        board.move_entity(block, player);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_level() {
        let generator = LevelGenerator::new();
        assert_eq!(generator.generate(11).unwrap(), generator.generate(11).unwrap());
    }

    #[test]
    fn test_border_is_empty() {
        let board = LevelGenerator::new().with_size(6, 5).generate_board(3).unwrap();
        let grid = board.grid();
        for (pos, tile) in grid.iter() {
            let on_border = pos.x == 0 || pos.y == 0 || pos.x == 5 || pos.y == 4;
            assert_eq!(on_border, tile == Tile::Empty, "at {}", pos);
        }
    }

    #[test]
    fn test_generated_board_is_consistent() {
        for seed in 0..20 {
            let board = LevelGenerator::new().with_blocks(3).generate_board(seed).unwrap();
            assert!(board.check_invariants().is_ok());
            assert_eq!(board.grid().count_targets(), 3);
            assert!(!board.all_blocks_on_target());
        }
    }

    #[test]
    fn test_rejects_bad_settings() {
        let too_small = LevelGenerator::new().with_size(2, 5);
        assert!(matches!(too_small.generate(0), Err(EngineError::Generation(_))));

        let no_blocks = LevelGenerator::new().with_blocks(0);
        assert!(matches!(no_blocks.generate(0), Err(EngineError::Generation(_))));

        let crowded = LevelGenerator::new().with_size(4, 4).with_blocks(3);
        assert!(matches!(crowded.generate(0), Err(EngineError::Generation(_))));

        let no_pull_room = LevelGenerator::new().with_size(4, 4).with_blocks(1);
        assert!(matches!(no_pull_room.generate(0), Err(EngineError::Generation(_))));

        let crowded = LevelGenerator::new().with_size(4, 7).with_blocks(9);
        assert!(matches!(crowded.generate(0), Err(EngineError::Generation(_))));

        let bad_probability = LevelGenerator::new().with_pull_probability(1.5);
        assert!(matches!(bad_probability.generate(0), Err(EngineError::Generation(_))));
    }

    #[test]
    fn test_never_pulling_cannot_scramble() {
        let generator = LevelGenerator::new().with_pull_probability(0.0);
        assert!(matches!(generator.generate(1), Err(EngineError::Generation(_))));
    }

    #[test]
    fn test_small_room_reshuffles_unpullable_placements() {
        // A 3x3 interior strands a block placed in its centre.
        let generator = LevelGenerator::new().with_size(5, 5).with_blocks(1).with_scramble_steps(20);
        for seed in 0..200 {
            let board = generator.generate_board(seed).unwrap();
            assert!(!board.all_blocks_on_target(), "seed {}", seed);
            assert!(board.check_invariants().is_ok());
        }
    }
}
