//! Move resolution integration tests.
//!
//! These tests drive the engine the way a presentation layer would: load a
//! level, send directions, and read entity positions back.

use sokoban_engine::{Direction, Engine, EntityId, EntityMove, MoveOutcome, Phase, Position, Tile};

/// Snapshot of every entity position.
fn positions(engine: &Engine) -> Vec<(EntityId, Position)> {
    engine.entities().collect()
}

// =============================================================================
// Walking
// =============================================================================

/// Test that the player walks in all four directions.
#[test]
fn test_walk_all_directions() {
    let mut engine = Engine::load_level("1,1,1\n1,3,1\n1,1,4\n1,1,2").unwrap();

    let steps = [
        (Direction::Up, Position::new(1, 0)),
        (Direction::Right, Position::new(2, 0)),
        (Direction::Left, Position::new(1, 0)),
        (Direction::Left, Position::new(0, 0)),
        (Direction::Down, Position::new(0, 1)),
    ];
    for (dir, expected) in steps {
        assert_eq!(engine.try_move(dir), MoveOutcome::Moved, "moving {}", dir);
        assert_eq!(engine.player_position(), expected);
    }
    assert_eq!(engine.stats().moves, 5);
    assert_eq!(engine.stats().pushes, 0);
}

/// Test that walls and the grid edge block the player without changes.
#[test]
fn test_walls_and_edges_block() {
    let mut engine = Engine::load_level("0,0,0\n0,3,1\n0,4,2").unwrap();
    let before = positions(&engine);

    assert_eq!(engine.try_move(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(engine.try_move(Direction::Left), MoveOutcome::Blocked);
    assert!(engine.last_moves().is_empty());
    assert_eq!(positions(&engine), before);
}

// =============================================================================
// Pushing
// =============================================================================

/// Test player -> block -> target in a line solves in one move.
#[test]
fn test_single_push_solves() {
    let mut engine = Engine::load_level("1,1,1,1\n1,3,4,2\n1,1,1,1").unwrap();

    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::MovedAndSolved);
    assert!(engine.is_solved());
    assert_eq!(engine.phase(), Phase::Solved);
    assert_eq!(engine.entity_position(EntityId::block(0)), Some(Position::new(3, 1)));
    assert_eq!(engine.player_position(), Position::new(2, 1));
    assert_eq!(engine.grid().tile_at(Position::new(3, 1)), Tile::BlockOnTarget);
}

/// Test that pushing works in every direction.
#[test]
fn test_push_each_direction() {
    let cases = [
        ("2\n4\n3", Direction::Up),
        ("3,4,2", Direction::Right),
        ("3\n4\n2", Direction::Down),
        ("2,4,3", Direction::Left),
    ];
    for (text, dir) in cases {
        let mut engine = Engine::load_level(text).unwrap();
        assert_eq!(engine.try_move(dir), MoveOutcome::MovedAndSolved, "pushing {}", dir);
    }
}

/// Test a block with a wall behind it.
#[test]
fn test_block_against_wall() {
    let mut engine = Engine::load_level("1,3,4,0,2").unwrap();
    let before = positions(&engine);

    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::Blocked);
    assert_eq!(positions(&engine), before);
    assert_eq!(engine.grid().tile_at(Position::new(2, 0)), Tile::Block);
}

/// Test a block with the grid edge behind it.
#[test]
fn test_block_against_edge() {
    let mut engine = Engine::load_level("2,1\n3,1\n4,1").unwrap();
    let before = positions(&engine);

    assert_eq!(engine.try_move(Direction::Down), MoveOutcome::Blocked);
    assert_eq!(positions(&engine), before);
}

/// Test that two blocks in a row cannot be pushed together.
#[test]
fn test_two_blocks_in_a_row() {
    let mut engine = Engine::load_level("3,4,4,1,2,2").unwrap();
    let before = positions(&engine);

    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::Blocked);
    assert_eq!(positions(&engine), before);
}

/// Test that a push reports the block first, then the player.
#[test]
fn test_last_moves_for_push() {
    let mut engine = Engine::load_level("3,4,1,2").unwrap();
    engine.try_move(Direction::Right);

    assert_eq!(
        engine.last_moves(),
        &[
            EntityMove::new(EntityId::block(0), Position::new(1, 0), Position::new(2, 0)),
            EntityMove::new(EntityId::PLAYER, Position::new(0, 0), Position::new(1, 0)),
        ]
    );

    assert_eq!(engine.try_move(Direction::Up), MoveOutcome::Blocked);
    assert!(engine.last_moves().is_empty());
}

// =============================================================================
// Terrain
// =============================================================================

/// Test that a block pushed off a target and back restores BlockOnTarget.
#[test]
fn test_block_terrain_preserved() {
    // _ _ _ _ _
    // _ @ * _ _
    // _ _ _ . $
    // _ _ _ _ _
    let mut engine = Engine::load_level("1,1,1,1,1\n1,3,6,1,1\n1,1,1,2,4\n1,1,1,1,1").unwrap();

    // Push the on-target block right, off its target.
    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::Moved);
    assert_eq!(engine.grid().tile_at(Position::new(2, 1)), Tile::PlayerOnTarget);
    assert_eq!(engine.grid().tile_at(Position::new(3, 1)), Tile::Block);

    // Walk around and push it back left onto the target.
    for dir in [Direction::Up, Direction::Right, Direction::Right, Direction::Down, Direction::Left] {
        engine.try_move(dir);
    }
    assert_eq!(engine.grid().tile_at(Position::new(2, 1)), Tile::BlockOnTarget);
    assert_eq!(engine.grid().tile_at(Position::new(3, 1)), Tile::Player);
    assert!(engine.check_invariants().is_ok());
}

/// Test that the player leaving a target reveals the target again.
#[test]
fn test_player_terrain_preserved() {
    let mut engine = Engine::load_level("5,1,4,2").unwrap();

    engine.try_move(Direction::Right);
    assert_eq!(engine.grid().tile_at(Position::new(0, 0)), Tile::Target);

    engine.try_move(Direction::Left);
    assert_eq!(engine.grid().tile_at(Position::new(0, 0)), Tile::PlayerOnTarget);
}

// =============================================================================
// Solved state
// =============================================================================

/// Test a two-block level solved over several moves.
#[test]
fn test_multi_block_solve() {
    // _ _ _ _
    // @ $ . _
    // _ $ . _
    let mut engine = Engine::load_level("1,1,1,1\n3,4,2,1\n1,4,2,1").unwrap();

    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::Moved);
    assert!(!engine.is_solved());

    assert_eq!(engine.try_move(Direction::Left), MoveOutcome::Moved);
    assert_eq!(engine.try_move(Direction::Down), MoveOutcome::Moved);
    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::MovedAndSolved);
    assert_eq!(engine.stats().pushes, 2);
}

/// Test that nothing moves once the puzzle is solved.
#[test]
fn test_solved_is_terminal() {
    let mut engine = Engine::load_level("1,1,1\n3,4,2\n1,1,1").unwrap();
    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::MovedAndSolved);

    let before = positions(&engine);
    let grid = engine.grid().clone();
    for _ in 0..3 {
        for dir in Direction::ALL {
            assert_eq!(engine.try_move(dir), MoveOutcome::Blocked);
        }
    }
    assert_eq!(positions(&engine), before);
    assert_eq!(engine.grid(), &grid);
    assert!(engine.is_solved());
}

/// Test that a level loaded with every block on a target starts solved.
#[test]
fn test_loaded_already_solved() {
    let mut engine = Engine::load_level("3,1,6").unwrap();
    assert!(engine.is_solved());
    assert_eq!(engine.try_move(Direction::Right), MoveOutcome::Blocked);
}
