//! Seeded generation of solvable levels.

pub mod rng;
pub mod scramble;

pub use rng::LevelRng;
pub use scramble::LevelGenerator;
