//! Grid state: the tile grid, the entity registry, and the board that
//! keeps them consistent.

pub mod grid;
pub mod registry;
pub mod board;

pub use grid::Grid;
pub use registry::EntityRegistry;
pub use board::Board;
