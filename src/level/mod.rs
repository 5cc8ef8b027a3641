//! Level loading: level text in, grid and entity positions out.

pub mod loader;

pub use loader::{load_level, load_level_with_config, LoadedLevel};
