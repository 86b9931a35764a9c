//! Level data and persistence

mod grid;
mod io;

pub use grid::{LevelGrid, TileId};
pub use io::{limits, load_level, save_level, validate_dims, LevelError};
