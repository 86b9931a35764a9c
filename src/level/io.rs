//! Level loading and saving
//!
//! Levels are UTF-8 JSON: an array of rows, each row an array with one entry
//! per column, each entry an integer tile id or null. The file name is the
//! level's identity; no extension is enforced.

use std::fs;
use std::path::Path;

use super::LevelGrid;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum grid dimension (rows or columns)
    pub const MAX_GRID_DIM: usize = 1024;
}

/// Error type for level I/O
#[derive(Debug)]
pub enum LevelError {
    /// The named level does not exist on disk
    NotFound(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Empty or irregular grid geometry
    Geometry(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::NotFound(name) => write!(f, "{} not found", name),
            LevelError::Io(e) => write!(f, "IO error: {}", e),
            LevelError::Parse(e) => write!(f, "Parse error: {}", e),
            LevelError::Geometry(e) => write!(f, "Bad level geometry: {}", e),
        }
    }
}

/// Check that grid dimensions are non-zero and within size limits. Used
/// both on load and before allocating a fresh grid for `new`.
pub fn validate_dims(cols: usize, rows: usize) -> Result<(), LevelError> {
    if rows == 0 {
        return Err(LevelError::Geometry("level has no rows".into()));
    }
    if cols == 0 {
        return Err(LevelError::Geometry("level rows are empty".into()));
    }
    if rows > limits::MAX_GRID_DIM || cols > limits::MAX_GRID_DIM {
        return Err(LevelError::Geometry(format!(
            "level too large ({}x{} > {})",
            cols,
            rows,
            limits::MAX_GRID_DIM
        )));
    }
    Ok(())
}

/// Check that a grid is non-empty, rectangular, and within size limits
pub fn validate_grid(grid: &LevelGrid) -> Result<(), LevelError> {
    validate_dims(grid.cols(), grid.rows())?;
    if grid.is_ragged() {
        return Err(LevelError::Geometry(
            "rows have differing lengths".into(),
        ));
    }
    Ok(())
}

/// Load a level from a JSON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelGrid, LevelError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LevelError::NotFound(path.display().to_string()));
    }
    let contents = fs::read_to_string(path)?;
    let grid: LevelGrid = serde_json::from_str(&contents)?;
    validate_grid(&grid)?;
    Ok(grid)
}

/// Save a level to a JSON file, replacing any existing contents
pub fn save_level<P: AsRef<Path>>(grid: &LevelGrid, path: P) -> Result<(), LevelError> {
    let contents = serde_json::to_string(grid)?;
    fs::write(path, contents)?;
    Ok(())
}
