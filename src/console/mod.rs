//! Command console
//!
//! A line-based console running on a background thread: read a line, parse,
//! execute. The console never touches editor state directly; it sends
//! `EditorRequest` values over a channel and the render loop drains and
//! applies them once per tick. Reads (the current level name, a grid copy for
//! saving) come back as a `LevelSnapshot` over a reply channel embedded in
//! the request.

mod command;
mod session;
mod supervisor;

pub use command::{Command, ParseError, COMMAND_LIST};
pub use session::{Console, ConsoleExit};
pub use supervisor::spawn_console;

use std::sync::mpsc::Sender;

use crate::level::{LevelGrid, TileId};

/// A copy of the editor's level identity and contents at one tick
#[derive(Debug, Clone)]
pub struct LevelSnapshot {
    pub name: String,
    pub grid: LevelGrid,
}

/// State changes the console asks the render loop to apply
pub enum EditorRequest {
    /// Reply with the current level name and a copy of the grid
    Snapshot { reply: Sender<LevelSnapshot> },
    /// Adopt a freshly loaded level and its file name
    ReplaceLevel { grid: LevelGrid, name: String },
    /// Replace the grid contents, keeping the current name
    ReplaceGrid { grid: LevelGrid },
    /// Change the level's file name without touching the grid
    Rename { name: String },
    Quit,
}

/// Arguments of a parsed `new` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLevelArgs {
    pub cols: usize,
    pub rows: usize,
    pub fill: Option<TileId>,
}
