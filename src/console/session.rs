//! Interactive console session
//!
//! Generic over the line source and sink so the whole read-parse-execute
//! cycle, confirmations included, runs against in-memory buffers in tests.
//! File I/O for save/load happens here on the console thread; the resulting
//! grid travels to the render loop as a request.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;

use super::{Command, EditorRequest, LevelSnapshot, ParseError, COMMAND_LIST};
use crate::level::{load_level, save_level, validate_dims, LevelError, LevelGrid};

/// Why a session's run loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// Quit flag observed true
    Quit,
    /// Input reached end of stream
    Eof,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    requests: Sender<EditorRequest>,
    quit: Arc<AtomicBool>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, requests: Sender<EditorRequest>, quit: Arc<AtomicBool>) -> Self {
        Self {
            input,
            output,
            requests,
            quit,
        }
    }

    /// Read-parse-execute until quit or end of input
    pub fn run(&mut self) -> ConsoleExit {
        loop {
            if self.quit.load(Ordering::Relaxed) {
                return ConsoleExit::Quit;
            }
            let Some(line) = self.prompt_line() else {
                return ConsoleExit::Eof;
            };
            self.handle_line(&line);
        }
    }

    fn handle_line(&mut self, line: &str) {
        match Command::parse(line) {
            Ok(command) => self.run_command(command),
            Err(ParseError::Empty) => {}
            Err(error @ ParseError::Unknown(_)) => {
                self.say(&error.to_string());
                self.say(COMMAND_LIST);
            }
            Err(error) => self.say(&error.to_string()),
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Save => self.save_current(),
            Command::Load { name } => {
                self.prompt_save(&format!("loading {}", name));
                match load_level(&name) {
                    Ok(grid) => {
                        self.send(EditorRequest::ReplaceLevel {
                            grid,
                            name: name.clone(),
                        });
                        self.say(&format!("Loaded {}", name));
                    }
                    Err(LevelError::NotFound(_)) => {
                        self.say(&format!("{} level not found", name));
                    }
                    Err(error) => {
                        self.say(&format!("Failed to load {}: {}", name, error));
                    }
                }
            }
            Command::New(args) => {
                // Same geometry check the loader enforces, applied before
                // allocation: a zero-size grid would save as a file load
                // rejects, and oversized dimensions would allocate unbounded
                if let Err(error) = validate_dims(args.cols, args.rows) {
                    self.say(&format!("Failed to create level: {}", error));
                    return;
                }
                self.prompt_save("creating a new level");
                self.send(EditorRequest::ReplaceGrid {
                    grid: LevelGrid::filled(args.cols, args.rows, args.fill),
                });
            }
            Command::Rename { name } => {
                self.send(EditorRequest::Rename { name });
            }
            Command::Name => {
                if let Some(snapshot) = self.snapshot() {
                    self.say(&format!("The current level is {}", snapshot.name));
                }
            }
            Command::Quit => {
                self.prompt_save("exiting");
                self.quit.store(true, Ordering::Relaxed);
                self.send(EditorRequest::Quit);
                self.say("Quitting...");
            }
        }
    }

    /// Save the current grid to the current file name, confirming before
    /// overwriting an existing file
    fn save_current(&mut self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if Path::new(&snapshot.name).is_file() {
            self.say(&format!(
                "{} already exists. Overwrite? (y/n)",
                snapshot.name
            ));
            let answer = self.prompt_line().unwrap_or_default();
            if answer.trim() != "y" {
                self.say("Did not overwrite");
                return;
            }
        }
        match save_level(&snapshot.grid, &snapshot.name) {
            Ok(()) => self.say(&format!("Saved {}", snapshot.name)),
            Err(error) => self.say(&format!("Failed to save {}: {}", snapshot.name, error)),
        }
    }

    /// Unconditional unsaved-changes confirmation before a destructive
    /// action. A `y` answer re-enters the full save flow, overwrite
    /// confirmation included; anything else proceeds without saving.
    fn prompt_save(&mut self, action: &str) {
        self.say(&format!(
            "Would you like to save before {}? (y/n)",
            action
        ));
        let answer = self.prompt_line().unwrap_or_default();
        if answer.trim() == "y" {
            self.save_current();
        } else {
            self.say("Did not save");
        }
    }

    /// Ask the render loop for the current name and grid
    fn snapshot(&mut self) -> Option<LevelSnapshot> {
        let (reply, receiver) = channel();
        self.requests.send(EditorRequest::Snapshot { reply }).ok()?;
        receiver.recv().ok()
    }

    fn send(&mut self, request: EditorRequest) {
        // The render loop owning the receiver may already be gone at exit
        let _ = self.requests.send(request);
    }

    fn say(&mut self, line: &str) {
        let _ = writeln!(self.output, "{}", line);
    }

    /// Print the prompt and read one line; `None` on end of input
    fn prompt_line(&mut self) -> Option<String> {
        let _ = write!(self.output, "> ");
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc::Receiver;
    use std::thread;

    /// Applies requests the way the render loop does, against a plain
    /// (name, grid) pair, until the console's sender is dropped
    struct AppliedState {
        name: String,
        grid: LevelGrid,
        quit_requested: bool,
    }

    fn apply_requests(
        receiver: Receiver<EditorRequest>,
        name: &str,
        grid: LevelGrid,
    ) -> thread::JoinHandle<AppliedState> {
        let mut state = AppliedState {
            name: name.to_string(),
            grid,
            quit_requested: false,
        };
        thread::spawn(move || {
            while let Ok(request) = receiver.recv() {
                match request {
                    EditorRequest::Snapshot { reply } => {
                        let _ = reply.send(LevelSnapshot {
                            name: state.name.clone(),
                            grid: state.grid.clone(),
                        });
                    }
                    EditorRequest::ReplaceLevel { grid, name } => {
                        state.grid = grid;
                        state.name = name;
                    }
                    EditorRequest::ReplaceGrid { grid } => state.grid = grid,
                    EditorRequest::Rename { name } => state.name = name,
                    EditorRequest::Quit => state.quit_requested = true,
                }
            }
            state
        })
    }

    /// Run a whole scripted session; returns the transcript and final state
    fn run_script(script: &str, name: &str, grid: LevelGrid) -> (String, AppliedState, ConsoleExit) {
        let (sender, receiver) = channel();
        let applier = apply_requests(receiver, name, grid);
        let quit = Arc::new(AtomicBool::new(false));

        let mut output = Vec::new();
        let exit = {
            let mut console = Console::new(Cursor::new(script), &mut output, sender, quit);
            console.run()
        };

        let state = applier.join().unwrap();
        (String::from_utf8(output).unwrap(), state, exit)
    }

    #[test]
    fn test_name_prints_current_level() {
        let (out, _, exit) = run_script("name\n", "cave.json", LevelGrid::new(2, 2));
        assert!(out.contains("The current level is cave.json"));
        assert_eq!(exit, ConsoleExit::Eof);
    }

    #[test]
    fn test_rename_then_name() {
        let (out, state, _) = run_script("rename foo.json\nname\n", "new.json", LevelGrid::new(2, 2));
        assert!(out.contains("The current level is foo.json"));
        assert_eq!(state.name, "foo.json");
    }

    #[test]
    fn test_new_replaces_grid_with_given_geometry() {
        let (_, state, _) = run_script("new 4 3\nn\n", "new.json", LevelGrid::new(1, 1));
        assert_eq!(state.grid.rows(), 3);
        assert_eq!(state.grid.cols(), 4);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(state.grid.get(row, col), None);
            }
        }
        // Name untouched by new
        assert_eq!(state.name, "new.json");
    }

    #[test]
    fn test_new_with_default_fill() {
        let (_, state, _) = run_script("new 2 2 5\nn\n", "new.json", LevelGrid::new(1, 1));
        assert_eq!(state.grid.get(1, 1), Some(5));
    }

    #[test]
    fn test_new_zero_size_is_rejected_and_save_stays_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("void.json");
        let name = path.to_string_lossy().to_string();

        let before = LevelGrid::filled(2, 2, Some(1));
        let (out, state, _) = run_script("new 0 0\nsave\n", &name, before.clone());

        assert!(out.contains("Failed to create level"));
        // Rejected before the unsaved-changes prompt, like other bad args
        assert!(!out.contains("Would you like to save"));
        assert_eq!(state.grid, before);

        // The subsequent save wrote the intact grid, and it loads back
        assert_eq!(load_level(&path).unwrap(), before);
    }

    #[test]
    fn test_new_oversized_is_rejected() {
        let before = LevelGrid::new(2, 2);
        let (out, state, _) = run_script(
            "new 4000000000 4000000000\n",
            "new.json",
            before.clone(),
        );
        assert!(out.contains("Failed to create level"));
        assert_eq!(state.grid, before);
    }

    #[test]
    fn test_load_missing_reports_not_found_and_leaves_grid() {
        let before = LevelGrid::filled(2, 2, Some(1));
        let (out, state, _) = run_script(
            "load missing_level.json\nn\n",
            "new.json",
            before.clone(),
        );
        assert!(out.contains("missing_level.json level not found"));
        assert_eq!(state.grid, before);
        assert_eq!(state.name, "new.json");
    }

    #[test]
    fn test_load_wrong_arity_prints_usage_and_does_nothing() {
        let before = LevelGrid::new(2, 2);
        let (out, state, _) = run_script("load a b\n", "new.json", before.clone());
        assert!(out.contains("Error: expected 'load some_file_name'"));
        // No save prompt was shown, no load attempted
        assert!(!out.contains("Would you like to save"));
        assert_eq!(state.grid, before);
    }

    #[test]
    fn test_save_fresh_name_writes_without_overwrite_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.json");
        let name = path.to_string_lossy().to_string();

        let grid = LevelGrid::filled(3, 2, Some(4));
        let (out, _, _) = run_script("save\n", &name, grid.clone());

        assert!(out.contains(&format!("Saved {}", name)));
        assert!(!out.contains("Overwrite?"));
        assert_eq!(load_level(&path).unwrap(), grid);
    }

    #[test]
    fn test_save_declined_overwrite_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.json");
        let name = path.to_string_lossy().to_string();

        let on_disk = LevelGrid::filled(2, 2, Some(9));
        save_level(&on_disk, &path).unwrap();

        let (out, _, _) = run_script("save\nn\n", &name, LevelGrid::new(5, 5));
        assert!(out.contains("already exists. Overwrite? (y/n)"));
        assert!(out.contains("Did not overwrite"));
        assert_eq!(load_level(&path).unwrap(), on_disk);
    }

    #[test]
    fn test_save_confirmed_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let name = path.to_string_lossy().to_string();

        save_level(&LevelGrid::filled(2, 2, Some(9)), &path).unwrap();

        let current = LevelGrid::filled(3, 3, Some(1));
        let (out, _, _) = run_script("save\ny\n", &name, current.clone());
        assert!(out.contains(&format!("Saved {}", name)));
        assert_eq!(load_level(&path).unwrap(), current);
    }

    #[test]
    fn test_load_existing_level_adopts_grid_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cave.json");
        let name = path.to_string_lossy().to_string();

        let on_disk = LevelGrid::filled(6, 2, Some(3));
        save_level(&on_disk, &path).unwrap();

        let (out, state, _) = run_script(
            &format!("load {}\nn\n", name),
            "new.json",
            LevelGrid::new(1, 1),
        );
        assert!(out.contains(&format!("Loaded {}", name)));
        assert_eq!(state.grid, on_disk);
        assert_eq!(state.name, name);
    }

    #[test]
    fn test_load_malformed_level_reports_and_leaves_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[[1,2],[3]]").unwrap();
        let name = path.to_string_lossy().to_string();

        let before = LevelGrid::filled(2, 2, Some(1));
        let (out, state, _) = run_script(
            &format!("load {}\nn\n", name),
            "new.json",
            before.clone(),
        );
        assert!(out.contains("Failed to load"));
        assert_eq!(state.grid, before);
        assert_eq!(state.name, "new.json");
    }

    #[test]
    fn test_quit_declining_save_sets_quit() {
        let (out, state, exit) = run_script("quit\nn\n", "new.json", LevelGrid::new(2, 2));
        assert!(out.contains("Would you like to save before exiting? (y/n)"));
        assert!(out.contains("Did not save"));
        assert!(out.contains("Quitting..."));
        assert!(state.quit_requested);
        assert_eq!(exit, ConsoleExit::Quit);
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (out, _, _) = run_script("launch rockets\n", "new.json", LevelGrid::new(2, 2));
        assert!(out.contains("'launch rockets' is not a legal command"));
        assert!(out.contains(COMMAND_LIST));
    }

    #[test]
    fn test_prompt_save_confirmation_saves_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("before_new.json");
        let name = path.to_string_lossy().to_string();

        let current = LevelGrid::filled(2, 2, Some(7));
        let (_, state, _) = run_script("new 3 3\ny\n", &name, current.clone());

        // Old contents were written before the grid was replaced
        assert_eq!(load_level(&path).unwrap(), current);
        assert_eq!(state.grid.rows(), 3);
    }
}
