//! Console thread lifecycle
//!
//! A supervisor thread owns the session worker: it spawns the read loop and
//! re-spawns it if the worker panics while the editor is still running. The
//! render loop never polls for liveness. Neither thread is joined at process
//! exit; a session blocked on stdin is simply abandoned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use super::{Console, ConsoleExit, EditorRequest};

/// Spawn the supervised console. Returns the supervisor handle, which the
/// caller is free to drop.
pub fn spawn_console(
    requests: Sender<EditorRequest>,
    quit: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        println!("Welcome to the level editor!");

        while !quit.load(Ordering::Relaxed) {
            let worker_requests = requests.clone();
            let worker_quit = Arc::clone(&quit);
            let worker = thread::spawn(move || {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                let mut console = Console::new(stdin.lock(), stdout, worker_requests, worker_quit);
                console.run()
            });

            match worker.join() {
                // Clean exits end supervision; there is nothing left to read
                Ok(ConsoleExit::Quit) | Ok(ConsoleExit::Eof) => break,
                Err(_) => {
                    eprintln!("Console crashed, restarting");
                }
            }
        }
    })
}
