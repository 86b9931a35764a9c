//! Tilesmith: a minimal 2D tile map editor
//!
//! A graphical viewport for painting tiles onto a grid, driven by a
//! fixed-timestep loop, plus a line-based command console on a background
//! thread for level file operations (new/load/save/rename). The console
//! talks to the render loop over a request channel; nothing is shared
//! unsynchronized.

mod atlas;
mod camera;
mod console;
mod editor;
mod input;
mod level;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use macroquad::prelude::*;

use atlas::SpriteAtlas;
use console::{spawn_console, EditorRequest};
use editor::EditorState;
use input::KeyBindings;

const SCREEN_WIDTH: i32 = 720;
const SCREEN_HEIGHT: i32 = 480;
/// Logical updates per second
const TICK_RATE: f64 = 60.0;
const SHEET_PATH: &str = "assets/sprites.png";

fn window_conf() -> Conf {
    Conf {
        window_title: "Tilesmith".to_string(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Window close becomes a quit request instead of killing the loop, so
    // the final cleanup path always runs
    prevent_quit();

    let atlas = match SpriteAtlas::from_sheet_file(
        SHEET_PATH,
        &atlas::SHEET_CELLS,
        atlas::NATIVE_TILE_SIZE,
        atlas::TILE_SCALE,
    ) {
        Ok(atlas) => atlas,
        Err(e) => {
            eprintln!("Failed to load sprite sheet {}: {}", SHEET_PATH, e);
            return;
        }
    };

    let mut state = EditorState::new();
    let bindings = KeyBindings::default();

    let quit = Arc::new(AtomicBool::new(false));
    let (requests, request_rx) = channel();
    // Supervisor handle dropped on purpose: a console blocked on stdin at
    // exit is abandoned, never joined
    let _console = spawn_console(requests, Arc::clone(&quit));

    let seconds_per_update = 1.0 / TICK_RATE;
    let mut lag = 0.0f64;

    while !quit.load(Ordering::Relaxed) {
        lag += get_frame_time() as f64;

        editor::poll_events(&mut state, &bindings, &atlas);
        drain_requests(&request_rx, &mut state);

        while lag >= seconds_per_update {
            editor::update_tick(&mut state, &bindings);
            lag -= seconds_per_update;
        }

        if state.quit {
            quit.store(true, Ordering::Relaxed);
        }

        editor::draw_editor(&state, &atlas);
        next_frame().await;
    }

    println!();
}

/// Apply every pending console request to the editor state
fn drain_requests(receiver: &Receiver<EditorRequest>, state: &mut EditorState) {
    loop {
        match receiver.try_recv() {
            Ok(request) => state.apply_request(request),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
}
