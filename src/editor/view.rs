//! Viewport drawing and per-tick input
//!
//! The fixed-step update mutates state from live keyboard/mouse polling; the
//! draw pass blits every non-empty cell through the camera and outlines the
//! level boundary.

use macroquad::prelude::*;

use super::{EditorState, TILE_SIZE};
use crate::atlas::SpriteAtlas;
use crate::input::{self, Action, KeyBindings};

/// One logical update: pan from held keys, paint from the held mouse button,
/// then recenter the camera
pub fn update_tick(state: &mut EditorState, bindings: &KeyBindings) {
    for (action, direction) in input::PAN_DIRECTIONS {
        if let Some(key) = bindings.key(action) {
            if is_key_down(key) {
                state.apply_pan(direction);
            }
        }
    }

    if is_mouse_button_down(MouseButton::Left) {
        let (mx, my) = mouse_position();
        // Mouse position relative to the world, not the screen
        let world = vec2(mx, my) - state.camera.offset();
        state.paint_at(world);
    }

    let screen = vec2(screen_width(), screen_height());
    let target = state.cam_target;
    state.camera.update(target, screen);
}

/// Edge-triggered input: tile selection, quit key, window close
pub fn poll_events(state: &mut EditorState, bindings: &KeyBindings, atlas: &SpriteAtlas) {
    if is_quit_requested() {
        state.quit = true;
    }
    if let Some(key) = bindings.key(Action::Quit) {
        if is_key_pressed(key) {
            state.quit = true;
        }
    }
    for (i, &key) in input::TILE_KEYS.iter().enumerate() {
        if is_key_pressed(key) {
            state.select_tile(i as u8, atlas.len());
        }
    }
}

/// Draw the grid and the level boundary
pub fn draw_editor(state: &EditorState, atlas: &SpriteAtlas) {
    clear_background(WHITE);

    for (row, cells) in state.grid.iter_rows().enumerate() {
        for (col, tile) in cells.iter().enumerate() {
            if let Some(id) = tile {
                let world = Rect::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE, 0.0, 0.0);
                let screen = state.camera.apply(world);
                if let Some(texture) = atlas.texture(*id) {
                    draw_texture(texture, screen.x, screen.y, WHITE);
                }
            }
        }
    }

    let boundary = state.camera.apply(state.level_rect);
    draw_rectangle_lines(boundary.x, boundary.y, boundary.w, boundary.h, 5.0, BLACK);
}
