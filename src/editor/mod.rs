//! Editor: shared state, fixed-step update, and viewport drawing

mod state;
mod view;

pub use state::{
    level_rect_for, EditorState, DEFAULT_LEVEL_DIM, DEFAULT_LEVEL_NAME, PAN_SPEED, TILE_SIZE,
};
pub use view::{draw_editor, poll_events, update_tick};
