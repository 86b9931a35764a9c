//! Editor state and data

use macroquad::prelude::{Rect, Vec2};

use crate::atlas::{NATIVE_TILE_SIZE, TILE_SCALE};
use crate::camera::{center_on_target, Camera};
use crate::console::{EditorRequest, LevelSnapshot};
use crate::level::{LevelGrid, TileId};

/// On-screen tile size in pixels (sheet cell times magnification)
pub const TILE_SIZE: f32 = (NATIVE_TILE_SIZE * TILE_SCALE) as f32;
/// Camera pan speed in pixels per logical update
pub const PAN_SPEED: f32 = 3.0;
/// Level name before the first rename/load
pub const DEFAULT_LEVEL_NAME: &str = "new.json";
/// Default level dimensions in tiles (cols, rows)
pub const DEFAULT_LEVEL_DIM: (usize, usize) = (12, 12);

/// Aggregate editor state for the process lifetime
pub struct EditorState {
    pub grid: LevelGrid,
    pub level_name: String,
    /// Pixel-space boundary of the level, recomputed when the grid changes
    pub level_rect: Rect,
    pub selected_tile: TileId,
    /// Position the camera recenters on each tick
    pub cam_target: Vec2,
    pub camera: Camera,
    pub quit: bool,
}

impl EditorState {
    pub fn new() -> Self {
        let (cols, rows) = DEFAULT_LEVEL_DIM;
        Self {
            grid: LevelGrid::new(cols, rows),
            level_name: DEFAULT_LEVEL_NAME.to_string(),
            level_rect: level_rect_for(cols, rows),
            selected_tile: 0,
            cam_target: Vec2::ZERO,
            camera: Camera::new(center_on_target),
            quit: false,
        }
    }

    /// Replace the grid and recompute the boundary rectangle
    pub fn replace_grid(&mut self, grid: LevelGrid) {
        self.level_rect = level_rect_for(grid.cols(), grid.rows());
        self.grid = grid;
    }

    /// Select a tile id if it is within the atlas
    pub fn select_tile(&mut self, id: TileId, atlas_len: usize) {
        if (id as usize) < atlas_len {
            self.selected_tile = id;
        }
    }

    /// Advance the camera target by one pan step
    pub fn apply_pan(&mut self, direction: Vec2) {
        self.cam_target += direction * PAN_SPEED;
    }

    /// Paint the selected tile at a world-space position. Positions outside
    /// the grid, including negative ones, are silently ignored.
    pub fn paint_at(&mut self, world: Vec2) {
        if world.x < 0.0 || world.y < 0.0 {
            return;
        }
        let col = (world.x / TILE_SIZE) as usize;
        let row = (world.y / TILE_SIZE) as usize;
        self.grid.set(row, col, Some(self.selected_tile));
    }

    /// Apply one console request. Called from the render loop while draining
    /// the request channel, once per tick.
    pub fn apply_request(&mut self, request: EditorRequest) {
        match request {
            EditorRequest::Snapshot { reply } => {
                // The console may have given up waiting; a dead reply
                // channel is not our problem
                let _ = reply.send(LevelSnapshot {
                    name: self.level_name.clone(),
                    grid: self.grid.clone(),
                });
            }
            EditorRequest::ReplaceLevel { grid, name } => {
                self.replace_grid(grid);
                self.level_name = name;
            }
            EditorRequest::ReplaceGrid { grid } => self.replace_grid(grid),
            EditorRequest::Rename { name } => self.level_name = name,
            EditorRequest::Quit => self.quit = true,
        }
    }
}

/// Boundary rectangle for a level of the given tile dimensions
pub fn level_rect_for(cols: usize, rows: usize) -> Rect {
    Rect::new(0.0, 0.0, cols as f32 * TILE_SIZE, rows as f32 * TILE_SIZE)
}
