//! Pan camera
//!
//! Maps world coordinates to screen coordinates by translating draw
//! rectangles by the camera's current top-left offset. The offset itself is
//! produced each tick by a caller-supplied follow function; there is no
//! smoothing, the camera snaps instantly.

use macroquad::prelude::{vec2, Rect, Vec2};

/// Follow function: (current camera rect, target position, screen size) ->
/// new camera rect
pub type FollowFn = fn(Rect, Vec2, Vec2) -> Rect;

/// Default follow function: centers the viewport on the target, leaving the
/// camera rect's width and height unchanged
pub fn center_on_target(current: Rect, target: Vec2, screen: Vec2) -> Rect {
    Rect::new(
        -target.x + screen.x / 2.0,
        -target.y + screen.y / 2.0,
        current.w,
        current.h,
    )
}

/// Scrolling camera for the viewport
pub struct Camera {
    state: Rect,
    follow: FollowFn,
}

impl Camera {
    /// New camera at the origin with the given follow function
    pub fn new(follow: FollowFn) -> Self {
        Self {
            state: Rect::new(0.0, 0.0, 0.0, 0.0),
            follow,
        }
    }

    /// Replace the camera rect with the follow function's output
    pub fn update(&mut self, target: Vec2, screen: Vec2) {
        self.state = (self.follow)(self.state, target, screen);
    }

    /// Translate a world-space rectangle into screen space
    pub fn apply(&self, rect: Rect) -> Rect {
        rect.offset(self.offset())
    }

    /// Current top-left offset
    pub fn offset(&self) -> Vec2 {
        vec2(self.state.x, self.state.y)
    }
}
