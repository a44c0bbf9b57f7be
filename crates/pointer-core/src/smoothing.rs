//! Cursor state and temporal smoothing.
//!
//! Both position mappers produce a raw pixel target each frame; the
//! smoother blends it into the persistent cursor with an exponential moving
//! average and clamps the result to the screen.

use serde::{Deserialize, Serialize};

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center pixel, rounded down.
    pub fn center(&self) -> CursorState {
        CursorState {
            x: (self.width / 2) as i32,
            y: (self.height / 2) as i32,
        }
    }

    /// Clamp a pixel position to `[0, width] x [0, height]`.
    ///
    /// Sides beyond `i32::MAX` saturate there.
    pub fn clamp(&self, x: i32, y: i32) -> CursorState {
        CursorState {
            x: x.clamp(0, i32::try_from(self.width).unwrap_or(i32::MAX)),
            y: y.clamp(0, i32::try_from(self.height).unwrap_or(i32::MAX)),
        }
    }
}

/// Integer cursor position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub x: i32,
    pub y: i32,
}

/// Exponential moving average over cursor pixels.
///
/// `alpha` is the weight of the newest target:
/// `cursor = cursor * (1 - alpha) + target * alpha`, truncated to pixels.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    alpha: f64,
    screen: ScreenSize,
    cursor: CursorState,
}

impl CursorSmoother {
    /// Create a smoother with the cursor parked at the screen center.
    pub fn new(alpha: f64, screen: ScreenSize) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            screen,
            cursor: screen.center(),
        }
    }

    /// Blend a raw target into the cursor and return the new position.
    pub fn update(&mut self, target: CursorState) -> CursorState {
        let x = self.cursor.x as f64 * (1.0 - self.alpha) + target.x as f64 * self.alpha;
        let y = self.cursor.y as f64 * (1.0 - self.alpha) + target.y as f64 * self.alpha;
        self.cursor = self.screen.clamp(x as i32, y as i32);
        self.cursor
    }

    /// Last smoothed position.
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }
}
