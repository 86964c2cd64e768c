//! Horizontal follow camera.

use crate::config::CameraTuning;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub level_width: f32,
    pub level_height: f32,
    /// Fraction of the remaining distance covered per follow.
    pub smoothing: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32, tuning: &CameraTuning) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            level_width: width,
            level_height: height,
            smoothing: tuning.smoothing,
        }
    }

    pub fn set_level_dimensions(&mut self, width: f32, height: f32) {
        self.level_width = width;
        self.level_height = height;
    }

    /// Ease towards centring `target`, never showing past the level edges.
    pub fn follow(&mut self, target: &Rect) {
        let target_x = target.x - self.width / 2.0 + target.width / 2.0;
        self.x += (target_x - self.x) * self.smoothing;
        self.x = self.x.min(self.level_width - self.width).max(0.0);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn view(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
