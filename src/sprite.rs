//! Sprite collaborator interface plus the frame clock most sprites share.
//!
//! The core never slices sprite sheets itself. An entity that owns a sprite
//! tells it which animation to play, ticks it once per update and hands it a
//! screen rectangle to draw into.

use std::collections::HashMap;

use crate::surface::Surface;

pub trait Sprite: std::fmt::Debug {
    /// Switch animation. Unknown names and the current animation are ignored.
    fn set_animation(&mut self, name: &str);

    fn update(&mut self, dt: f32);

    fn draw(&self, surface: &mut dyn Surface, x: f32, y: f32, width: f32, height: f32, flip_x: bool);
}

/// Inclusive frame range of one named animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

/// Advances the current frame of a named animation at a fixed rate.
#[derive(Clone, Debug)]
pub struct FrameClock {
    animations: HashMap<String, FrameRange>,
    current: String,
    frame: usize,
    timer: f32,
    /// Seconds each frame stays on screen.
    frame_time: f32,
}

impl FrameClock {
    /// A clock with `idle`, `run` and `jump` animations over `total_frames`.
    pub fn new(total_frames: usize, frame_time: f32) -> Self {
        let last = total_frames.saturating_sub(1);
        let mut animations = HashMap::new();
        animations.insert("idle".to_string(), FrameRange { start: 0, end: 0 });
        animations.insert("run".to_string(), FrameRange { start: 0, end: last });
        animations.insert("jump".to_string(), FrameRange { start: 0, end: 0 });
        Self {
            animations,
            current: "idle".to_string(),
            frame: 0,
            timer: 0.0,
            frame_time,
        }
    }

    pub fn add_animation(&mut self, name: &str, start: usize, end: usize) {
        self.animations.insert(name.to_string(), FrameRange { start, end });
    }

    pub fn set_animation(&mut self, name: &str) {
        if self.current == name {
            return;
        }
        if let Some(range) = self.animations.get(name) {
            self.current = name.to_string();
            self.frame = range.start;
            self.timer = 0.0;
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer < self.frame_time {
            return;
        }
        self.timer = 0.0;
        if let Some(range) = self.animations.get(&self.current) {
            self.frame = if self.frame < range.end { self.frame + 1 } else { range.start };
        }
    }

    pub fn animation(&self) -> &str {
        &self.current
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}
