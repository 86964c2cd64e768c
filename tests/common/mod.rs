#![allow(dead_code)]

use capitol_run::config::Tuning;
use capitol_run::input::{Action, Input};
use capitol_run::platform::Platform;
use capitol_run::surface::{Color, Surface};

pub fn tuning() -> Tuning {
    Tuning::default()
}

/// A wide floor whose top edge is at `top`.
pub fn floor(top: f32) -> Platform {
    Platform::solid(-1000.0, top, 10_000.0, 100.0)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Input that reports a fixed set of actions as held.
#[derive(Default)]
pub struct Keys {
    held: Vec<Action>,
}

impl Keys {
    pub fn none() -> Self {
        Keys::default()
    }

    pub fn holding(actions: &[Action]) -> Self {
        Keys { held: actions.to_vec() }
    }
}

impl Input for Keys {
    fn is_pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fill(f32, f32, f32, f32, Color),
    Stroke(f32, f32, f32, f32, Color),
    Ellipse(f32, f32, f32, f32, Color),
    Text(f32, f32, String, Color),
}

/// Surface that remembers every primitive drawn on it.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Surface for Recorder {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ops.push(Op::Fill(x, y, width, height, color));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ops.push(Op::Stroke(x, y, width, height, color));
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        self.ops.push(Op::Ellipse(cx, cy, rx, ry, color));
    }

    fn text(&mut self, cx: f32, y: f32, text: &str, color: Color) {
        self.ops.push(Op::Text(cx, y, text.to_string(), color));
    }
}
