//! Logical input actions. The front end decides which physical keys map
//! to each one.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Shoot,
}

pub trait Input {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Nothing held. Handy for driving the simulation without a player.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl Input for NoInput {
    fn is_pressed(&self, _action: Action) -> bool {
        false
    }
}
