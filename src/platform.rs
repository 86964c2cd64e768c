//! Platforms: solid ground plus the moving, crumbling and bouncy variants.

use crate::body::Body;
use crate::config::{PlatformTuning, TICK_SECONDS};
use crate::surface::{Color, Surface};

const C_PLATFORM: Color = Color::rgb(139, 69, 19);
const C_BOUNCY: Color = Color::rgb(0, 191, 255);
const C_SPRING: Color = Color::rgb(135, 206, 250);

/// Slack on the crumble timers so summed f32 ticks hit whole durations.
const TIMER_SLACK: f32 = TICK_SECONDS * 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Per-kind state. Exactly one behaviour is live per platform.
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformKind {
    Solid,
    Moving {
        axis: Axis,
        /// Bounds along `axis`, `start <= end`.
        start: f32,
        end: f32,
        speed: f32,
        forward: bool,
    },
    Crumbling {
        triggered: bool,
        crumble_elapsed: f32,
        crumble_duration: f32,
        reset_elapsed: f32,
        reset_duration: f32,
    },
    Bouncy {
        bounce_force: f32,
    },
}

#[derive(Debug)]
pub struct Platform {
    pub body: Body,
    pub kind: PlatformKind,
    pub color: Color,
    origin: (f32, f32),
}

impl Platform {
    fn with_kind(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            kind,
            color: C_PLATFORM,
            origin: (x, y),
        }
    }

    pub fn solid(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_kind(x, y, width, height, PlatformKind::Solid)
    }

    /// Ping-pongs from its start position to `distance` further along `axis`
    /// (right or down).
    pub fn moving(x: f32, y: f32, width: f32, height: f32, axis: Axis, distance: f32, speed: f32) -> Self {
        let start = match axis {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        };
        let kind = PlatformKind::Moving { axis, start, end: start + distance, speed, forward: true };
        Self::with_kind(x, y, width, height, kind)
    }

    pub fn crumbling(x: f32, y: f32, width: f32, height: f32, tuning: &PlatformTuning) -> Self {
        let kind = PlatformKind::Crumbling {
            triggered: false,
            crumble_elapsed: 0.0,
            crumble_duration: tuning.crumble_duration,
            reset_elapsed: 0.0,
            reset_duration: tuning.reset_duration,
        };
        Self::with_kind(x, y, width, height, kind)
    }

    pub fn bouncy(x: f32, y: f32, width: f32, height: f32, bounce_force: f32) -> Self {
        Self::with_kind(x, y, width, height, PlatformKind::Bouncy { bounce_force })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn update(&mut self, dt: f32) {
        let body = &mut self.body;
        match &mut self.kind {
            PlatformKind::Moving { axis, start, end, speed, forward } => {
                let pos = match axis {
                    Axis::Horizontal => &mut body.rect.x,
                    Axis::Vertical => &mut body.rect.y,
                };
                if *forward {
                    *pos += *speed;
                    if *pos >= *end {
                        *forward = false;
                    }
                } else {
                    *pos -= *speed;
                    if *pos <= *start {
                        *forward = true;
                    }
                }
            }
            PlatformKind::Crumbling {
                triggered,
                crumble_elapsed,
                crumble_duration,
                reset_elapsed,
                reset_duration,
            } => {
                if !*triggered {
                    return;
                }
                if body.active {
                    *crumble_elapsed += dt;
                    if *crumble_elapsed + TIMER_SLACK >= *crumble_duration {
                        body.active = false;
                        *crumble_elapsed = 0.0;
                        *reset_elapsed = 0.0;
                    }
                } else {
                    *reset_elapsed += dt;
                    if *reset_elapsed + TIMER_SLACK >= *reset_duration {
                        body.active = true;
                        *triggered = false;
                        *reset_elapsed = 0.0;
                    }
                }
            }
            _ => {}
        }
    }

    /// Start the crumble countdown. No-op unless this is an untriggered
    /// crumbling platform.
    pub fn trigger(&mut self) {
        if let PlatformKind::Crumbling { triggered, .. } = &mut self.kind {
            if !*triggered {
                *triggered = true;
                log::trace!("crumbling platform at x={} triggered", self.body.rect.x);
            }
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self.kind, PlatformKind::Crumbling { triggered: true, .. })
    }

    /// Landing hook, run by [`Body::resolve_platforms`] after it has snapped
    /// `lander` onto this platform. `impact_vy` is the lander's vertical
    /// speed before the snap zeroed it.
    pub fn on_landed(&mut self, lander: &mut Body, impact_vy: f32) {
        match self.kind {
            PlatformKind::Crumbling { .. } => self.trigger(),
            PlatformKind::Bouncy { bounce_force } if impact_vy > 0.0 => {
                lander.vy = -bounce_force;
                lander.on_ground = false;
            }
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.body.active = true;
        self.body.set_position(self.origin.0, self.origin.1);
        match &mut self.kind {
            PlatformKind::Moving { forward, .. } => *forward = true,
            PlatformKind::Crumbling { triggered, crumble_elapsed, reset_elapsed, .. } => {
                *triggered = false;
                *crumble_elapsed = 0.0;
                *reset_elapsed = 0.0;
            }
            _ => {}
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active {
            return;
        }
        let r = self.body.rect;
        let x = r.x - offset_x;
        let y = r.y - offset_y;

        match self.kind {
            PlatformKind::Crumbling { triggered: true, crumble_elapsed, crumble_duration, .. } => {
                let progress = crumble_elapsed / crumble_duration;
                let faded = self.color.mix(Color::SKY, progress * 0.7);
                surface.fill_rect(x, y, r.width, r.height, faded);
            }
            PlatformKind::Bouncy { .. } => {
                surface.fill_rect(x, y, r.width, r.height, C_BOUNCY);
                surface.fill_rect(x + 5.0, y - 5.0, r.width - 10.0, 5.0, C_SPRING);
            }
            _ => surface.fill_rect(x, y, r.width, r.height, self.color),
        }
    }
}
