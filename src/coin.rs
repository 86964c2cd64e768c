//! Votes to collect. A collected coin plays a short grow-and-fade before it
//! goes inactive.

use crate::body::Body;
use crate::config::CoinTuning;
use crate::surface::{Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinKind {
    Regular,
    Special,
}

#[derive(Debug)]
pub struct Coin {
    pub body: Body,
    pub value: u32,
    pub kind: CoinKind,
    pub description: String,
    pub collected: bool,
    collect_ticks: u32,
    collect_duration: u32,
}

impl Coin {
    /// `value` below 1 is raised to 1.
    pub fn new(x: f32, y: f32, value: u32, kind: CoinKind, tuning: &CoinTuning) -> Self {
        Self {
            body: Body::new(x, y, tuning.width, tuning.height),
            value: value.max(1),
            kind,
            description: String::from("A vote from a member of Congress"),
            collected: false,
            collect_ticks: 0,
            collect_duration: tuning.collect_ticks.max(1),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Whether the player can still pick this coin up.
    pub fn is_collectable(&self) -> bool {
        self.body.active && !self.collected
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }

    /// 0.0 right after pickup, 1.0 when the animation is done.
    pub fn collect_progress(&self) -> f32 {
        self.collect_ticks as f32 / self.collect_duration as f32
    }

    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }
        if self.collected {
            self.collect_ticks += 1;
            if self.collect_ticks >= self.collect_duration {
                self.body.active = false;
            }
        } else {
            self.body.update_sprite(dt);
        }
    }

    pub fn reset(&mut self) {
        self.body.active = true;
        self.collected = false;
        self.collect_ticks = 0;
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active {
            return;
        }
        let r = self.body.rect;
        let color = match self.kind {
            CoinKind::Special => Color::GOLD,
            CoinKind::Regular => Color::YELLOW,
        };
        let cx = r.center_x() - offset_x;
        let cy = r.center_y() - offset_y;

        if self.collected {
            let progress = self.collect_progress();
            let scale = 1.0 + progress;
            let faded = color.mix(Color::SKY, progress);
            surface.fill_ellipse(cx, cy, r.width / 2.0 * scale, r.height / 2.0 * scale, faded);
        } else if let Some(sprite) = &self.body.sprite {
            sprite.draw(surface, r.x - offset_x, r.y - offset_y, r.width, r.height, false);
        } else {
            surface.fill_ellipse(cx, cy, r.width / 2.0, r.height / 2.0, color);
        }
    }
}
