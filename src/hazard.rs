//! Static damage zones: holes, spikes and lava.

use crate::body::Body;
use crate::player::Player;
use crate::surface::{Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    /// Damages and sends the player back to the spawn point.
    Hole,
    Spike,
    Lava,
}

#[derive(Debug)]
pub struct Hazard {
    pub body: Body,
    pub kind: HazardKind,
    /// Lives taken per hit.
    pub damage: u32,
    pub name: String,
    animation_timer: f32,
}

impl Hazard {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: HazardKind) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            kind,
            damage: 1,
            name: String::from("Hazard"),
            animation_timer: 0.0,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Hazards never move; only the lava shimmer advances.
    pub fn update(&mut self, dt: f32) {
        self.animation_timer += dt;
    }

    pub fn touches(&self, player: &Player) -> bool {
        self.body.active && self.body.rect.overlaps(&player.body.rect)
    }

    pub fn apply(&self, player: &mut Player) {
        player.take_hit(self.damage);
        if self.kind == HazardKind::Hole {
            log::debug!("player fell into {}", self.name);
            player.respawn();
        }
    }

    pub fn reset(&mut self) {
        self.body.active = true;
        self.animation_timer = 0.0;
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active {
            return;
        }
        let r = self.body.rect;
        let x = r.x - offset_x;
        let y = r.y - offset_y;

        match self.kind {
            HazardKind::Hole => {
                surface.fill_rect(x, y, r.width, r.height, Color::BLACK);
                surface.fill_rect(x + r.width / 4.0, y, r.width / 2.0, r.height / 2.0, Color::rgb(51, 51, 51));
                surface.stroke_rect(x, y, r.width, r.height, Color::YELLOW);
            }
            HazardKind::Spike => {
                let count = (r.width / 10.0).floor().max(1.0);
                let spike_width = r.width / count;
                for i in 0..count as usize {
                    let sx = x + i as f32 * spike_width;
                    // Stepped triangle: full-height tip over a wider half-height base.
                    surface.fill_rect(sx, y + r.height / 2.0, spike_width, r.height / 2.0, Color::rgb(102, 102, 102));
                    surface.fill_rect(sx + spike_width / 3.0, y, spike_width / 3.0, r.height, Color::rgb(102, 102, 102));
                }
            }
            HazardKind::Lava => {
                let t = self.animation_timer * 1000.0;
                let wave = (t * 0.005).sin() * 5.0;
                surface.fill_rect(x, y + wave, r.width, r.height - wave, Color::rgb(255, 69, 0));
                for i in 0..5 {
                    let phase = i as f32;
                    let bx = x + phase * r.width / 5.0 + (t * 0.003 + phase).sin() * 10.0;
                    let by = y + r.height / 2.0 + (t * 0.004 + phase).cos() * 5.0;
                    let size = 3.0 + (t * 0.006 + phase).sin() * 2.0;
                    surface.fill_ellipse(bx, by, size, size, Color::rgb(255, 99, 71));
                }
            }
        }
    }
}
