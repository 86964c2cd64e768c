//! Straight-line projectiles fired by the player and by bosses.

use crate::body::Body;
use crate::config::BulletTuning;
use crate::geometry::{Heading, Rect};
use crate::platform::Platform;
use crate::surface::{Color, Surface};

#[derive(Debug)]
pub struct Bullet {
    pub body: Body,
    pub heading: Heading,
    pub damage: i32,
    /// x at spawn, for the range cutoff.
    pub origin_x: f32,
    pub max_distance: f32,
    pub color: Color,
}

impl Bullet {
    pub fn new(x: f32, y: f32, heading: Heading, tuning: &BulletTuning) -> Self {
        let mut body = Body::new(x, y, tuning.width, tuning.height);
        body.vx = tuning.speed * heading.sign();
        body.facing_right = heading.is_right();
        Self {
            body,
            heading,
            damage: tuning.damage,
            origin_x: x,
            max_distance: tuning.max_distance,
            color: Color::GOLD,
        }
    }

    /// Spawn just outside the facing edge of `shooter`, vertically centred.
    pub fn from_edge(shooter: &Rect, heading: Heading, tuning: &BulletTuning) -> Self {
        let x = match heading {
            Heading::Right => shooter.right(),
            Heading::Left => shooter.x - tuning.width,
        };
        let y = shooter.center_y() - tuning.height / 2.0;
        Bullet::new(x, y, heading, tuning)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn traveled(&self) -> f32 {
        (self.body.rect.x - self.origin_x).abs()
    }

    /// Move one tick. The bullet goes inactive once it is out of range, has
    /// left `arena`, or touches an active platform. Bullets ignore gravity.
    pub fn update(&mut self, platforms: &[Platform], arena: &Rect) {
        if !self.body.active {
            return;
        }
        self.body.rect.x += self.body.vx;
        self.body.rect.y += self.body.vy;

        if self.traveled() > self.max_distance || !self.body.rect.overlaps(arena) {
            self.body.active = false;
            return;
        }

        if platforms
            .iter()
            .any(|p| p.body.active && p.body.rect.overlaps(&self.body.rect))
        {
            self.body.active = false;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active {
            return;
        }
        let r = self.body.rect;
        surface.fill_ellipse(
            r.center_x() - offset_x,
            r.center_y() - offset_y,
            r.width / 2.0,
            r.height / 2.0,
            self.color,
        );
    }
}

/// Advance every bullet and drop the ones that went inactive.
pub fn update_all(bullets: &mut Vec<Bullet>, platforms: &[Platform], arena: &Rect) {
    for bullet in bullets.iter_mut() {
        bullet.update(platforms, arena);
    }
    bullets.retain(|b| b.body.active);
}
