//! The physics body every movable thing is built from.
//!
//! A `Body` integrates gravity and friction once per tick and then resolves
//! overlaps against the active platforms. Resolution is discrete: a body
//! moving faster than a platform is thick can pass straight through it.

use crate::config::PhysicsTuning;
use crate::geometry::Rect;
use crate::platform::Platform;
use crate::sprite::Sprite;
use crate::surface::{Color, Surface};

#[derive(Debug)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    /// Inactive bodies are skipped by update, collision and draw but stay
    /// in their owning collection.
    pub active: bool,
    pub facing_right: bool,
    pub sprite: Option<Box<dyn Sprite>>,
}

/// Which face of a platform a body was pushed out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Top,
    Bottom,
    Left,
    Right,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            active: true,
            facing_right: true,
            sprite: None,
        }
    }

    pub fn with_sprite(mut self, sprite: Box<dyn Sprite>) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn x(&self) -> f32 {
        self.rect.x
    }

    pub fn y(&self) -> f32 {
        self.rect.y
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// One physics tick: gravity, friction, move, resolve, then the sprite
    /// clock. Velocities are per tick, `dt` only feeds the sprite.
    pub fn integrate(&mut self, dt: f32, physics: &PhysicsTuning, platforms: &mut [Platform]) -> Vec<Contact> {
        self.vy += physics.gravity;
        self.vx *= physics.friction;

        self.rect.x += self.vx;
        self.rect.y += self.vy;

        let contacts = self.resolve_platforms(platforms);
        self.update_sprite(dt);
        contacts
    }

    /// Push the body out of every active platform it overlaps, along the
    /// axis of least penetration, and only when moving into that face.
    /// Landing on a top face runs the platform's landing hook.
    pub fn resolve_platforms(&mut self, platforms: &mut [Platform]) -> Vec<Contact> {
        self.on_ground = false;
        let mut contacts = Vec::new();

        for platform in platforms.iter_mut() {
            if !platform.body.active || !self.rect.overlaps(&platform.body.rect) {
                continue;
            }
            let p = platform.body.rect;

            let from_left = self.rect.right() - p.x;
            let from_right = p.right() - self.rect.x;
            let from_top = self.rect.bottom() - p.y;
            let from_bottom = p.bottom() - self.rect.y;
            let min = from_left.min(from_right).min(from_top).min(from_bottom);

            if min == from_top && self.vy > 0.0 {
                let impact = self.vy;
                self.rect.y = p.y - self.rect.height;
                self.vy = 0.0;
                self.on_ground = true;
                contacts.push(Contact::Top);
                platform.on_landed(self, impact);
            } else if min == from_bottom && self.vy < 0.0 {
                self.rect.y = p.bottom();
                self.vy = 0.0;
                contacts.push(Contact::Bottom);
            } else if min == from_left && self.vx > 0.0 {
                self.rect.x = p.x - self.rect.width;
                self.vx = 0.0;
                contacts.push(Contact::Left);
            } else if min == from_right && self.vx < 0.0 {
                self.rect.x = p.right();
                self.vx = 0.0;
                contacts.push(Contact::Right);
            }
        }

        contacts
    }

    pub fn update_sprite(&mut self, dt: f32) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.update(dt);
        }
    }

    pub fn set_animation(&mut self, name: &str) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.set_animation(name);
        }
    }

    /// Draw through the sprite, or as a flat `placeholder` box without one.
    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32, placeholder: Color) {
        if !self.active {
            return;
        }
        let x = self.rect.x - offset_x;
        let y = self.rect.y - offset_y;
        match &self.sprite {
            Some(sprite) => sprite.draw(surface, x, y, self.rect.width, self.rect.height, !self.facing_right),
            None => surface.fill_rect(x, y, self.rect.width, self.rect.height, placeholder),
        }
    }
}
