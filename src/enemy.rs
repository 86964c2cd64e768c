//! Patrolling opponents. Walkers pace under gravity, flyers bob through the
//! air ignoring platforms, stationary ones just stand there.

use crate::body::Body;
use crate::config::{PhysicsTuning, Tuning};
use crate::geometry::Heading;
use crate::platform::Platform;
use crate::surface::{Color, Surface};

const C_ENEMY: Color = Color::rgb(139, 69, 19);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    Walker,
    /// Oscillates between its spawn height and `fly_height` above it.
    Flyer { fly_height: f32, flying_up: bool },
    Stationary,
}

#[derive(Debug)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub name: String,
    pub description: String,
    pub speed: f32,
    pub heading: Heading,
    start_x: f32,
    end_x: f32,
    start_y: f32,
    physics: PhysicsTuning,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind, tuning: &Tuning) -> Self {
        let mut body = Body::new(x, y, tuning.enemy.width, tuning.enemy.height);
        body.facing_right = false;
        Self {
            body,
            kind,
            name: String::from("Obstacle"),
            description: String::from("An obstacle to avoid"),
            speed: tuning.enemy.speed,
            heading: Heading::Left,
            start_x: x,
            end_x: x + tuning.enemy.patrol_distance,
            start_y: y,
            physics: tuning.physics,
        }
    }

    pub fn walker(x: f32, y: f32, tuning: &Tuning) -> Self {
        Enemy::new(x, y, EnemyKind::Walker, tuning)
    }

    pub fn flyer(x: f32, y: f32, fly_height: f32, tuning: &Tuning) -> Self {
        Enemy::new(x, y, EnemyKind::Flyer { fly_height, flying_up: true }, tuning)
    }

    pub fn stationary(x: f32, y: f32, tuning: &Tuning) -> Self {
        Enemy::new(x, y, EnemyKind::Stationary, tuning)
    }

    pub fn with_name(mut self, name: &str, description: &str) -> Self {
        self.name = name.to_string();
        self.description = description.to_string();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_patrol_distance(mut self, distance: f32) -> Self {
        self.end_x = self.start_x + distance;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.body.rect.width = width;
        self.body.rect.height = height;
        self
    }

    pub fn patrol_bounds(&self) -> (f32, f32) {
        (self.start_x, self.end_x)
    }

    pub fn update(&mut self, dt: f32, platforms: &mut [Platform]) {
        if !self.body.active {
            return;
        }

        match self.kind {
            EnemyKind::Stationary => self.body.update_sprite(dt),
            EnemyKind::Walker => {
                self.body.vx = self.speed * self.heading.sign();
                let turned = self.turn_at_bounds();

                self.body.integrate(dt, &self.physics, platforms);

                // A wall zeroed our velocity. Skip if the bound already turned us
                // this tick, or we would flip straight back into the wall.
                if self.body.vx == 0.0 && !turned {
                    self.face(self.heading.reversed());
                }
            }
            EnemyKind::Flyer { fly_height, flying_up } => {
                self.body.vx = self.speed * self.heading.sign();

                let up = if flying_up {
                    self.body.vy = -self.speed * 0.5;
                    self.body.rect.y > self.start_y - fly_height
                } else {
                    self.body.vy = self.speed * 0.5;
                    self.body.rect.y >= self.start_y
                };
                self.kind = EnemyKind::Flyer { fly_height, flying_up: up };

                self.turn_at_bounds();

                self.body.rect.x += self.body.vx;
                self.body.rect.y += self.body.vy;
                self.body.update_sprite(dt);
            }
        }
    }

    /// Face inward at the patrol ends. Returns whether the heading changed.
    fn turn_at_bounds(&mut self) -> bool {
        let before = self.heading;
        if self.body.rect.x <= self.start_x {
            self.face(Heading::Right);
        } else if self.body.rect.x >= self.end_x {
            self.face(Heading::Left);
        }
        self.heading != before
    }

    fn face(&mut self, heading: Heading) {
        self.heading = heading;
        self.body.facing_right = heading.is_right();
    }

    pub fn defeat(&mut self) {
        self.body.active = false;
        log::debug!("enemy {} defeated", self.name);
    }

    pub fn reset(&mut self) {
        self.body.active = true;
        self.body.set_position(self.start_x, self.start_y);
        self.body.stop();
        self.face(Heading::Left);
        if let EnemyKind::Flyer { fly_height, .. } = self.kind {
            self.kind = EnemyKind::Flyer { fly_height, flying_up: true };
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        self.body.draw(surface, offset_x, offset_y, C_ENEMY);
    }
}
