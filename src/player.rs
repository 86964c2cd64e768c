//! The player: movement, jumping, shooting and bookkeeping of lives and
//! votes. Pickups, stomps and enemy contact are resolved here; hazards and
//! bosses are resolved by the level.

use crate::body::{Body, Contact};
use crate::bullet::{self, Bullet};
use crate::coin::Coin;
use crate::config::{BulletTuning, PhysicsTuning, PlayerTuning, Tuning};
use crate::enemy::Enemy;
use crate::geometry::{Heading, Rect};
use crate::input::{Action, Input};
use crate::level::Level;
use crate::platform::Platform;
use crate::surface::{Color, Surface};

const C_PLAYER: Color = Color::rgb(65, 105, 225);

#[derive(Debug)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    /// Votes collected.
    pub score: u32,
    pub bullets: Vec<Bullet>,
    pub can_shoot: bool,
    pub jump_count: u32,
    pub max_jumps: u32,
    invulnerable: bool,
    invulnerability_timer: f32,
    shoot_cooldown: f32,
    jump_latch: bool,
    spawn_x: f32,
    spawn_y: f32,
    arena: Rect,
    tuning: PlayerTuning,
    bullet_tuning: BulletTuning,
    physics: PhysicsTuning,
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &Tuning) -> Self {
        let player = tuning.player;
        Self {
            body: Body::new(x, y, player.width, player.height),
            lives: player.lives,
            score: 0,
            bullets: Vec::new(),
            can_shoot: false,
            jump_count: 0,
            max_jumps: player.max_jumps,
            invulnerable: false,
            invulnerability_timer: 0.0,
            shoot_cooldown: 0.0,
            jump_latch: false,
            spawn_x: x,
            spawn_y: y,
            arena: Rect::new(0.0, 0.0, tuning.view.width, tuning.view.height),
            tuning: player,
            bullet_tuning: tuning.bullet,
            physics: tuning.physics,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    pub fn spawn_point(&self) -> (f32, f32) {
        (self.spawn_x, self.spawn_y)
    }

    pub fn set_can_shoot(&mut self, can_shoot: bool) {
        self.can_shoot = can_shoot;
    }

    /// Move to the level's start, take over its bounds and shooting rule,
    /// and drop any bullets still in flight.
    pub fn enter_level(&mut self, level: &Level) {
        self.spawn_x = level.start_x;
        self.spawn_y = level.start_y;
        self.arena = level.bounds();
        self.can_shoot = level.is_boss_level;
        self.bullets.clear();
        self.respawn();
    }

    pub fn handle_input(&mut self, input: &dyn Input) {
        if !self.body.active {
            return;
        }

        if input.is_pressed(Action::Left) {
            self.body.vx = -self.tuning.speed;
            self.body.facing_right = false;
            if self.body.on_ground {
                self.body.set_animation("run");
            }
        } else if input.is_pressed(Action::Right) {
            self.body.vx = self.tuning.speed;
            self.body.facing_right = true;
            if self.body.on_ground {
                self.body.set_animation("run");
            }
        } else if self.body.on_ground {
            self.body.set_animation("idle");
        }

        // Edge-triggered: the key has to be released before the next jump.
        let jump = input.is_pressed(Action::Jump);
        if jump && !self.jump_latch && self.jump_count < self.max_jumps {
            self.body.vy = -self.tuning.jump_force;
            self.body.on_ground = false;
            self.jump_count += 1;
            self.body.set_animation("jump");
        }
        self.jump_latch = jump;

        if input.is_pressed(Action::Shoot) && self.can_shoot && self.shoot_cooldown <= 0.0 {
            self.shoot();
        }
    }

    pub fn shoot(&mut self) {
        let heading = Heading::from_facing(self.body.facing_right);
        self.bullets.push(Bullet::from_edge(&self.body.rect, heading, &self.bullet_tuning));
        self.shoot_cooldown = self.tuning.shoot_interval;
    }

    pub fn update(&mut self, dt: f32, platforms: &mut [Platform], coins: &mut [Coin], enemies: &mut [Enemy]) {
        if !self.body.active {
            return;
        }

        let contacts = self.body.integrate(dt, &self.physics, platforms);
        let max = self.tuning.max_speed;
        self.body.vx = self.body.vx.clamp(-max, max);

        // A bouncy landing leaves the body airborne but still refunds jumps.
        if self.body.on_ground || contacts.contains(&Contact::Top) {
            self.jump_count = 0;
        }

        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerability_timer = 0.0;
            }
        }
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);

        let bullet_arena = self.arena.inflate(self.bullet_tuning.bounds_margin);
        bullet::update_all(&mut self.bullets, platforms, &bullet_arena);

        self.collect_coins(coins);
        if !self.invulnerable {
            self.check_enemies(enemies);
        }

        if self.body.rect.y > self.arena.bottom() + self.tuning.fall_margin {
            log::debug!("player fell out of the level");
            self.take_damage();
            self.respawn();
        }
    }

    fn collect_coins(&mut self, coins: &mut [Coin]) {
        for coin in coins.iter_mut() {
            if coin.is_collectable() && self.body.rect.overlaps(&coin.body.rect) {
                self.score += coin.value;
                coin.collect();
                log::trace!("collected {} vote(s), score {}", coin.value, self.score);
            }
        }
    }

    fn check_enemies(&mut self, enemies: &mut [Enemy]) {
        for enemy in enemies.iter_mut() {
            if !enemy.body.active || !self.body.rect.overlaps(&enemy.body.rect) {
                continue;
            }
            // Stomp: falling, and last tick our feet were above its head.
            let was_above = self.body.rect.bottom() - self.body.vy <= enemy.body.rect.y;
            if self.body.vy > 0.0 && was_above {
                enemy.defeat();
                self.body.vy = -self.tuning.jump_force * self.tuning.stomp_bounce;
            } else {
                self.take_damage();
            }
        }
    }

    /// Lose one life, unless invulnerable.
    pub fn take_damage(&mut self) {
        self.take_hit(1);
    }

    /// Lose `amount` lives, unless invulnerable, and start the
    /// invulnerability window.
    pub fn take_hit(&mut self, amount: u32) {
        if self.invulnerable {
            return;
        }
        self.lives = self.lives.saturating_sub(amount);
        self.invulnerable = true;
        self.invulnerability_timer = self.tuning.invulnerability;
        log::debug!("player hit, {} lives left", self.lives);
    }

    /// Back to the spawn point, at rest.
    pub fn respawn(&mut self) {
        self.body.set_position(self.spawn_x, self.spawn_y);
        self.body.stop();
        self.jump_count = 0;
    }

    /// Full reset for a new game.
    pub fn reset(&mut self) {
        self.lives = self.tuning.lives;
        self.score = 0;
        self.invulnerable = false;
        self.invulnerability_timer = 0.0;
        self.shoot_cooldown = 0.0;
        self.bullets.clear();
        self.body.active = true;
        self.respawn();
    }

    /// Hidden on alternating 100ms slices of the invulnerability window.
    pub fn is_flicker_hidden(&self) -> bool {
        self.invulnerable && ((self.invulnerability_timer * 10.0).floor() as i64) % 2 == 0
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active || self.is_flicker_hidden() {
            return;
        }
        self.body.draw(surface, offset_x, offset_y, C_PLAYER);
        for shot in &self.bullets {
            shot.draw(surface, offset_x, offset_y);
        }
    }
}
