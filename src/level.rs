//! A stage: everything in it, the per-tick update schedule, and the
//! completion rule.
//!
//! The player is not owned by the level. The session updates the player
//! against the level's platforms, coins and enemies first, then calls
//! [`Level::update`], which runs in a fixed order:
//!
//! 1. platforms
//! 2. coins
//! 3. enemies
//! 4. hazards, each applied to the player on contact
//! 5. bosses, then player bullets against each boss and boss contact
//! 6. educational markers near the player
//! 7. the completion check

use crate::boss::Boss;
use crate::coin::Coin;
use crate::config::Tuning;
use crate::enemy::Enemy;
use crate::geometry::Rect;
use crate::hazard::Hazard;
use crate::platform::Platform;
use crate::player::Player;
use crate::surface::{Color, Surface};

const C_FLAG_POLE: Color = Color::GREEN;
const C_CHECKPOINT: Color = Color::rgb(70, 130, 180);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelKind {
    House,
    Senate,
    Committee,
    Final,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EducationalMarker {
    pub x: f32,
    pub y: f32,
    pub title: String,
    pub content: String,
    pub triggered: bool,
}

#[derive(Debug)]
pub struct Level {
    pub kind: LevelKind,
    pub name: String,
    pub description: String,
    pub width: f32,
    pub height: f32,

    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
    pub bosses: Vec<Boss>,
    pub checkpoints: Vec<Checkpoint>,
    pub markers: Vec<EducationalMarker>,

    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub required_votes: u32,
    pub completed: bool,
    pub is_boss_level: bool,

    marker_radius: f32,
    bullet_margin: f32,
    pending: Vec<EducationalMarker>,
}

impl Level {
    /// An empty level the size of the viewport. The end line defaults to
    /// 100px before the right edge.
    pub fn new(kind: LevelKind, name: &str, description: &str, width: f32, tuning: &Tuning) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            width,
            height: tuning.view.height,
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            hazards: Vec::new(),
            bosses: Vec::new(),
            checkpoints: Vec::new(),
            markers: Vec::new(),
            start_x: tuning.level.start_x,
            start_y: tuning.level.start_y,
            end_x: width - 100.0,
            required_votes: 0,
            completed: false,
            is_boss_level: false,
            marker_radius: tuning.level.marker_radius,
            bullet_margin: tuning.bullet.bounds_margin,
            pending: Vec::new(),
        }
    }

    // ── Construction ────────────────────────────────────────────────────────

    pub fn add_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    pub fn add_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_hazard(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    pub fn add_boss(&mut self, boss: Boss) {
        self.bosses.push(boss);
    }

    pub fn add_checkpoint(&mut self, x: f32, y: f32) {
        self.checkpoints.push(Checkpoint { x, y });
    }

    pub fn add_educational_point(&mut self, x: f32, y: f32, title: &str, content: &str) {
        self.markers.push(EducationalMarker {
            x,
            y,
            title: title.to_string(),
            content: content.to_string(),
            triggered: false,
        });
    }

    pub fn set_required_votes(&mut self, votes: u32) {
        self.required_votes = votes;
    }

    pub fn set_start(&mut self, x: f32, y: f32) {
        self.start_x = x;
        self.start_y = y;
    }

    pub fn set_end_x(&mut self, end_x: f32) {
        self.end_x = end_x;
    }

    pub fn set_boss_level(&mut self, is_boss_level: bool) {
        self.is_boss_level = is_boss_level;
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn bosses_defeated(&self) -> bool {
        self.bosses.iter().all(|b| !b.body.active)
    }

    /// The checkpoint closest to `(x, y)`, or the level start if there are none.
    pub fn nearest_checkpoint(&self, x: f32, y: f32) -> Checkpoint {
        let distance = |c: &Checkpoint| (c.x - x).powi(2) + (c.y - y).powi(2);
        self.checkpoints
            .iter()
            .copied()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .unwrap_or(Checkpoint { x: self.start_x, y: self.start_y })
    }

    /// Markers triggered since the last call, oldest first.
    pub fn take_triggered(&mut self) -> Vec<EducationalMarker> {
        std::mem::take(&mut self.pending)
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, dt: f32, player: &mut Player) {
        for platform in self.platforms.iter_mut() {
            platform.update(dt);
        }

        for coin in self.coins.iter_mut() {
            coin.update(dt);
        }

        for enemy in self.enemies.iter_mut() {
            enemy.update(dt, &mut self.platforms);
        }

        for hazard in self.hazards.iter_mut() {
            hazard.update(dt);
            if hazard.touches(player) {
                hazard.apply(player);
            }
        }

        let arena = self.bounds().inflate(self.bullet_margin);
        for boss in self.bosses.iter_mut() {
            boss.update(dt, &mut self.platforms, player, &arena);

            for shot in player.bullets.iter_mut() {
                if boss.body.active && shot.body.active && shot.body.rect.overlaps(&boss.body.rect) {
                    boss.take_damage(shot.damage);
                    shot.body.active = false;
                }
            }
            player.bullets.retain(|b| b.body.active);

            if boss.body.active && !player.is_invulnerable() && boss.body.rect.overlaps(&player.body.rect) {
                player.take_damage();
            }
        }

        self.check_markers(player);

        if player.body.rect.x >= self.end_x && (!self.is_boss_level || self.bosses_defeated()) {
            if !self.completed {
                log::info!("{}: end reached with {} votes", self.name, player.score);
            }
            self.completed = true;
        }
    }

    fn check_markers(&mut self, player: &Player) {
        let (px, py) = (player.body.rect.x, player.body.rect.y);
        let radius = self.marker_radius;
        for marker in self.markers.iter_mut() {
            if marker.triggered || (px - marker.x).abs() > radius || (py - marker.y).abs() > radius {
                continue;
            }
            marker.triggered = true;
            log::info!("educational point: {}: {}", marker.title, marker.content);
            self.pending.push(marker.clone());
        }
    }

    /// Put every entity back the way it was built. Nothing is reallocated.
    pub fn reset(&mut self) {
        self.completed = false;
        self.pending.clear();

        for platform in self.platforms.iter_mut() {
            platform.reset();
        }
        for coin in self.coins.iter_mut() {
            coin.reset();
        }
        for enemy in self.enemies.iter_mut() {
            enemy.reset();
        }
        for hazard in self.hazards.iter_mut() {
            hazard.reset();
        }
        for boss in self.bosses.iter_mut() {
            boss.reset();
        }
        for marker in self.markers.iter_mut() {
            marker.triggered = false;
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32, view: &Rect) {
        surface.fill_rect(0.0, 0.0, view.width, view.height, Color::SKY);

        for checkpoint in &self.checkpoints {
            let x = checkpoint.x - offset_x;
            let y = checkpoint.y - offset_y;
            surface.fill_rect(x, y, 6.0, 200.0, C_CHECKPOINT);
            surface.fill_rect(x + 6.0, y, 24.0, 16.0, Color::WHITE);
        }

        for platform in &self.platforms {
            platform.draw(surface, offset_x, offset_y);
        }
        for coin in &self.coins {
            coin.draw(surface, offset_x, offset_y);
        }
        for enemy in &self.enemies {
            enemy.draw(surface, offset_x, offset_y);
        }
        for hazard in &self.hazards {
            hazard.draw(surface, offset_x, offset_y);
        }
        for boss in &self.bosses {
            boss.draw(surface, offset_x, offset_y);
        }

        // End flag
        surface.fill_rect(self.end_x - offset_x, 100.0 - offset_y, 20.0, 300.0, C_FLAG_POLE);
        surface.fill_rect(self.end_x - offset_x + 20.0, 100.0 - offset_y, 30.0, 50.0, Color::WHITE);
    }
}
