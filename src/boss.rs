//! Boss fights.
//!
//! A boss patrols like a walker, but on top of that it
//!
//! * switches to an attack when the player comes close and the attack
//!   cooldown has run out. What the attack does depends on the phase:
//!   charge (1), leap (2) or rush (3);
//! * fires at the player whenever in range and the shot cooldown allows,
//!   whether or not it is attacking;
//! * derives its phase from remaining health on every update, getting faster
//!   and more trigger-happy as it weakens.

use crate::body::Body;
use crate::bullet::Bullet;
use crate::config::{BossTuning, BulletTuning, PhysicsTuning, Tuning};
use crate::geometry::{Heading, Rect};
use crate::platform::Platform;
use crate::player::Player;
use crate::surface::{Color, Surface};

const C_PHASE_1: Color = Color::rgb(139, 0, 0);
const C_PHASE_2: Color = Color::rgb(255, 69, 0);
const C_PHASE_3: Color = Color::rgb(220, 20, 60);
const C_BOSS_BULLET: Color = Color::RED;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    One,
    Two,
    Three,
}

impl Phase {
    /// `> 0.66` is phase one, `> 0.33` phase two, anything lower phase three.
    pub fn from_health_fraction(fraction: f32) -> Phase {
        if fraction > 0.66 {
            Phase::One
        } else if fraction > 0.33 {
            Phase::Two
        } else {
            Phase::Three
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
            Phase::Three => 3,
        }
    }

    /// Base patrol speed multiplier for this phase.
    pub fn speed_multiplier(self) -> f32 {
        match self {
            Phase::One => 1.0,
            Phase::Two => 1.5,
            Phase::Three => 2.0,
        }
    }

    pub fn attack_pattern(self) -> AttackPattern {
        match self {
            Phase::One => AttackPattern::Charge,
            Phase::Two => AttackPattern::Leap,
            Phase::Three => AttackPattern::Rush,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPattern {
    /// Patrol velocity multiplied for the attack's duration.
    Charge,
    /// One upward impulse when the attack starts.
    Leap,
    /// Base speed raised to the rush multiplier for the attack's duration.
    Rush,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossState {
    Patrol,
    Attacking { pattern: AttackPattern, remaining: f32 },
}

#[derive(Debug)]
pub struct Boss {
    pub body: Body,
    pub name: String,
    pub description: String,
    pub health: i32,
    pub max_health: i32,
    pub phase: Phase,
    pub state: BossState,
    pub heading: Heading,
    pub bullets: Vec<Bullet>,
    speed: f32,
    attack_cooldown: f32,
    shoot_cooldown: f32,
    hit_flash: f32,
    start_x: f32,
    end_x: f32,
    start_y: f32,
    tuning: BossTuning,
    bullet_tuning: BulletTuning,
    physics: PhysicsTuning,
}

impl Boss {
    pub fn new(x: f32, y: f32, name: &str, description: &str, tuning: &Tuning) -> Self {
        let boss = tuning.boss;
        let mut body = Body::new(x, y, boss.width, boss.height);
        body.facing_right = false;
        Self {
            body,
            name: name.to_string(),
            description: description.to_string(),
            health: boss.health,
            max_health: boss.health,
            phase: Phase::One,
            state: BossState::Patrol,
            heading: Heading::Left,
            bullets: Vec::new(),
            speed: boss.speed,
            attack_cooldown: 0.0,
            shoot_cooldown: 0.0,
            hit_flash: 0.0,
            start_x: x,
            end_x: x + boss.patrol_distance,
            start_y: y,
            tuning: boss,
            bullet_tuning: tuning.bullet,
            physics: tuning.physics,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.state, BossState::Attacking { .. })
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }

    pub fn shoot_range(&self) -> f32 {
        self.tuning.shoot_range + self.phase.number() as f32 * self.tuning.shoot_range_step
    }

    pub fn shoot_interval(&self) -> f32 {
        self.tuning.shoot_interval - (self.phase.number() - 1) as f32 * self.tuning.shoot_interval_step
    }

    pub fn update(&mut self, dt: f32, platforms: &mut [Platform], player: &mut Player, arena: &Rect) {
        if !self.body.active {
            return;
        }

        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);

        self.think(dt, player);

        let charge = match self.state {
            BossState::Attacking { pattern: AttackPattern::Charge, .. } => self.tuning.charge_multiplier,
            _ => 1.0,
        };
        self.body.vx = self.speed * charge * self.heading.sign();

        if self.body.rect.x <= self.start_x {
            self.face(Heading::Right);
        } else if self.body.rect.x >= self.end_x {
            self.face(Heading::Left);
        }

        self.body.integrate(dt, &self.physics, platforms);

        for shot in self.bullets.iter_mut() {
            shot.update(platforms, arena);
            if shot.body.active && shot.body.rect.overlaps(&player.body.rect) {
                player.take_damage();
                shot.body.active = false;
            }
        }
        self.bullets.retain(|b| b.body.active);

        self.refresh_phase();
    }

    /// Attack and shooting decisions for this tick.
    fn think(&mut self, dt: f32, player: &Player) {
        let distance = (self.body.rect.x - player.body.rect.x).abs();

        if self.state == BossState::Patrol && self.attack_cooldown <= 0.0 && distance < self.tuning.aggro_radius {
            self.start_attack();
        }

        if let BossState::Attacking { pattern, remaining } = self.state {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.end_attack();
            } else {
                self.state = BossState::Attacking { pattern, remaining };
            }
        }

        if self.shoot_cooldown <= 0.0 && distance < self.shoot_range() {
            self.shoot_at(player);
        }
    }

    fn start_attack(&mut self) {
        let pattern = self.phase.attack_pattern();
        self.state = BossState::Attacking { pattern, remaining: self.tuning.attack_duration };
        self.attack_cooldown = self.tuning.attack_interval;
        if pattern == AttackPattern::Leap {
            self.body.vy = -self.tuning.leap_force;
        }
        self.refresh_speed();
        log::debug!("{} starts {:?} attack", self.name, pattern);
    }

    fn end_attack(&mut self) {
        self.state = BossState::Patrol;
        self.refresh_speed();
    }

    fn shoot_at(&mut self, player: &Player) {
        let heading = if player.body.rect.x < self.body.rect.x { Heading::Left } else { Heading::Right };
        self.body.facing_right = heading.is_right();

        let shot = Bullet::from_edge(&self.body.rect, heading, &self.bullet_tuning).with_color(C_BOSS_BULLET);
        self.bullets.push(shot);
        self.shoot_cooldown = self.shoot_interval();
    }

    fn face(&mut self, heading: Heading) {
        self.heading = heading;
        self.body.facing_right = heading.is_right();
    }

    /// Recompute the phase from health and the speed that goes with it.
    pub fn refresh_phase(&mut self) {
        let phase = Phase::from_health_fraction(self.health_fraction());
        if phase != self.phase {
            log::debug!("{} enters phase {}", self.name, phase.number());
            self.phase = phase;
        }
        self.refresh_speed();
    }

    fn refresh_speed(&mut self) {
        let multiplier = match self.state {
            BossState::Attacking { pattern: AttackPattern::Rush, .. } => self.tuning.rush_multiplier,
            _ => self.phase.speed_multiplier(),
        };
        self.speed = self.tuning.speed * multiplier;
    }

    pub fn take_damage(&mut self, amount: i32) {
        if !self.body.active {
            return;
        }
        self.health -= amount;
        self.hit_flash = self.tuning.hit_flash;
        if self.health <= 0 {
            self.defeat();
        } else {
            self.refresh_phase();
        }
    }

    pub fn defeat(&mut self) {
        self.health = self.health.max(0);
        self.body.active = false;
        self.bullets.clear();
        log::info!("boss {} defeated", self.name);
    }

    pub fn reset(&mut self) {
        self.body.active = true;
        self.body.set_position(self.start_x, self.start_y);
        self.body.stop();
        self.health = self.max_health;
        self.state = BossState::Patrol;
        self.face(Heading::Left);
        self.bullets.clear();
        self.attack_cooldown = 0.0;
        self.shoot_cooldown = 0.0;
        self.hit_flash = 0.0;
        self.phase = Phase::One;
        self.refresh_speed();
    }

    pub fn draw(&self, surface: &mut dyn Surface, offset_x: f32, offset_y: f32) {
        if !self.body.active {
            return;
        }
        let r = self.body.rect;
        let x = r.x - offset_x;
        let y = r.y - offset_y;

        let color = if self.is_flashing() {
            Color::RED
        } else {
            match self.phase {
                Phase::One => C_PHASE_1,
                Phase::Two => C_PHASE_2,
                Phase::Three => C_PHASE_3,
            }
        };

        // Torso and head
        surface.fill_rect(x, y, r.width, r.height, color);
        let head = r.width * 0.6;
        let head_x = x + (r.width - head) / 2.0;
        let head_y = y - head * 0.8;
        surface.fill_rect(head_x, head_y, head, head, color);
        surface.fill_rect(head_x + head * 0.25, head_y + head * 0.3, 6.0, 6.0, Color::BLACK);
        surface.fill_rect(head_x + head * 0.75 - 6.0, head_y + head * 0.3, 6.0, 6.0, Color::BLACK);
        surface.fill_rect(head_x + head * 0.25, head_y + head * 0.6, head * 0.5, head * 0.1, Color::BLACK);

        // Limbs
        let arm_w = r.width * 0.2;
        let arm_y = y + r.height * 0.1;
        surface.fill_rect(x - arm_w, arm_y, arm_w, r.height * 0.6, color);
        surface.fill_rect(x + r.width, arm_y, arm_w, r.height * 0.6, color);
        let leg_w = r.width * 0.3;
        surface.fill_rect(x + r.width * 0.15, y + r.height, leg_w, r.height * 0.4, color);
        surface.fill_rect(x + r.width * 0.85 - leg_w, y + r.height, leg_w, r.height * 0.4, color);

        self.draw_health_bar(surface, x, y - 20.0);
        surface.text(x + r.width / 2.0, y - 30.0, &self.name, Color::WHITE);

        for shot in &self.bullets {
            shot.draw(surface, offset_x, offset_y);
        }
    }

    fn draw_health_bar(&self, surface: &mut dyn Surface, x: f32, y: f32) {
        let width = self.body.rect.width;
        let fraction = self.health_fraction().max(0.0);
        let fill = if fraction > 0.5 {
            Color::rgb(0, 255, 0)
        } else if fraction > 0.25 {
            Color::YELLOW
        } else {
            Color::RED
        };
        surface.fill_rect(x, y, width, 8.0, Color::rgb(51, 51, 51));
        surface.fill_rect(x, y, width * fraction, 8.0, fill);
        surface.stroke_rect(x, y, width, 8.0, Color::WHITE);
    }
}
