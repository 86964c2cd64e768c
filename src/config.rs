//! Gameplay tuning: every speed, size and duration in one immutable tree.
//!
//! Physics values (gravity, friction, speeds) are per-tick quantities and
//! assume the simulation runs at [`TICK_RATE_HZ`]. Durations are seconds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical simulation rate. Gravity and velocities are applied once per tick.
pub const TICK_RATE_HZ: u32 = 60;

/// Length of one logical tick in seconds.
pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE_HZ as f32;

/// Upper bound on ticks run for a single (possibly stalled) frame.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub view: ViewTuning,
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub coin: CoinTuning,
    pub platform: PlatformTuning,
    pub level: LevelTuning,
    pub camera: CameraTuning,
}

impl Tuning {
    pub fn from_ron_str(s: &str) -> Result<Tuning, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Tuning, ConfigError> {
        let text = fs::read_to_string(path)?;
        Tuning::from_ron_str(&text)
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Added to `vy` every tick.
    pub gravity: f32,
    /// Multiplies `vx` every tick.
    pub friction: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self { gravity: 0.5, friction: 0.8 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub max_speed: f32,
    pub jump_force: f32,
    pub max_jumps: u32,
    pub lives: u32,
    pub invulnerability: f32,
    pub shoot_interval: f32,
    /// Fraction of `jump_force` applied after stomping an enemy.
    pub stomp_bounce: f32,
    /// Distance below the level before a fall counts as lost.
    pub fall_margin: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 48.0,
            speed: 5.0,
            max_speed: 8.0,
            jump_force: 12.0,
            max_jumps: 1,
            lives: 3,
            invulnerability: 2.0,
            shoot_interval: 0.3,
            stomp_bounce: 0.7,
            fall_margin: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub damage: i32,
    pub max_distance: f32,
    /// Slack around the level bounds before a stray bullet is dropped.
    pub bounds_margin: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 4.0,
            speed: 10.0,
            damage: 1,
            max_distance: 600.0,
            bounds_margin: 50.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub patrol_distance: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self { width: 32.0, height: 32.0, speed: 2.0, patrol_distance: 200.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
    pub patrol_distance: f32,
    pub aggro_radius: f32,
    pub attack_interval: f32,
    pub attack_duration: f32,
    pub charge_multiplier: f32,
    pub leap_force: f32,
    pub rush_multiplier: f32,
    pub hit_flash: f32,
    pub shoot_interval: f32,
    /// Removed from `shoot_interval` for each phase past the first.
    pub shoot_interval_step: f32,
    pub shoot_range: f32,
    /// Added to `shoot_range` per phase.
    pub shoot_range_step: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            speed: 2.0,
            health: 10,
            patrol_distance: 300.0,
            aggro_radius: 200.0,
            attack_interval: 2.0,
            attack_duration: 0.5,
            charge_multiplier: 3.0,
            leap_force: 12.0,
            rush_multiplier: 3.0,
            hit_flash: 0.2,
            shoot_interval: 1.5,
            shoot_interval_step: 0.3,
            shoot_range: 300.0,
            shoot_range_step: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinTuning {
    pub width: f32,
    pub height: f32,
    pub value: u32,
    /// Length of the shrink/fade after pickup, in ticks.
    pub collect_ticks: u32,
}

impl Default for CoinTuning {
    fn default() -> Self {
        Self { width: 24.0, height: 24.0, value: 1, collect_ticks: 20 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    pub move_speed: f32,
    pub move_distance: f32,
    pub crumble_duration: f32,
    pub reset_duration: f32,
    pub bounce_force: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            move_distance: 100.0,
            crumble_duration: 1.0,
            reset_duration: 3.0,
            bounce_force: 18.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub start_x: f32,
    pub start_y: f32,
    /// Half-size of the box around an educational marker that triggers it.
    pub marker_radius: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self { start_x: 100.0, start_y: 300.0, marker_radius: 50.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub smoothing: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self { smoothing: 0.1 }
    }
}
