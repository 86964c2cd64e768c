//! Simulation core for a side-scrolling platformer about passing a bill.
//!
//! Everything in the library is pure game state plus per-tick update
//! functions. Drawing goes through the [`surface::Surface`] trait and input
//! through [`input::Input`], so the terminal front end in `main.rs` is just
//! one possible driver.

pub mod body;
pub mod boss;
pub mod bullet;
pub mod camera;
pub mod coin;
pub mod config;
pub mod enemy;
pub mod error;
pub mod game;
pub mod geometry;
pub mod hazard;
pub mod input;
pub mod level;
pub mod levels;
pub mod platform;
pub mod player;
pub mod sprite;
pub mod surface;
