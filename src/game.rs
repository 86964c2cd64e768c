//! A play session: the level order, the fixed-rate clock and the
//! win/lose bookkeeping around the levels.

use crate::camera::Camera;
use crate::config::{Tuning, MAX_TICKS_PER_FRAME, TICK_SECONDS};
use crate::input::Input;
use crate::level::{EducationalMarker, Level};
use crate::levels;
use crate::player::Player;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    LevelComplete,
    GameOver,
    GameComplete,
}

/// Turns variable frame times into whole simulation ticks.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Bank `dt` seconds and return how many ticks are due. At most
    /// `MAX_TICKS_PER_FRAME` run per call; a longer stall is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= TICK_SECONDS && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_SECONDS;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(TICK_SECONDS);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[derive(Debug)]
pub struct Game {
    pub tuning: Tuning,
    pub levels: Vec<Level>,
    pub player: Player,
    pub camera: Camera,
    current: usize,
    status: GameStatus,
    clock: FixedStep,
    score_at_entry: u32,
}

impl Game {
    /// A session over the full campaign.
    pub fn new(tuning: Tuning) -> Self {
        let levels = levels::campaign(&tuning);
        Game::with_levels(tuning, levels)
    }

    /// A session over `levels`, starting on the first one.
    pub fn with_levels(tuning: Tuning, levels: Vec<Level>) -> Self {
        let player = Player::new(tuning.level.start_x, tuning.level.start_y, &tuning);
        let camera = Camera::new(tuning.view.width, tuning.view.height, &tuning.camera);
        let mut game = Self {
            tuning,
            levels,
            player,
            camera,
            current: 0,
            status: GameStatus::Playing,
            clock: FixedStep::default(),
            score_at_entry: 0,
        };
        game.start_level(0);
        game
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.current)
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.levels.get_mut(self.current)
    }

    /// Educational markers the player walked past since the last call.
    pub fn take_notices(&mut self) -> Vec<EducationalMarker> {
        self.level_mut().map(Level::take_triggered).unwrap_or_default()
    }

    /// Begin level `index` from a clean state. Returns false when there is
    /// no such level.
    pub fn start_level(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get_mut(index) else {
            log::warn!("no level {}", index);
            return false;
        };
        level.reset();
        self.player.enter_level(level);
        self.camera.set_level_dimensions(level.width, level.height);
        self.camera.reset();
        log::info!("starting {} ({} votes needed)", level.name, level.required_votes);

        self.current = index;
        self.score_at_entry = self.player.score;
        self.status = GameStatus::Playing;
        self.clock.reset();
        true
    }

    /// Advance by a wall-clock frame delta. Returns the number of ticks run.
    pub fn step(&mut self, dt: f32, input: &dyn Input) -> u32 {
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.tick(input);
        }
        ticks
    }

    /// One fixed-rate simulation tick.
    pub fn tick(&mut self, input: &dyn Input) {
        if self.status != GameStatus::Playing {
            return;
        }
        let Some(level) = self.levels.get_mut(self.current) else {
            return;
        };

        self.player.handle_input(input);
        self.player.update(TICK_SECONDS, &mut level.platforms, &mut level.coins, &mut level.enemies);

        self.camera.set_level_dimensions(level.width, level.height);
        self.camera.follow(&self.player.body.rect);

        level.update(TICK_SECONDS, &mut self.player);
        let completed = level.completed;
        log::trace!("tick: player at ({:.1}, {:.1})", self.player.body.rect.x, self.player.body.rect.y);

        if completed {
            self.complete_level();
        }
        if self.player.is_out_of_lives() {
            log::info!("game over with {} votes", self.player.score);
            self.status = GameStatus::GameOver;
        }
    }

    /// Vote gate at the end line. Short of the target, the level starts
    /// over with the votes held on entry.
    pub fn complete_level(&mut self) {
        let Some(level) = self.levels.get_mut(self.current) else {
            return;
        };
        if self.player.score < level.required_votes {
            log::info!(
                "{}: {} of {} votes, retrying",
                level.name,
                self.player.score,
                level.required_votes
            );
            level.reset();
            self.player.score = self.score_at_entry;
            self.player.bullets.clear();
            self.player.respawn();
            return;
        }
        log::info!("{} passed with {} votes", level.name, self.player.score);
        self.status = GameStatus::LevelComplete;
    }

    pub fn next_level(&mut self) {
        let next = self.current + 1;
        if next >= self.levels.len() {
            log::info!("campaign complete with {} votes", self.player.score);
            self.status = GameStatus::GameComplete;
        } else {
            self.start_level(next);
        }
    }

    /// New game from the first level.
    pub fn restart(&mut self) {
        for level in self.levels.iter_mut() {
            level.reset();
        }
        self.player.reset();
        self.start_level(0);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(level) = self.level() else {
            return;
        };
        let view = self.camera.view();
        level.draw(surface, self.camera.x, self.camera.y, &view);
        self.player.draw(surface, self.camera.x, self.camera.y);
    }
}
