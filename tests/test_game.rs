mod common;

use capitol_run::bullet::Bullet;
use capitol_run::camera::Camera;
use capitol_run::config::{TICK_SECONDS, Tuning};
use capitol_run::game::{FixedStep, Game, GameStatus};
use capitol_run::geometry::{Heading, Rect};
use capitol_run::input::{Action, NoInput};
use capitol_run::level::{Level, LevelKind};
use capitol_run::surface::Color;

use common::{approx, floor, tuning, Keys, Op, Recorder};

/// A 1000px stage with a full floor, the end line at 800 and 10 votes
/// required.
fn make_level(name: &str) -> Level {
    let mut level = Level::new(LevelKind::House, name, "", 1000.0, &tuning());
    level.add_platform(floor(500.0));
    level.set_end_x(800.0);
    level.set_required_votes(10);
    level
}

fn make_game(levels: Vec<Level>) -> Game {
    Game::with_levels(tuning(), levels)
}

/// Put the player past the end line, standing on the floor.
fn walk_to_end(game: &mut Game) {
    game.player.body.set_position(850.0, 452.0);
}

// ── Fixed step ────────────────────────────────────────────────────────────────

#[test]
fn fixed_step_banks_partial_ticks() {
    let mut clock = FixedStep::default();
    assert_eq!(clock.advance(TICK_SECONDS / 2.0), 0);
    assert_eq!(clock.advance(TICK_SECONDS / 2.0), 1);
    assert_eq!(clock.advance(0.0), 0);
}

#[test]
fn fixed_step_caps_a_stalled_frame() {
    let mut clock = FixedStep::default();
    assert_eq!(clock.advance(1.0), 5);
    // The backlog beyond one tick is dropped.
    assert!(clock.advance(0.0) <= 1);
}

#[test]
fn fixed_step_ignores_negative_time() {
    let mut clock = FixedStep::default();
    assert_eq!(clock.advance(-1.0), 0);
    assert_eq!(clock.advance(TICK_SECONDS), 1);
}

#[test]
fn step_runs_due_ticks() {
    let mut game = make_game(vec![make_level("A")]);
    assert_eq!(game.step(1.0, &NoInput), 5);
    assert_eq!(game.step(0.0, &NoInput), 1);
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_on_the_house() {
    let game = Game::new(Tuning::default());
    assert_eq!(game.levels.len(), 4);
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.level().map(|l| l.kind), Some(LevelKind::House));
    assert_eq!((game.player.body.x(), game.player.body.y()), (100.0, 300.0));
    assert!(!game.player.can_shoot);
}

#[test]
fn starting_a_missing_level_is_refused() {
    let mut game = make_game(vec![make_level("A")]);
    assert!(!game.start_level(3));
    assert_eq!(game.current_index(), 0);
}

#[test]
fn player_walks_right_with_input() {
    let mut game = make_game(vec![make_level("A")]);
    let right = Keys::holding(&[Action::Right]);
    for _ in 0..60 {
        game.tick(&right);
    }
    assert!(game.player.body.x() > 300.0);
    assert!(game.player.body.on_ground);
}

// ── Vote gate ─────────────────────────────────────────────────────────────────

#[test]
fn too_few_votes_restarts_the_level() {
    let mut game = make_game(vec![make_level("A")]);
    game.player.score = 5;
    walk_to_end(&mut game);

    game.tick(&NoInput);

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.player.score, 0);
    assert_eq!((game.player.body.x(), game.player.body.y()), (100.0, 300.0));
    assert!(game.level().is_some_and(|l| !l.completed));
}

#[test]
fn retry_drops_shots_in_flight() {
    let t = tuning();
    let mut game = make_game(vec![make_level("A")]);
    game.player.bullets.push(Bullet::new(500.0, 100.0, Heading::Right, &t.bullet));
    walk_to_end(&mut game);

    game.tick(&NoInput);

    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.player.bullets.is_empty());
}

#[test]
fn enough_votes_passes_the_level() {
    let mut game = make_game(vec![make_level("A"), make_level("B")]);
    game.player.score = 12;
    walk_to_end(&mut game);

    game.tick(&NoInput);
    assert_eq!(game.status(), GameStatus::LevelComplete);

    // Nothing moves while the result is shown.
    let x = game.player.body.x();
    game.tick(&Keys::holding(&[Action::Right]));
    assert_eq!(game.player.body.x(), x);

    game.next_level();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.player.score, 12);
    assert_eq!((game.player.body.x(), game.player.body.y()), (100.0, 300.0));
}

#[test]
fn votes_carry_into_the_retry_baseline() {
    let mut senate = make_level("B");
    senate.set_required_votes(20);
    let mut game = make_game(vec![make_level("A"), senate]);
    game.player.score = 12;
    walk_to_end(&mut game);
    game.tick(&NoInput);
    game.next_level();

    game.player.score = 15;
    walk_to_end(&mut game);
    game.tick(&NoInput);

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.player.score, 12);
}

#[test]
fn passing_the_last_level_completes_the_game() {
    let mut game = make_game(vec![make_level("A")]);
    game.player.score = 10;
    walk_to_end(&mut game);
    game.tick(&NoInput);
    assert_eq!(game.status(), GameStatus::LevelComplete);

    game.next_level();
    assert_eq!(game.status(), GameStatus::GameComplete);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn losing_the_last_life_ends_the_game() {
    let mut game = make_game(vec![make_level("A")]);
    game.player.lives = 1;
    game.player.take_damage();

    game.tick(&NoInput);
    assert_eq!(game.status(), GameStatus::GameOver);

    game.tick(&NoInput);
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn restart_begins_a_fresh_campaign() {
    let mut game = make_game(vec![make_level("A"), make_level("B")]);
    game.player.score = 12;
    walk_to_end(&mut game);
    game.tick(&NoInput);
    game.next_level();
    game.player.lives = 1;
    game.player.take_damage();
    game.tick(&NoInput);
    assert_eq!(game.status(), GameStatus::GameOver);

    game.restart();

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.player.lives, 3);
    assert_eq!(game.player.score, 0);
    assert!(game.levels.iter().all(|l| !l.completed));
}

// ── Notices ───────────────────────────────────────────────────────────────────

#[test]
fn educational_notices_surface_through_the_session() {
    let mut level = make_level("A");
    level.add_educational_point(100.0, 320.0, "Introduction of a Bill", "Bills start here.");
    let mut game = make_game(vec![level]);

    game.tick(&NoInput);
    let notices = game.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Introduction of a Bill");
    assert!(game.take_notices().is_empty());
}

// ── Camera ────────────────────────────────────────────────────────────────────

#[test]
fn camera_eases_towards_the_target() {
    let mut camera = Camera::new(800.0, 600.0, &tuning().camera);
    camera.set_level_dimensions(2000.0, 600.0);
    camera.follow(&Rect::new(1000.0, 300.0, 32.0, 48.0));
    assert!(approx(camera.x, 61.6));
}

#[test]
fn camera_stays_inside_the_level() {
    let mut camera = Camera::new(800.0, 600.0, &tuning().camera);
    camera.set_level_dimensions(1000.0, 600.0);
    for _ in 0..500 {
        camera.follow(&Rect::new(5000.0, 300.0, 32.0, 48.0));
    }
    assert!(approx(camera.x, 200.0));

    for _ in 0..500 {
        camera.follow(&Rect::new(0.0, 300.0, 32.0, 48.0));
    }
    assert_eq!(camera.x, 0.0);

    camera.x = 150.0;
    camera.reset();
    assert_eq!(camera.view(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn draw_renders_level_then_player() {
    let game = make_game(vec![make_level("A")]);
    let mut surface = Recorder::default();
    game.draw(&mut surface);
    assert_eq!(surface.ops[0], Op::Fill(0.0, 0.0, 800.0, 600.0, Color::SKY));
    assert!(matches!(surface.ops.last(), Some(Op::Fill(_, _, w, h, _)) if *w == 32.0 && *h == 48.0));
}
