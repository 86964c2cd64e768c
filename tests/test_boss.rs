mod common;

use capitol_run::boss::{AttackPattern, Boss, BossState, Phase};
use capitol_run::geometry::Rect;
use capitol_run::platform::Platform;
use capitol_run::player::Player;
use capitol_run::surface::Color;

use common::{approx, floor, tuning, Op, Recorder};

fn make_boss() -> Boss {
    Boss::new(1500.0, 420.0, "Committee Chairman", "Controls which bills advance", &tuning())
}

/// A player standing 50px left of the boss, level with its bullets.
fn make_player_near() -> Player {
    let mut player = Player::new(100.0, 300.0, &tuning());
    player.body.set_position(1450.0, 452.0);
    player
}

fn make_player_far() -> Player {
    let mut player = Player::new(100.0, 300.0, &tuning());
    player.body.set_position(200.0, 452.0);
    player
}

fn arena() -> Rect {
    Rect::new(-50.0, -50.0, 2100.0, 700.0)
}

fn make_floor() -> Vec<Platform> {
    vec![floor(500.0)]
}

// ── Phases ────────────────────────────────────────────────────────────────────

#[test]
fn phase_thresholds() {
    assert_eq!(Phase::from_health_fraction(1.0), Phase::One);
    assert_eq!(Phase::from_health_fraction(0.67), Phase::One);
    assert_eq!(Phase::from_health_fraction(0.66), Phase::Two);
    assert_eq!(Phase::from_health_fraction(0.5), Phase::Two);
    assert_eq!(Phase::from_health_fraction(0.34), Phase::Two);
    assert_eq!(Phase::from_health_fraction(0.33), Phase::Three);
    // Deliberately phase three: the strict thresholds decide, not a sample table.
    assert_eq!(Phase::from_health_fraction(0.3), Phase::Three);
    assert_eq!(Phase::from_health_fraction(0.0), Phase::Three);
}

#[test]
fn speed_multiplier_follows_the_phase() {
    let multipliers: Vec<f32> = [1.0, 0.7, 0.5, 0.1]
        .iter()
        .map(|&f| Phase::from_health_fraction(f).speed_multiplier())
        .collect();
    assert_eq!(multipliers, vec![1.0, 1.0, 1.5, 2.0]);
}

#[test]
fn damage_advances_phase_and_speed() {
    let mut boss = make_boss();
    assert_eq!(boss.phase, Phase::One);
    assert_eq!(boss.speed(), 2.0);

    boss.take_damage(4);
    assert_eq!(boss.health, 6);
    assert_eq!(boss.phase, Phase::Two);
    assert_eq!(boss.speed(), 3.0);

    boss.take_damage(3);
    assert_eq!(boss.phase, Phase::Three);
    assert_eq!(boss.speed(), 4.0);
    assert!(boss.body.active);
}

#[test]
fn shooting_gets_keener_by_phase() {
    let mut boss = make_boss();
    assert!(approx(boss.shoot_range(), 400.0));
    assert!(approx(boss.shoot_interval(), 1.5));

    boss.take_damage(5);
    assert!(approx(boss.shoot_range(), 500.0));
    assert!(approx(boss.shoot_interval(), 1.2));

    boss.take_damage(3);
    assert!(approx(boss.shoot_range(), 600.0));
    assert!(approx(boss.shoot_interval(), 0.9));
}

#[test]
fn lethal_damage_defeats_and_clamps_health() {
    let mut boss = make_boss();
    let mut player = make_player_near();
    boss.update(0.25, &mut make_floor(), &mut player, &arena());
    assert!(!boss.bullets.is_empty());

    boss.take_damage(25);

    assert_eq!(boss.health, 0);
    assert!(!boss.body.active);
    assert!(boss.bullets.is_empty());

    // Further hits are ignored.
    boss.take_damage(1);
    assert_eq!(boss.health, 0);
}

// ── Attacks ───────────────────────────────────────────────────────────────────

#[test]
fn boss_ignores_a_distant_player() {
    let mut boss = make_boss();
    let mut player = make_player_far();
    let mut platforms = make_floor();

    for _ in 0..20 {
        boss.update(0.25, &mut platforms, &mut player, &arena());
    }

    assert!(!boss.is_attacking());
    assert!(boss.bullets.is_empty());
    assert!(boss.body.on_ground);
    assert_eq!(player.lives, 3);
}

#[test]
fn phase_one_charges_and_fires() {
    let mut boss = make_boss();
    let mut player = make_player_near();
    let mut platforms = make_floor();

    boss.update(0.25, &mut platforms, &mut player, &arena());

    assert_eq!(
        boss.state,
        BossState::Attacking { pattern: AttackPattern::Charge, remaining: 0.25 }
    );
    assert!(approx(boss.body.vx, -4.8));
    assert_eq!(boss.bullets.len(), 1);
    assert_eq!(player.lives, 3);

    boss.update(0.25, &mut platforms, &mut player, &arena());

    assert_eq!(boss.state, BossState::Patrol);
    assert_eq!(boss.speed(), 2.0);
    assert!(boss.bullets.is_empty());
    assert_eq!(player.lives, 2);
    assert!(player.is_invulnerable());
}

#[test]
fn phase_two_leaps() {
    let mut boss = make_boss();
    boss.take_damage(5);
    let mut player = make_player_near();
    let mut platforms = make_floor();

    boss.update(0.25, &mut platforms, &mut player, &arena());

    assert!(matches!(boss.state, BossState::Attacking { pattern: AttackPattern::Leap, .. }));
    assert!(boss.body.vy < 0.0);
    assert!(boss.body.y() < 420.0);
    assert!(!boss.body.on_ground);
}

#[test]
fn phase_three_rushes_then_settles() {
    let mut boss = make_boss();
    boss.take_damage(8);
    assert_eq!(boss.phase, Phase::Three);
    let mut player = make_player_near();
    let mut platforms = make_floor();

    boss.update(0.25, &mut platforms, &mut player, &arena());
    assert!(matches!(boss.state, BossState::Attacking { pattern: AttackPattern::Rush, .. }));
    assert_eq!(boss.speed(), 6.0);

    boss.update(0.25, &mut platforms, &mut player, &arena());
    assert_eq!(boss.state, BossState::Patrol);
    assert_eq!(boss.speed(), 4.0);
}

#[test]
fn attacks_wait_for_the_cooldown() {
    let mut boss = make_boss();
    let mut player = make_player_near();
    let mut platforms = make_floor();

    boss.update(0.25, &mut platforms, &mut player, &arena());
    boss.update(0.25, &mut platforms, &mut player, &arena());
    assert!(!boss.is_attacking());

    // 2s interval, 0.5s already elapsed.
    for _ in 0..6 {
        player.body.set_position(boss.body.x() - 50.0, 452.0);
        boss.update(0.25, &mut platforms, &mut player, &arena());
        assert!(!boss.is_attacking());
    }
    player.body.set_position(boss.body.x() - 50.0, 452.0);
    boss.update(0.25, &mut platforms, &mut player, &arena());
    assert!(boss.is_attacking());
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn defeated_boss_is_frozen() {
    let mut boss = make_boss();
    boss.defeat();
    let before = boss.body.rect;
    let mut player = make_player_near();
    boss.update(0.25, &mut make_floor(), &mut player, &arena());
    assert_eq!(boss.body.rect, before);
    assert!(boss.bullets.is_empty());
}

#[test]
fn reset_restores_a_fresh_boss() {
    let mut boss = make_boss();
    let mut player = make_player_near();
    boss.update(0.25, &mut make_floor(), &mut player, &arena());
    boss.take_damage(9);

    boss.reset();

    assert!(boss.body.active);
    assert_eq!(boss.health, 10);
    assert_eq!(boss.phase, Phase::One);
    assert_eq!(boss.state, BossState::Patrol);
    assert_eq!(boss.speed(), 2.0);
    assert!(boss.bullets.is_empty());
    assert!(!boss.is_flashing());
    assert_eq!((boss.body.x(), boss.body.y()), (1500.0, 420.0));
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn hit_boss_flashes_red() {
    let mut boss = make_boss();
    let mut surface = Recorder::default();
    boss.draw(&mut surface, 1400.0, 0.0);
    assert_eq!(surface.ops[0], Op::Fill(100.0, 420.0, 80.0, 80.0, Color::rgb(139, 0, 0)));

    boss.take_damage(1);
    assert!(boss.is_flashing());
    let mut surface = Recorder::default();
    boss.draw(&mut surface, 1400.0, 0.0);
    assert_eq!(surface.ops[0], Op::Fill(100.0, 420.0, 80.0, 80.0, Color::RED));
}

#[test]
fn boss_is_labelled_with_its_name() {
    let boss = make_boss();
    let mut surface = Recorder::default();
    boss.draw(&mut surface, 0.0, 0.0);
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, Op::Text(_, _, text, _) if text == "Committee Chairman")));
}
