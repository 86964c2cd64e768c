mod common;

use capitol_run::coin::{Coin, CoinKind};
use capitol_run::enemy::Enemy;
use capitol_run::geometry::Heading;
use capitol_run::input::Action;
use capitol_run::level::{Level, LevelKind};
use capitol_run::platform::Platform;
use capitol_run::player::Player;

use common::{approx, floor, tuning, Keys, Recorder};

/// A player standing on a floor at y=348, spawned at (100, 300).
fn make_grounded() -> (Player, Vec<Platform>) {
    let mut player = Player::new(100.0, 300.0, &tuning());
    let mut platforms = vec![floor(348.0)];
    player.update(0.016, &mut platforms, &mut [], &mut []);
    assert!(player.body.on_ground);
    (player, platforms)
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn walking_right_applies_speed_then_friction() {
    let (mut player, mut platforms) = make_grounded();
    player.handle_input(&Keys::holding(&[Action::Right]));
    assert_eq!(player.body.vx, 5.0);
    assert!(player.body.facing_right);

    player.update(0.016, &mut platforms, &mut [], &mut []);
    assert!(approx(player.body.vx, 4.0));
    assert!(approx(player.body.x(), 104.0));
}

#[test]
fn walking_left_turns_the_player() {
    let (mut player, _) = make_grounded();
    player.handle_input(&Keys::holding(&[Action::Left]));
    assert_eq!(player.body.vx, -5.0);
    assert!(!player.body.facing_right);
}

#[test]
fn horizontal_speed_is_clamped() {
    let (mut player, mut platforms) = make_grounded();
    player.body.vx = 20.0;
    player.update(0.016, &mut platforms, &mut [], &mut []);
    assert_eq!(player.body.vx, 8.0);

    player.body.vx = -30.0;
    player.update(0.016, &mut platforms, &mut [], &mut []);
    assert_eq!(player.body.vx, -8.0);
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn jump_leaves_the_ground() {
    let (mut player, mut platforms) = make_grounded();
    player.handle_input(&Keys::holding(&[Action::Jump]));
    assert_eq!(player.body.vy, -12.0);
    assert_eq!(player.jump_count, 1);

    player.update(0.016, &mut platforms, &mut [], &mut []);
    assert!(!player.body.on_ground);
    assert!(player.body.y() < 300.0);
}

#[test]
fn holding_jump_does_not_jump_again() {
    let (mut player, mut platforms) = make_grounded();
    player.max_jumps = 2;
    let jump = Keys::holding(&[Action::Jump]);

    player.handle_input(&jump);
    player.update(0.016, &mut platforms, &mut [], &mut []);
    let vy = player.body.vy;

    player.handle_input(&jump);
    assert_eq!(player.body.vy, vy);
    assert_eq!(player.jump_count, 1);

    // Release and press again: the second jump of a double jump.
    player.handle_input(&Keys::none());
    player.handle_input(&jump);
    assert_eq!(player.body.vy, -12.0);
    assert_eq!(player.jump_count, 2);
}

#[test]
fn jump_count_is_capped_in_the_air() {
    let (mut player, mut platforms) = make_grounded();
    let jump = Keys::holding(&[Action::Jump]);

    player.handle_input(&jump);
    player.update(0.016, &mut platforms, &mut [], &mut []);
    player.handle_input(&Keys::none());
    let vy = player.body.vy;

    player.handle_input(&jump);
    assert_eq!(player.body.vy, vy);
    assert_eq!(player.jump_count, 1);
}

#[test]
fn bouncing_refunds_the_jump() {
    let mut player = Player::new(100.0, 300.0, &tuning());
    let mut platforms = vec![Platform::bouncy(0.0, 400.0, 300.0, 40.0, 18.0)];
    player.jump_count = 1;

    for _ in 0..100 {
        player.update(0.016, &mut platforms, &mut [], &mut []);
        if player.body.vy < 0.0 {
            break;
        }
    }

    assert_eq!(player.body.vy, -18.0);
    assert!(!player.body.on_ground);
    assert_eq!(player.jump_count, 0);

    player.handle_input(&Keys::holding(&[Action::Jump]));
    assert_eq!(player.body.vy, -12.0);
    assert_eq!(player.jump_count, 1);
}

#[test]
fn landing_resets_jump_count() {
    let (mut player, mut platforms) = make_grounded();
    player.handle_input(&Keys::holding(&[Action::Jump]));

    for _ in 0..200 {
        player.update(0.016, &mut platforms, &mut [], &mut []);
        if player.body.on_ground {
            break;
        }
    }
    assert!(player.body.on_ground);
    assert_eq!(player.jump_count, 0);
    assert_eq!(player.body.rect.bottom(), 348.0);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shooting_requires_permission() {
    let (mut player, _) = make_grounded();
    player.handle_input(&Keys::holding(&[Action::Shoot]));
    assert!(player.bullets.is_empty());

    player.set_can_shoot(true);
    player.handle_input(&Keys::holding(&[Action::Shoot]));
    assert_eq!(player.bullets.len(), 1);
    assert_eq!(player.bullets[0].heading, Heading::Right);
}

#[test]
fn shooting_respects_the_cooldown() {
    let (mut player, mut platforms) = make_grounded();
    player.set_can_shoot(true);
    let shoot = Keys::holding(&[Action::Shoot]);

    player.handle_input(&shoot);
    player.handle_input(&shoot);
    assert_eq!(player.bullets.len(), 1);

    player.update(0.5, &mut platforms, &mut [], &mut []);
    player.handle_input(&shoot);
    assert_eq!(player.bullets.len(), 2);
}

#[test]
fn bullets_follow_facing() {
    let (mut player, _) = make_grounded();
    player.set_can_shoot(true);
    player.handle_input(&Keys::holding(&[Action::Left, Action::Shoot]));
    assert_eq!(player.bullets[0].heading, Heading::Left);
    assert!(player.bullets[0].body.vx < 0.0);
}

// ── Coins ─────────────────────────────────────────────────────────────────────

#[test]
fn touching_a_coin_scores_its_value_once() {
    let t = tuning();
    let (mut player, mut platforms) = make_grounded();
    let mut coins = vec![
        Coin::new(100.0, 310.0, 1, CoinKind::Regular, &t.coin),
        Coin::new(110.0, 320.0, 3, CoinKind::Special, &t.coin),
        Coin::new(900.0, 310.0, 1, CoinKind::Regular, &t.coin),
    ];

    player.update(0.016, &mut platforms, &mut coins, &mut []);
    assert_eq!(player.score, 4);
    assert!(coins[0].collected && coins[1].collected);
    assert!(!coins[2].collected);

    player.update(0.016, &mut platforms, &mut coins, &mut []);
    assert_eq!(player.score, 4);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn falling_onto_an_enemy_stomps_it() {
    let t = tuning();
    let mut player = Player::new(100.0, 300.0, &t);
    player.body.vy = 3.0;
    let mut enemies = vec![Enemy::walker(100.0, 350.0, &t)];

    player.update(0.016, &mut [], &mut [], &mut enemies);

    assert!(!enemies[0].body.active);
    assert!(approx(player.body.vy, -8.4));
    assert_eq!(player.lives, 3);
    assert!(!player.is_invulnerable());
}

#[test]
fn side_contact_with_an_enemy_costs_a_life() {
    let t = tuning();
    let mut player = Player::new(100.0, 300.0, &t);
    let mut enemies = vec![Enemy::walker(120.0, 300.0, &t)];

    player.update(0.016, &mut [], &mut [], &mut enemies);
    assert_eq!(player.lives, 2);
    assert!(player.is_invulnerable());
    assert!(enemies[0].body.active);

    // Still touching, but invulnerable.
    player.update(0.016, &mut [], &mut [], &mut enemies);
    assert_eq!(player.lives, 2);
}

#[test]
fn defeated_enemies_are_harmless() {
    let t = tuning();
    let mut player = Player::new(100.0, 300.0, &t);
    let mut enemies = vec![Enemy::walker(120.0, 300.0, &t)];
    enemies[0].defeat();

    player.update(0.016, &mut [], &mut [], &mut enemies);
    assert_eq!(player.lives, 3);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn invulnerability_blocks_damage_then_expires() {
    let (mut player, mut platforms) = make_grounded();
    player.take_damage();
    assert_eq!(player.lives, 2);

    player.take_damage();
    assert_eq!(player.lives, 2);

    for _ in 0..3 {
        player.update(0.5, &mut platforms, &mut [], &mut []);
        assert!(player.is_invulnerable());
    }
    player.update(0.5, &mut platforms, &mut [], &mut []);
    assert!(!player.is_invulnerable());

    player.take_damage();
    assert_eq!(player.lives, 1);
}

#[test]
fn lives_never_underflow() {
    let (mut player, _) = make_grounded();
    player.take_hit(10);
    assert_eq!(player.lives, 0);
    assert!(player.is_out_of_lives());
}

#[test]
fn falling_out_of_the_level_respawns() {
    let (mut player, mut platforms) = make_grounded();
    player.body.set_position(400.0, 850.0);

    player.update(0.016, &mut platforms, &mut [], &mut []);

    assert_eq!(player.lives, 2);
    assert_eq!((player.body.x(), player.body.y()), (100.0, 300.0));
    assert_eq!((player.body.vx, player.body.vy), (0.0, 0.0));
}

#[test]
fn flicker_alternates_while_invulnerable() {
    let (mut player, mut platforms) = make_grounded();
    assert!(!player.is_flicker_hidden());

    player.take_damage();
    assert!(player.is_flicker_hidden());
    let mut surface = Recorder::default();
    player.draw(&mut surface, 0.0, 0.0);
    assert!(surface.ops.is_empty());

    player.update(0.25, &mut platforms, &mut [], &mut []);
    assert!(!player.is_flicker_hidden());
    let mut surface = Recorder::default();
    player.draw(&mut surface, 0.0, 0.0);
    assert_eq!(surface.ops.len(), 1);
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn reset_restores_a_fresh_player() {
    let (mut player, _) = make_grounded();
    player.score = 7;
    player.take_hit(2);
    player.set_can_shoot(true);
    player.shoot();
    player.body.set_position(900.0, 100.0);

    player.reset();

    assert_eq!(player.lives, 3);
    assert_eq!(player.score, 0);
    assert!(!player.is_invulnerable());
    assert!(player.bullets.is_empty());
    assert_eq!((player.body.x(), player.body.y()), (100.0, 300.0));
}

#[test]
fn entering_a_level_adopts_its_start_and_rules() {
    let t = tuning();
    let mut player = Player::new(0.0, 0.0, &t);
    player.score = 4;

    let mut level = Level::new(LevelKind::Committee, "Committee", "", 2000.0, &t);
    level.set_start(150.0, 250.0);
    level.set_boss_level(true);

    player.enter_level(&level);

    assert_eq!(player.spawn_point(), (150.0, 250.0));
    assert_eq!((player.body.x(), player.body.y()), (150.0, 250.0));
    assert!(player.can_shoot);
    assert_eq!(player.score, 4);

    let plain = Level::new(LevelKind::House, "House", "", 5000.0, &t);
    player.enter_level(&plain);
    assert!(!player.can_shoot);
}
