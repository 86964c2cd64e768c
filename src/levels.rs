//! The four stages of the campaign: House, Senate, the committee boss fight
//! and the presidential final.

use crate::boss::Boss;
use crate::coin::{Coin, CoinKind};
use crate::config::Tuning;
use crate::enemy::Enemy;
use crate::hazard::{Hazard, HazardKind};
use crate::level::{Level, LevelKind};
use crate::platform::{Axis, Platform};
use crate::surface::Color;

const GROUND_Y: f32 = 500.0;
const GROUND_SPACING: f32 = 300.0;

const C_BROWN: Color = Color::rgb(139, 69, 19);
const C_SIENNA: Color = Color::rgb(160, 82, 45);
const C_PERU: Color = Color::rgb(205, 133, 63);
const C_MIDNIGHT: Color = Color::rgb(25, 25, 112);
const C_ROYAL: Color = Color::rgb(65, 105, 225);
const C_DARK_GREEN: Color = Color::rgb(0, 100, 0);
const C_FOREST: Color = Color::rgb(34, 139, 34);

/// Votes along the House and Senate floors.
const VOTE_TRAIL: [(f32, f32); 30] = [
    (300.0, 450.0), (450.0, 350.0), (600.0, 450.0), (750.0, 300.0), (900.0, 450.0),
    (1050.0, 250.0), (1200.0, 450.0), (1350.0, 300.0), (1500.0, 450.0), (1650.0, 350.0),
    (1800.0, 450.0), (1950.0, 250.0), (2100.0, 450.0), (2250.0, 300.0), (2400.0, 450.0),
    (2550.0, 350.0), (2700.0, 450.0), (2850.0, 250.0), (3000.0, 450.0), (3150.0, 300.0),
    (3300.0, 450.0), (3450.0, 350.0), (3600.0, 450.0), (3750.0, 300.0), (3900.0, 450.0),
    (4050.0, 250.0), (4200.0, 450.0), (4350.0, 300.0), (4500.0, 450.0), (4650.0, 350.0),
];

/// Ledges over the House and Senate floors: (x, y, width).
const LEDGES: [(f32, f32, f32); 15] = [
    (400.0, 400.0, 200.0), (700.0, 350.0, 150.0), (1000.0, 300.0, 200.0),
    (1300.0, 350.0, 150.0), (1600.0, 400.0, 200.0), (1900.0, 300.0, 150.0),
    (2200.0, 350.0, 200.0), (2500.0, 400.0, 150.0), (2800.0, 300.0, 200.0),
    (3100.0, 350.0, 150.0), (3400.0, 400.0, 200.0), (3700.0, 350.0, 150.0),
    (4000.0, 300.0, 200.0), (4300.0, 350.0, 150.0), (4600.0, 400.0, 200.0),
];

/// Every stage in play order.
pub fn campaign(tuning: &Tuning) -> Vec<Level> {
    vec![house(tuning), senate(tuning), committee(tuning), presidential(tuning)]
}

/// A row of ground segments every 300px, leaving the indices in `holes`
/// open and covering each with a hole hazard.
fn ground_with_holes(
    level: &mut Level,
    segments: usize,
    width: f32,
    holes: &[usize],
    color: Color,
    hole_name: &str,
) {
    for i in 0..segments {
        let x = i as f32 * GROUND_SPACING;
        if holes.contains(&i) {
            level.add_hazard(Hazard::new(x, GROUND_Y, width, 100.0, HazardKind::Hole).with_name(hole_name));
        } else {
            level.add_platform(Platform::solid(x, GROUND_Y, width, 30.0).with_color(color));
        }
    }
}

fn add_markers(level: &mut Level, points: &[(f32, f32, &str, &str)]) {
    for &(x, y, title, content) in points {
        level.add_educational_point(x, y, title, content);
    }
}

pub fn house(tuning: &Tuning) -> Level {
    let mut level = Level::new(
        LevelKind::House,
        "House of Representatives",
        "Gather votes to pass your bill in the House",
        5000.0,
        tuning,
    );

    ground_with_holes(&mut level, 20, 280.0, &[3, 7, 12, 16], C_BROWN, "Procedural Trap");
    for &(x, y, w) in LEDGES.iter() {
        level.add_platform(Platform::solid(x, y, w, 20.0).with_color(C_SIENNA));
    }

    for &(x, y) in VOTE_TRAIL.iter() {
        level.add_coin(
            Coin::new(x, y, 1, CoinKind::Regular, &tuning.coin)
                .with_description("A vote from a House Representative"),
        );
    }

    let walkers = [
        (800.0, "Committee Chair", "Committee chairs can block bills from reaching the floor"),
        (1500.0, "Lobbyist", "Lobbyists try to influence legislation"),
        (2200.0, "Opposing Party", "Members of the opposing party may try to block your bill"),
        (2900.0, "Rules Committee", "The Rules Committee determines how a bill is debated"),
        (3600.0, "Special Interests", "Special interest groups may oppose your bill"),
        (4300.0, "Procedural Hurdle", "Procedural hurdles can delay legislation"),
    ];
    for (x, name, description) in walkers {
        level.add_enemy(
            Enemy::walker(x, 450.0, tuning)
                .with_name(name, description)
                .with_patrol_distance(200.0),
        );
    }

    add_markers(
        &mut level,
        &[
            (500.0, 300.0, "Introduction of a Bill", "Bills are introduced by Representatives and assigned to committees for review."),
            (1500.0, 300.0, "Committee Process", "Committees debate, amend, and vote on bills before they can reach the House floor."),
            (2500.0, 300.0, "Rules Committee", "The Rules Committee sets the terms for debate and amendments on the House floor."),
            (3500.0, 300.0, "Floor Debate", "The full House debates the bill according to the rules set by the Rules Committee."),
            (4500.0, 300.0, "House Vote", "The House votes on the bill. A simple majority (218 votes) is needed to pass."),
        ],
    );

    for x in [1000.0, 2000.0, 3000.0, 4000.0] {
        level.add_checkpoint(x, 300.0);
    }
    level.set_end_x(4800.0);
    level.set_required_votes(15);
    level
}

pub fn senate(tuning: &Tuning) -> Level {
    let mut level = Level::new(
        LevelKind::Senate,
        "Senate",
        "Gather votes to pass your bill in the Senate",
        5000.0,
        tuning,
    );

    ground_with_holes(&mut level, 20, 290.0, &[6, 14], C_MIDNIGHT, "Filibuster Trap");

    // Every other ledge moves, alternating sideways and up-and-down.
    let speed = tuning.platform.move_speed;
    for (i, &(x, y, w)) in LEDGES.iter().enumerate() {
        let platform = match i {
            14 => Platform::solid(x, y, w, 20.0).with_color(C_ROYAL),
            _ if i % 4 == 0 => Platform::moving(x, y, w, 20.0, Axis::Horizontal, 150.0, speed),
            _ if i % 4 == 2 => Platform::moving(x, y, w, 20.0, Axis::Vertical, 100.0, speed),
            _ => Platform::solid(x, y, w, 20.0).with_color(C_ROYAL),
        };
        level.add_platform(platform);
    }

    for &(x, y) in VOTE_TRAIL.iter() {
        level.add_coin(Coin::new(x, y, 1, CoinKind::Regular, &tuning.coin).with_description("A vote from a Senator"));
    }

    let flyers = [
        (800.0, "Filibuster", "A filibuster can block legislation by extending debate indefinitely"),
        (1500.0, "Senate Hold", "A single Senator can place a hold on legislation, delaying its consideration"),
        (2200.0, "Cloture Vote", "Ending a filibuster requires 60 votes for cloture"),
        (2900.0, "Committee Chair", "Committee chairs have significant power over which bills advance"),
        (3600.0, "Majority Leader", "The Majority Leader controls the Senate schedule"),
        (4300.0, "Procedural Objection", "Procedural objections can delay or block legislation"),
    ];
    for (x, name, description) in flyers {
        level.add_enemy(
            Enemy::flyer(x, 300.0, 100.0, tuning)
                .with_name(name, description)
                .with_speed(2.0)
                .with_patrol_distance(200.0),
        );
    }

    add_markers(
        &mut level,
        &[
            (500.0, 300.0, "Senate Committees", "Like the House, the Senate has committees that review and amend legislation."),
            (1500.0, 300.0, "Filibuster", "The filibuster allows Senators to block legislation by extending debate indefinitely."),
            (2500.0, 300.0, "Cloture", "Cloture is the procedure to end a filibuster, requiring 60 votes in the 100-member Senate."),
            (3500.0, 300.0, "Senate Rules", "The Senate has different rules than the House, with fewer restrictions on debate and amendments."),
            (4500.0, 300.0, "Senate Vote", "Most bills need a simple majority to pass the Senate, but procedural votes often require 60 votes."),
        ],
    );

    for x in [1000.0, 2000.0, 3000.0, 4000.0] {
        level.add_checkpoint(x, 300.0);
    }
    level.set_end_x(4800.0);
    level.set_required_votes(25);
    level
}

pub fn committee(tuning: &Tuning) -> Level {
    let mut level = Level::new(
        LevelKind::Committee,
        "Committee Chairman Boss Fight",
        "Defeat the powerful Committee Chairman to advance your bill",
        2000.0,
        tuning,
    );

    level.add_platform(Platform::solid(0.0, GROUND_Y, 900.0, 100.0).with_color(C_BROWN));
    level.add_platform(Platform::solid(1100.0, GROUND_Y, 900.0, 100.0).with_color(C_BROWN));
    level.add_hazard(Hazard::new(900.0, GROUND_Y, 200.0, 100.0, HazardKind::Hole).with_name("Committee Trap"));

    let ledges = [
        (200.0, 400.0, 150.0),
        (450.0, 350.0, 120.0),
        (750.0, 300.0, 150.0),
        (1000.0, 350.0, 120.0),
        (1350.0, 400.0, 150.0),
        (1700.0, 350.0, 120.0),
    ];
    for (x, y, w) in ledges {
        level.add_platform(Platform::solid(x, y, w, 20.0).with_color(C_SIENNA));
    }
    let speed = tuning.platform.move_speed;
    level.add_platform(Platform::moving(500.0, 250.0, 100.0, 20.0, Axis::Horizontal, 200.0, speed).with_color(C_PERU));
    level.add_platform(Platform::moving(1100.0, 200.0, 100.0, 20.0, Axis::Vertical, 150.0, speed).with_color(C_PERU));

    level.add_boss(Boss::new(
        1500.0,
        420.0,
        "Committee Chairman",
        "A powerful committee chairman who can block your bill",
        tuning,
    ));

    let walkers = [
        (400.0, "Staffer", "Committee staff member trying to slow down your bill"),
        (800.0, "Lobbyist", "A lobbyist working against your legislation"),
        (1200.0, "Bureaucrat", "A bureaucrat creating red tape"),
    ];
    for (x, name, description) in walkers {
        level.add_enemy(
            Enemy::walker(x, 450.0, tuning)
                .with_name(name, description)
                .with_patrol_distance(150.0)
                .with_speed(1.5),
        );
    }

    let coins = [
        (250.0, 350.0, CoinKind::Special),
        (500.0, 200.0, CoinKind::Special),
        (800.0, 250.0, CoinKind::Special),
        (1000.0, 300.0, CoinKind::Special),
        (1150.0, 150.0, CoinKind::Special),
        (1400.0, 350.0, CoinKind::Special),
        (1600.0, 250.0, CoinKind::Special),
        (300.0, 450.0, CoinKind::Regular),
        (600.0, 450.0, CoinKind::Regular),
        (1200.0, 450.0, CoinKind::Regular),
        (1500.0, 450.0, CoinKind::Regular),
        (1750.0, 450.0, CoinKind::Regular),
    ];
    for (x, y, kind) in coins {
        let value = if kind == CoinKind::Special { 3 } else { 1 };
        level.add_coin(Coin::new(x, y, value, kind, &tuning.coin).with_description("A powerful committee vote"));
    }

    add_markers(
        &mut level,
        &[
            (300.0, 300.0, "Committee Power", "Committee chairmen have significant power to advance or block legislation in their committees."),
            (800.0, 200.0, "Markup Process", "In committee markup, members debate and amend bills before voting to send them to the full chamber."),
            (1400.0, 300.0, "Committee Vote", "A bill must receive a majority vote in committee to advance to the full House or Senate floor."),
        ],
    );

    level.add_checkpoint(500.0, 300.0);
    level.add_checkpoint(1000.0, 300.0);
    level.set_end_x(1900.0);
    level.set_required_votes(12);
    level.set_boss_level(true);
    level
}

pub fn presidential(tuning: &Tuning) -> Level {
    let mut level = Level::new(
        LevelKind::Final,
        "Presidential Approval",
        "Navigate the final steps to turn your bill into law",
        4000.0,
        tuning,
    );

    ground_with_holes(&mut level, 16, 280.0, &[], C_DARK_GREEN, "");

    let bounce = tuning.platform.bounce_force;
    let speed = tuning.platform.move_speed;
    let ledges = [
        Platform::bouncy(400.0, 400.0, 200.0, 20.0, bounce),
        Platform::crumbling(700.0, 350.0, 150.0, 20.0, &tuning.platform),
        Platform::moving(1000.0, 300.0, 200.0, 20.0, Axis::Horizontal, 150.0, speed),
        Platform::crumbling(1300.0, 350.0, 150.0, 20.0, &tuning.platform),
        Platform::bouncy(1600.0, 400.0, 200.0, 20.0, bounce),
        Platform::crumbling(1900.0, 300.0, 150.0, 20.0, &tuning.platform),
        Platform::moving(2200.0, 350.0, 200.0, 20.0, Axis::Vertical, 100.0, speed),
        Platform::crumbling(2500.0, 400.0, 150.0, 20.0, &tuning.platform),
        Platform::bouncy(2800.0, 300.0, 200.0, 20.0, bounce),
        Platform::crumbling(3100.0, 350.0, 150.0, 20.0, &tuning.platform),
        Platform::moving(3400.0, 400.0, 200.0, 20.0, Axis::Horizontal, 150.0, speed),
        Platform::solid(3700.0, 350.0, 150.0, 20.0),
    ];
    for platform in ledges {
        level.add_platform(platform.with_color(C_FOREST));
    }

    // Pairs of key votes alternate with pairs of ordinary ones along the
    // first stretch, then a second row of ordinary votes.
    for (i, &(x, y)) in VOTE_TRAIL.iter().take(24).enumerate() {
        let coin = if i % 4 < 2 {
            Coin::new(x, y, 1, CoinKind::Special, &tuning.coin)
                .with_description("A key vote from a committee chair or party leader")
        } else {
            Coin::new(x, y, 1, CoinKind::Regular, &tuning.coin)
        };
        level.add_coin(coin);
    }
    let second_row = [450.0, 350.0, 450.0, 300.0, 450.0, 250.0, 450.0, 300.0, 450.0, 350.0, 450.0, 250.0];
    for (i, y) in second_row.into_iter().enumerate() {
        let x = 350.0 + i as f32 * 150.0;
        level.add_coin(Coin::new(x, y, 1, CoinKind::Regular, &tuning.coin));
    }

    level.add_enemy(
        Enemy::walker(3500.0, 400.0, tuning)
            .with_name("Presidential Veto", "The President can veto a bill, sending it back to Congress")
            .with_size(64.0, 64.0)
            .with_speed(3.0)
            .with_patrol_distance(300.0),
    );

    let walkers = [
        (800.0, "Conference Committee", "The conference committee resolves differences between House and Senate versions"),
        (1500.0, "Enrollment Process", "The bill must be properly formatted and enrolled before going to the President"),
        (2200.0, "Legal Review", "The bill undergoes legal review before the President can sign it"),
        (2900.0, "Executive Branch Review", "Executive branch agencies review the bill and advise the President"),
    ];
    for (x, name, description) in walkers {
        level.add_enemy(
            Enemy::walker(x, 450.0, tuning)
                .with_name(name, description)
                .with_patrol_distance(200.0),
        );
    }

    add_markers(
        &mut level,
        &[
            (500.0, 300.0, "Conference Committee", "If the House and Senate pass different versions of a bill, a conference committee resolves the differences."),
            (1500.0, 300.0, "Enrollment", "After passing both chambers in identical form, the bill is enrolled (printed on parchment) and certified by House and Senate officials."),
            (2500.0, 300.0, "Presidential Action", "The President has four options: sign the bill, veto it, allow it to become law without signature, or pocket veto it."),
            (3500.0, 300.0, "Veto Override", "If the President vetoes a bill, Congress can override the veto with a two-thirds majority in both chambers."),
        ],
    );

    for x in [1000.0, 2000.0, 3000.0] {
        level.add_checkpoint(x, 300.0);
    }
    level.set_end_x(3800.0);
    level.set_required_votes(30);
    level
}
