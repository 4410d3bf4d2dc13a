mod common;

use alien_raid::collide::{match_groups, match_one};
use alien_raid::config::GameConfig;
use alien_raid::geometry::Rect;
use alien_raid::group::World;

use common::{asset_table, block, rules};

// ── match_one ─────────────────────────────────────────────────────────────────

#[test]
fn match_one_returns_exactly_the_overlapping_members() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let probes = world.new_group();
    let targets = world.new_group();

    let probe = world.spawn(block(rules, Rect::new(100, 100, 40, 32)), &[probes]);
    let hit_left = world.spawn(block(rules, Rect::new(90, 90, 20, 20)), &[targets]);
    let miss = world.spawn(block(rules, Rect::new(300, 300, 20, 20)), &[targets]);
    let hit_right = world.spawn(block(rules, Rect::new(130, 120, 20, 20)), &[targets]);

    let hits = match_one(&mut world, probe, targets, true);
    assert_eq!(hits, vec![hit_left, hit_right]);
    assert!(!world.is_alive(hit_left));
    assert!(!world.is_alive(hit_right));
    assert!(world.is_alive(miss));
    assert!(world.is_alive(probe));
}

#[test]
fn match_one_without_consume_kills_nothing() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let g = world.new_group();
    let probe = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[g]);
    let other = world.spawn(block(rules, Rect::new(5, 5, 10, 10)), &[g]);

    let hits = match_one(&mut world, probe, g, false);
    assert_eq!(hits, vec![other]); // never itself
    assert!(world.is_alive(other));
}

#[test]
fn match_one_edge_contact_is_not_a_hit() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();
    let probe = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[a]);
    world.spawn(block(rules, Rect::new(10, 0, 10, 10)), &[b]);
    assert!(match_one(&mut world, probe, b, true).is_empty());
}

#[test]
fn dead_probe_matches_nothing() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();
    let probe = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[a]);
    let target = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[b]);
    world.kill(probe);

    assert!(match_one(&mut world, probe, b, true).is_empty());
    assert!(world.is_alive(target));
}

#[test]
fn empty_group_matches_nothing() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let a = world.new_group();
    let empty = world.new_group();
    let probe = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[a]);
    assert!(match_one(&mut world, probe, empty, true).is_empty());
}

// ── match_groups ──────────────────────────────────────────────────────────────

#[test]
fn shot_hitting_one_of_two_aliens() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let aliens = world.new_group();
    let shots = world.new_group();

    let alien1 = world.spawn(block(rules, Rect::new(100, 50, 48, 32)), &[aliens]);
    let alien2 = world.spawn(block(rules, Rect::new(400, 50, 48, 32)), &[aliens]);
    let shot = world.spawn(block(rules, Rect::new(120, 70, 8, 16)), &[shots]);

    let crashed = match_groups(&mut world, aliens, shots, true, true);
    assert_eq!(crashed.len(), 1);
    assert_eq!(crashed.get(&alien1), Some(&vec![shot]));
    assert!(!world.is_alive(alien1));
    assert!(!world.is_alive(shot));
    assert!(world.is_alive(alien2));
    assert_eq!(world.get(alien2).unwrap().rect, Rect::new(400, 50, 48, 32));
}

#[test]
fn consumed_b_member_is_claimed_by_the_first_a_member() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let aliens = world.new_group();
    let shots = world.new_group();

    let first = world.spawn(block(rules, Rect::new(100, 50, 48, 32)), &[aliens]);
    let second = world.spawn(block(rules, Rect::new(110, 50, 48, 32)), &[aliens]);
    let shot = world.spawn(block(rules, Rect::new(120, 60, 8, 16)), &[shots]);

    let crashed = match_groups(&mut world, aliens, shots, true, true);
    assert_eq!(crashed.keys().copied().collect::<Vec<_>>(), vec![first]);
    assert_eq!(crashed[&first], vec![shot]);
    assert!(world.is_alive(second));
}

#[test]
fn consume_flags_are_independent() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();
    let left = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[a]);
    let right = world.spawn(block(rules, Rect::new(5, 5, 10, 10)), &[b]);

    let crashed = match_groups(&mut world, a, b, false, true);
    assert_eq!(crashed[&left], vec![right]);
    assert!(world.is_alive(left));
    assert!(!world.is_alive(right));
}

#[test]
fn no_overlap_means_empty_mapping_and_no_deaths() {
    let assets = asset_table();
    let config = GameConfig::default();
    let rules = rules(&assets, &config);
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();
    let left = world.spawn(block(rules, Rect::new(0, 0, 10, 10)), &[a]);
    let right = world.spawn(block(rules, Rect::new(50, 50, 10, 10)), &[b]);

    assert!(match_groups(&mut world, a, b, true, true).is_empty());
    assert!(world.is_alive(left));
    assert!(world.is_alive(right));
}
