mod common;

use alien_raid::config::GameConfig;
use alien_raid::entities::{Entity, Kind};
use alien_raid::geometry::Rect;
use alien_raid::group::World;

use common::{asset_table, block, rules};

fn r() -> Rect {
    Rect::new(10, 10, 8, 16)
}

// ── Membership & lifetime ─────────────────────────────────────────────────────

#[test]
fn entity_survives_until_removed_from_every_group() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();

    let id = world.spawn(block(rules(&assets, &config), r()), &[a, b]);
    assert!(world.is_alive(id));

    world.remove(id, a);
    assert!(world.is_alive(id));
    assert!(!world.contains(a, id));
    assert!(world.contains(b, id));

    world.remove(id, b);
    assert!(!world.is_alive(id));
}

#[test]
fn kill_removes_from_all_groups_and_is_idempotent() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_render_group();
    let id = world.spawn(block(rules(&assets, &config), r()), &[a, b]);

    world.kill(id);
    assert!(!world.is_alive(id));
    assert!(world.members(a).is_empty());
    assert!(world.members(b).is_empty());
    assert!(world.get(id).unwrap().groups().is_empty());

    // Second kill is a no-op, not a panic.
    world.kill(id);
    assert!(!world.is_alive(id));
}

#[test]
fn spawn_into_no_groups_is_dead_on_arrival() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let id = world.spawn(block(rules(&assets, &config), r()), &[]);
    assert!(!world.is_alive(id));
}

#[test]
fn dead_entity_cannot_rejoin() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let id = world.spawn(block(rules(&assets, &config), r()), &[a]);
    world.kill(id);
    world.add(id, a);
    assert!(!world.is_alive(id));
    assert!(world.is_empty(a));
}

#[test]
fn adding_twice_keeps_one_membership() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let id = world.spawn(block(rules(&assets, &config), r()), &[a, a]);
    world.add(id, a);
    assert_eq!(world.len(a), 1);
    assert_eq!(world.get(id).unwrap().groups().len(), 1);
}

#[test]
fn removing_a_non_member_is_a_no_op() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let b = world.new_group();
    let id = world.spawn(block(rules(&assets, &config), r()), &[a]);
    world.remove(id, b);
    assert!(world.is_alive(id));
    assert_eq!(world.len(a), 1);
}

#[test]
fn reap_drops_dead_bodies_only() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let a = world.new_group();
    let dead = world.spawn(block(rules(&assets, &config), r()), &[a]);
    let live = world.spawn(block(rules(&assets, &config), r()), &[a]);
    world.kill(dead);

    // Still readable until the end-of-tick reap.
    assert_eq!(world.get(dead).unwrap().rect, r());
    world.reap();
    assert!(world.get(dead).is_none());
    assert!(world.get(live).is_some());
    assert_eq!(world.live_count(), 1);
}

// ── Single-slot groups ────────────────────────────────────────────────────────

#[test]
fn single_slot_evicts_without_killing() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let aliens = world.new_group();
    let last = world.new_single();

    let first = world.spawn(block(rules(&assets, &config), r()), &[aliens, last]);
    assert_eq!(world.single(last), Some(first));

    let second = world.spawn(block(rules(&assets, &config), r()), &[aliens, last]);
    assert_eq!(world.single(last), Some(second));
    assert_eq!(world.len(last), 1);

    assert!(world.is_alive(first));
    assert!(!world.contains(last, first));
    assert_eq!(world.get(first).unwrap().groups(), &[aliens]);
}

#[test]
fn evicting_a_slot_only_entity_destroys_it() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let last = world.new_single();
    let first = world.spawn(block(rules(&assets, &config), r()), &[last]);
    let _second = world.spawn(block(rules(&assets, &config), r()), &[last]);
    assert!(!world.is_alive(first));
}

#[test]
fn killing_the_occupant_empties_the_slot() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let last = world.new_single();
    assert_eq!(world.single(last), None);
    let id = world.spawn(block(rules(&assets, &config), r()), &[last]);
    world.kill(id);
    assert_eq!(world.single(last), None);
    assert!(world.is_empty(last));
}

// ── update_all ────────────────────────────────────────────────────────────────

#[test]
fn update_pass_iterates_a_snapshot() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let all = world.new_group();
    let bombs = world.new_group();

    // A bomb one step from the floor: its update spawns an explosion into
    // `all` and kills itself, mid-pass.
    let mut bomb = Entity::bomb(rules(&assets, &config), &Rect::new(0, 0, 48, 32), all);
    bomb.rect = Rect::new(100, config.bomb_floor - 16 - 1, 8, 16);
    let bomb = world.spawn(bomb, &[bombs, all]);

    world.update_all(all, rules(&assets, &config));

    assert!(!world.is_alive(bomb));
    let members = world.members(all);
    assert_eq!(members.len(), 1);
    let explosion = world.get(members[0]).unwrap();
    // Spawned during the pass, so not updated by it.
    assert_eq!(
        explosion.kind,
        Kind::Explosion(alien_raid::entities::Explosion {
            life: config.explosion_life
        })
    );
}

#[test]
fn entities_killed_mid_pass_are_not_updated() {
    let assets = asset_table();
    let config = GameConfig::default();
    let mut world = World::new();
    let all = world.new_group();

    let shot = world.spawn(Entity::shot(rules(&assets, &config), (100, 200)), &[all]);
    let before = world.get(shot).unwrap().rect;
    world.kill(shot);
    world.update_all(all, rules(&assets, &config));
    assert_eq!(world.get(shot).unwrap().rect, before);
}
