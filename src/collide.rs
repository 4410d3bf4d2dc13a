//! Rectangle-overlap collision queries.
//!
//! Both queries scan every pair, O(|A|·|B|).  If entity counts ever grow
//! past a few dozen per group this is where a uniform grid belongs.

use std::collections::BTreeMap;

use crate::entities::{EntityId, GroupId};
use crate::geometry::Rect;
use crate::group::World;

fn live_rect(world: &World, id: EntityId) -> Option<Rect> {
    if world.is_alive(id) {
        world.get(id).map(|entity| entity.rect)
    } else {
        None
    }
}

/// Members of `group` overlapping `probe`, in group order.  With `consume`
/// every match is killed.  A dead probe matches nothing, and the probe never
/// matches itself.
pub fn match_one(world: &mut World, probe: EntityId, group: GroupId, consume: bool) -> Vec<EntityId> {
    let Some(area) = live_rect(world, probe) else {
        return Vec::new();
    };
    let hits: Vec<EntityId> = world
        .members(group)
        .into_iter()
        .filter(|&id| id != probe)
        .filter(|&id| live_rect(world, id).is_some_and(|rect| rect.collides(&area)))
        .collect();
    if consume {
        for &id in &hits {
            world.kill(id);
        }
    }
    hits
}

/// Every member of `a` that overlaps at least one member of `b`, mapped to
/// the `b` members it hit.  Members of `a` are tested in group order, so with
/// `consume_b` a `b` member is claimed by the first `a` member that reaches
/// it.
pub fn match_groups(
    world: &mut World,
    a: GroupId,
    b: GroupId,
    consume_a: bool,
    consume_b: bool,
) -> BTreeMap<EntityId, Vec<EntityId>> {
    let mut crashed = BTreeMap::new();
    for id in world.members(a) {
        let hits = match_one(world, id, b, consume_b);
        if hits.is_empty() {
            continue;
        }
        if consume_a {
            world.kill(id);
        }
        crashed.insert(id, hits);
    }
    crashed
}
