//! Entity storage and group membership.
//!
//! Groups own membership; entities own nothing but a list of the groups
//! they are in.  An entity removed from its last group is destroyed: it is
//! never updated, drawn or matched again.  Its body stays readable until the
//! next `reap` so collision handlers can still see where it died.

use std::collections::BTreeMap;

use tracing::trace;

use crate::entities::{Effect, Entity, EntityId, GroupId, Rules};
use crate::render::RenderGroup;

#[derive(Debug)]
pub(crate) enum Members {
    Plain(Vec<EntityId>),
    Single(Option<EntityId>),
    Render(RenderGroup),
}

impl Members {
    fn ids(&self) -> Vec<EntityId> {
        match self {
            Members::Plain(ids) => ids.clone(),
            Members::Single(slot) => slot.iter().copied().collect(),
            Members::Render(render) => render.members.clone(),
        }
    }

    fn contains(&self, id: EntityId) -> bool {
        match self {
            Members::Plain(ids) => ids.contains(&id),
            Members::Single(slot) => *slot == Some(id),
            Members::Render(render) => render.members.contains(&id),
        }
    }
}

#[derive(Debug, Default)]
pub struct World {
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) groups: Vec<Members>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        World::default()
    }

    // ── Groups ───────────────────────────────────────────────────────────────

    pub fn new_group(&mut self) -> GroupId {
        self.push_group(Members::Plain(Vec::new()))
    }

    /// A group that holds at most one entity.
    pub fn new_single(&mut self) -> GroupId {
        self.push_group(Members::Single(None))
    }

    /// A group that also tracks where each member was last drawn.
    pub fn new_render_group(&mut self) -> GroupId {
        self.push_group(Members::Render(RenderGroup::default()))
    }

    fn push_group(&mut self, members: Members) -> GroupId {
        self.groups.push(members);
        GroupId(self.groups.len() - 1)
    }

    // ── Lifetime ─────────────────────────────────────────────────────────────

    /// Store `entity` and add it to each of `groups`.  An entity spawned into
    /// no groups is dead on arrival.
    pub fn spawn(&mut self, entity: Entity, groups: &[GroupId]) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        for &group in groups {
            self.join(id, group);
        }
        id
    }

    /// Add a live entity to `group`.  Adding to a single-slot group evicts
    /// its occupant from that slot only.
    pub fn add(&mut self, id: EntityId, group: GroupId) {
        if self.is_alive(id) {
            self.join(id, group);
        }
    }

    fn join(&mut self, id: EntityId, group: GroupId) {
        let Some(members) = self.groups.get_mut(group.0) else {
            return;
        };
        if members.contains(id) {
            return;
        }
        let evicted = match members {
            Members::Plain(ids) => {
                ids.push(id);
                None
            }
            Members::Single(slot) => slot.replace(id),
            Members::Render(render) => {
                render.members.push(id);
                None
            }
        };
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.groups.push(group);
        }
        if let Some(old) = evicted {
            if let Some(entity) = self.entities.get_mut(&old) {
                entity.groups.retain(|&g| g != group);
            }
        }
    }

    /// Take `id` out of `group`.  No-op if it was not a member.
    pub fn remove(&mut self, id: EntityId, group: GroupId) {
        let Some(members) = self.groups.get_mut(group.0) else {
            return;
        };
        let removed = match members {
            Members::Plain(ids) => remove_id(ids, id),
            Members::Single(slot) => {
                if *slot == Some(id) {
                    *slot = None;
                    true
                } else {
                    false
                }
            }
            Members::Render(render) => render.forget(id),
        };
        if removed {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.groups.retain(|&g| g != group);
            }
        }
    }

    /// Remove `id` from every group it belongs to.  Killing a dead entity
    /// does nothing.
    pub fn kill(&mut self, id: EntityId) {
        let groups = match self.entities.get(&id) {
            Some(entity) => entity.groups.clone(),
            None => return,
        };
        for group in groups {
            self.remove(id, group);
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities
            .get(&id)
            .is_some_and(|entity| !entity.groups.is_empty())
    }

    /// Drop the bodies of destroyed entities.  Called once per tick after
    /// drawing.
    pub fn reap(&mut self) {
        let before = self.entities.len();
        self.entities.retain(|_, entity| !entity.groups.is_empty());
        let reaped = before - self.entities.len();
        if reaped > 0 {
            trace!(reaped, "reaped dead entities");
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// The entity's body, live or not yet reaped.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// A copy of `group`'s membership, safe to hold across mutation.
    pub fn members(&self, group: GroupId) -> Vec<EntityId> {
        self.groups
            .get(group.0)
            .map(Members::ids)
            .unwrap_or_default()
    }

    pub fn len(&self, group: GroupId) -> usize {
        match self.groups.get(group.0) {
            Some(Members::Plain(ids)) => ids.len(),
            Some(Members::Single(slot)) => usize::from(slot.is_some()),
            Some(Members::Render(render)) => render.members.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self, group: GroupId) -> bool {
        self.len(group) == 0
    }

    pub fn contains(&self, group: GroupId, id: EntityId) -> bool {
        self.groups
            .get(group.0)
            .is_some_and(|members| members.contains(id))
    }

    /// The occupant of a single-slot group.
    pub fn single(&self, group: GroupId) -> Option<EntityId> {
        match self.groups.get(group.0) {
            Some(Members::Single(slot)) => *slot,
            _ => None,
        }
    }

    /// Live entity count across the whole world.
    pub fn live_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| !entity.groups.is_empty())
            .count()
    }

    // ── Update pass ──────────────────────────────────────────────────────────

    /// Update every member of `group`.  Membership is copied first: anything
    /// spawned during the pass waits for the next one, and anything killed
    /// during the pass is skipped when its turn comes.
    pub fn update_all(&mut self, group: GroupId, rules: Rules) {
        for id in self.members(group) {
            if !self.is_alive(id) {
                continue;
            }
            let effects = match self.entities.get_mut(&id) {
                Some(entity) => entity.update(rules),
                None => continue,
            };
            for effect in effects {
                match effect {
                    Effect::Kill => self.kill(id),
                    Effect::Spawn(entity, groups) => {
                        self.spawn(entity, &groups);
                    }
                }
            }
        }
    }
}

fn remove_id(ids: &mut Vec<EntityId>, id: EntityId) -> bool {
    match ids.iter().position(|&other| other == id) {
        Some(index) => {
            ids.remove(index);
            true
        }
        None => false,
    }
}
