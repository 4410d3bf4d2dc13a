//! Incremental (dirty-rect) rendering.
//!
//! Each frame runs `erase` before the simulation and `draw` after it.  Only
//! the rectangles those two calls report need to reach the screen.

use std::collections::HashMap;
use std::io;

use tracing::trace;

use crate::assets::ImageHandle;
use crate::entities::{EntityId, GroupId};
use crate::geometry::Rect;
use crate::group::{Members, World};

/// What shows through where nothing is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    Blank,
    /// One image repeated left to right along the top edge.
    Tiled(ImageHandle),
}

impl Background {
    /// Placement of every tile needed to cover `field`.
    pub fn tiles(&self, field: &Rect) -> Vec<Rect> {
        match self {
            Background::Blank => Vec::new(),
            Background::Tiled(tile) if tile.width > 0 => (field.left()..field.right())
                .step_by(tile.width as usize)
                .map(|x| Rect::new(x, field.top(), tile.width, tile.height))
                .collect(),
            Background::Tiled(_) => Vec::new(),
        }
    }
}

/// Where frames are composed and shown.
pub trait Surface {
    /// Paint `image` with its top-left corner at `at`'s.
    fn blit(&mut self, image: ImageHandle, at: Rect);

    /// Restore `area` from `background`.
    fn erase(&mut self, background: &Background, area: Rect);

    /// Push only the given regions to the display.
    fn present(&mut self, dirty: &[Rect]) -> io::Result<()>;

    /// Push the whole surface.  Used once, before the loop starts.
    fn present_all(&mut self) -> io::Result<()>;
}

// ── Render group bookkeeping ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RenderGroup {
    pub(crate) members: Vec<EntityId>,
    /// Where each member was last drawn.
    last_drawn: HashMap<EntityId, Rect>,
    /// Last-drawn rects of members that left before being erased.
    lost: Vec<Rect>,
    /// Rects erased this frame, reported by the next `draw`.
    pending: Vec<Rect>,
    erased: bool,
}

impl RenderGroup {
    /// Drop `id` from the group.  Returns whether it was a member.
    pub(crate) fn forget(&mut self, id: EntityId) -> bool {
        let Some(index) = self.members.iter().position(|&m| m == id) else {
            return false;
        };
        self.members.remove(index);
        if let Some(rect) = self.last_drawn.remove(&id) {
            // Already wiped this frame; otherwise the next erase must.
            if !self.erased {
                self.lost.push(rect);
            }
        }
        true
    }

    fn erase(&mut self, surface: &mut impl Surface, background: &Background) {
        let mut rects: Vec<Rect> = self.lost.drain(..).collect();
        rects.extend(self.members.iter().filter_map(|id| self.last_drawn.get(id)));
        for &rect in &rects {
            surface.erase(background, rect);
        }
        self.pending.extend(rects);
        self.erased = true;
    }
}

fn dedup(rects: Vec<Rect>) -> Vec<Rect> {
    let mut out: Vec<Rect> = Vec::with_capacity(rects.len());
    for rect in rects {
        if !rect.is_empty() && !out.contains(&rect) {
            out.push(rect);
        }
    }
    out
}

// ── World entry points ───────────────────────────────────────────────────────

impl World {
    /// Wipe every tracked member (and every member lost since the last
    /// erase) from `surface`.  No-op for groups that are not render groups.
    pub fn erase(&mut self, group: GroupId, surface: &mut impl Surface, background: &Background) {
        if let Some(Members::Render(render)) = self.groups.get_mut(group.0) {
            render.erase(surface, background);
        }
    }

    /// Blit every live member and return this frame's dirty rects: all
    /// erased regions plus all newly drawn ones, without duplicates.
    pub fn draw(&mut self, group: GroupId, surface: &mut impl Surface) -> Vec<Rect> {
        let Some(Members::Render(render)) = self.groups.get_mut(group.0) else {
            return Vec::new();
        };
        let mut dirty = std::mem::take(&mut render.pending);
        for &id in &render.members {
            let Some(entity) = self.entities.get(&id) else {
                continue;
            };
            surface.blit(entity.image, entity.rect);
            render.last_drawn.insert(id, entity.rect);
            dirty.push(entity.rect);
        }
        render.erased = false;

        let dirty = dedup(dirty);
        trace!(count = dirty.len(), "dirty rects");
        dirty
    }
}
