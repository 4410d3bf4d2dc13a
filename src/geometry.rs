//! Integer axis-aligned rectangles: the shape every entity is drawn and
//! collided with.

/// The fixed simulation and render area.
pub const PLAYFIELD: Rect = Rect::new(0, 0, 640, 480);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    // ── Edges & anchors ──────────────────────────────────────────────────────

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.centerx(), self.centery())
    }

    pub fn midbottom(&self) -> (i32, i32) {
        (self.centerx(), self.bottom())
    }

    /// A `w`×`h` rect whose midbottom sits at `(x, y)`.
    pub fn with_midbottom(w: i32, h: i32, (x, y): (i32, i32)) -> Self {
        Rect::new(x - w / 2, y - h, w, h)
    }

    /// A `w`×`h` rect whose center sits at `(x, y)`.
    pub fn with_center(w: i32, h: i32, (x, y): (i32, i32)) -> Self {
        Rect::new(x - w / 2, y - h / 2, w, h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    // ── Transforms ───────────────────────────────────────────────────────────

    pub fn move_by(&self, dx: i32, dy: i32) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Move this rect inside `area`.  When it is larger than `area` along an
    /// axis it is centered on that axis instead.
    pub fn clamp(&self, area: &Rect) -> Self {
        let x = if self.w >= area.w {
            area.x + area.w / 2 - self.w / 2
        } else {
            self.x.max(area.x).min(area.right() - self.w)
        };
        let y = if self.h >= area.h {
            area.y + area.h / 2 - self.h / 2
        } else {
            self.y.max(area.y).min(area.bottom() - self.h)
        };
        Rect::new(x, y, self.w, self.h)
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    /// True when `other` lies entirely within `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Non-zero area overlap.  Touching edges do not collide.
    pub fn collides(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
