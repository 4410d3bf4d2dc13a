//! Entity kinds and their per-tick behavior.
//!
//! An entity never touches the groups it belongs to directly.  `update`
//! returns the `Effect`s it wants applied and the `World` carries them out,
//! so a self-kill or a spawn during an update pass is always routed through
//! the same membership bookkeeping as any other kill or spawn.

use rand::Rng;

use crate::assets::{AssetTable, ImageHandle};
use crate::config::GameConfig;
use crate::geometry::{Rect, PLAYFIELD};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) usize);

/// Read-only context every update and constructor sees.
#[derive(Clone, Copy)]
pub struct Rules<'a> {
    pub assets: &'a AssetTable,
    pub config: &'a GameConfig,
}

#[derive(Debug)]
pub enum Effect {
    /// Remove the updating entity from every group.
    Kill,
    /// Create a new entity in the listed groups.
    Spawn(Entity, Vec<GroupId>),
}

// ── Kind state ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Last nonzero direction moved, -1 or 1.
    pub facing: i32,
    /// Fire-button state seen on the previous tick.
    pub reloading: bool,
    /// Resting top edge; the bob is measured from here.
    pub origtop: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    /// Signed horizontal speed.
    pub velocity: i32,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub life: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    /// Where the explosion goes when the bomb hits the ground.
    pub explosion_group: GroupId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Player(Player),
    Alien(Alien),
    Explosion(Explosion),
    Shot,
    Bomb(Bomb),
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub image: ImageHandle,
    pub rect: Rect,
    pub kind: Kind,
    /// Non-owning back-references, kept in step by `World`.
    pub(crate) groups: Vec<GroupId>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl Entity {
    fn new(image: ImageHandle, rect: Rect, kind: Kind) -> Self {
        Entity {
            image,
            rect,
            kind,
            groups: Vec::new(),
        }
    }

    /// The player, parked at the playfield's bottom middle, facing left.
    pub fn player(rules: Rules) -> Self {
        let image = rules.assets.player[0];
        let rect = Rect::with_midbottom(image.width, image.height, PLAYFIELD.midbottom());
        Entity::new(
            image,
            rect,
            Kind::Player(Player {
                facing: -1,
                reloading: false,
                origtop: rect.top(),
            }),
        )
    }

    /// An alien entering at the top, heading a random way.  Leftward
    /// aliens start flush with the right edge.
    pub fn alien(rules: Rules, rng: &mut impl Rng) -> Self {
        let image = rules.assets.alien[0];
        let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
        let velocity = sign * rules.config.alien_speed;
        let mut rect = Rect::new(0, 0, image.width, image.height);
        if velocity < 0 {
            rect.x = PLAYFIELD.right() - rect.w;
        }
        Entity::new(image, rect, Kind::Alien(Alien { velocity, frame: 0 }))
    }

    /// An explosion centered on `actor`.
    pub fn explosion(rules: Rules, actor: &Rect) -> Self {
        let image = rules.assets.explosion[0];
        let rect = Rect::with_center(image.width, image.height, actor.center());
        Entity::new(
            image,
            rect,
            Kind::Explosion(Explosion {
                life: rules.config.explosion_life,
            }),
        )
    }

    /// A shot whose midbottom sits at `pos`.
    pub fn shot(rules: Rules, pos: (i32, i32)) -> Self {
        let image = rules.assets.shot;
        let rect = Rect::with_midbottom(image.width, image.height, pos);
        Entity::new(image, rect, Kind::Shot)
    }

    /// A bomb dropped just below `alien`.
    pub fn bomb(rules: Rules, alien: &Rect, explosion_group: GroupId) -> Self {
        let image = rules.assets.bomb;
        let rect = Rect::with_midbottom(image.width, image.height, alien.move_by(0, 5).midbottom());
        Entity::new(image, rect, Kind::Bomb(Bomb { explosion_group }))
    }
}

// ── Behavior ─────────────────────────────────────────────────────────────────

impl Entity {
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Advance one tick.
    pub fn update(&mut self, rules: Rules) -> Vec<Effect> {
        let config = rules.config;
        match &mut self.kind {
            // Driven by `steer` instead.
            Kind::Player(_) => Vec::new(),

            Kind::Alien(alien) => {
                self.rect = self.rect.move_by(alien.velocity, 0);
                if !PLAYFIELD.contains(&self.rect) {
                    alien.velocity = -alien.velocity;
                    self.rect.y = self.rect.bottom() + 1;
                    self.rect = self.rect.clamp(&PLAYFIELD);
                }
                alien.frame += 1;
                let index = (alien.frame / config.alien_animcycle) as usize % 3;
                self.image = rules.assets.alien[index];
                Vec::new()
            }

            Kind::Explosion(explosion) => {
                explosion.life = explosion.life.saturating_sub(1);
                let index = (explosion.life / config.explosion_animcycle) as usize % 2;
                self.image = rules.assets.explosion[index];
                if explosion.life == 0 {
                    vec![Effect::Kill]
                } else {
                    Vec::new()
                }
            }

            Kind::Shot => {
                self.rect = self.rect.move_by(0, -config.shot_speed);
                if self.rect.top() <= PLAYFIELD.top() {
                    vec![Effect::Kill]
                } else {
                    Vec::new()
                }
            }

            Kind::Bomb(bomb) => {
                self.rect = self.rect.move_by(0, config.bomb_speed);
                if self.rect.bottom() >= config.bomb_floor {
                    let blast = Entity::explosion(rules, &self.rect);
                    vec![Effect::Spawn(blast, vec![bomb.explosion_group]), Effect::Kill]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Move the player by `direction` (-1, 0 or 1) steps.  No-op for other
    /// kinds.
    pub fn steer(&mut self, rules: Rules, direction: i32) {
        let Kind::Player(player) = &mut self.kind else {
            return;
        };
        let config = rules.config;
        if direction != 0 {
            player.facing = direction.signum();
        }
        self.rect = self
            .rect
            .move_by(direction * config.player_speed, 0)
            .clamp(&PLAYFIELD);
        if direction < 0 {
            self.image = rules.assets.player[0];
        } else if direction > 0 {
            self.image = rules.assets.player[1];
        }
        self.rect.y = player.origtop - (self.rect.left().div_euclid(config.player_bounce) % 2);
    }

    /// Where a new shot leaves the player's gun.
    pub fn gunpos(&self, config: &GameConfig) -> Option<(i32, i32)> {
        match &self.kind {
            Kind::Player(player) => Some((
                player.facing * config.gun_offset + self.rect.centerx(),
                self.rect.top(),
            )),
            _ => None,
        }
    }

    /// Record this tick's fire-button state and report whether it is a
    /// fresh press.  The caller still has to check the shot cap.
    pub fn trigger(&mut self, firing: bool) -> bool {
        match &mut self.kind {
            Kind::Player(player) => {
                let fresh = firing && !player.reloading;
                player.reloading = firing;
                fresh
            }
            _ => false,
        }
    }
}
