#![allow(dead_code)]

use std::io;

use alien_raid::assets::{self, AssetProvider, AssetTable, Flip, ImageHandle};
use alien_raid::config::GameConfig;
use alien_raid::entities::{Entity, Rules};
use alien_raid::error::{Error, Result};
use alien_raid::geometry::Rect;
use alien_raid::render::{Background, Surface};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Fake assets ───────────────────────────────────────────────────────────────

/// Hands out handles with fixed sizes per image name.
#[derive(Default)]
pub struct TableAssets {
    pub next: u32,
    pub missing: Option<&'static str>,
}

impl AssetProvider for TableAssets {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle> {
        if self.missing == Some(name) {
            return Err(Error::Asset {
                name: name.to_string(),
                reason: "missing".to_string(),
            });
        }
        let (width, height) = match name {
            assets::BACKGROUND => (128, 480),
            assets::PLAYER => (40, 32),
            assets::EXPLOSION => (48, 32),
            assets::SHOT | assets::BOMB => (8, 16),
            _ => (48, 32), // aliens
        };
        self.next += 1;
        Ok(ImageHandle {
            id: self.next,
            width,
            height,
        })
    }

    fn flip(&mut self, image: ImageHandle, _flip: Flip) -> ImageHandle {
        self.next += 1;
        ImageHandle {
            id: self.next,
            ..image
        }
    }
}

pub fn asset_table() -> AssetTable {
    AssetTable::load(&mut TableAssets::default()).unwrap()
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn rules<'a>(assets: &'a AssetTable, config: &'a GameConfig) -> Rules<'a> {
    Rules { assets, config }
}

/// A shot entity moved to `rect`.  Handy as an inert collision target.
pub fn block(rules: Rules, rect: Rect) -> Entity {
    let mut entity = Entity::shot(rules, (0, 0));
    entity.rect = rect;
    entity
}

// ── Fake surface ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSurface {
    pub blits: Vec<(ImageHandle, Rect)>,
    pub erased: Vec<Rect>,
    pub presented: Vec<Vec<Rect>>,
    pub full_presents: usize,
}

impl RecordingSurface {
    pub fn clear(&mut self) {
        self.blits.clear();
        self.erased.clear();
        self.presented.clear();
    }
}

impl Surface for RecordingSurface {
    fn blit(&mut self, image: ImageHandle, at: Rect) {
        self.blits.push((image, at));
    }

    fn erase(&mut self, _background: &Background, area: Rect) {
        self.erased.push(area);
    }

    fn present(&mut self, dirty: &[Rect]) -> io::Result<()> {
        self.presented.push(dirty.to_vec());
        Ok(())
    }

    fn present_all(&mut self) -> io::Result<()> {
        self.full_presents += 1;
        Ok(())
    }
}
