//! Image handles and the per-kind image table.
//!
//! The table is loaded once before the loop starts and handed to every
//! entity constructor; nothing in here changes afterwards.

use tracing::debug;

use crate::error::Result;

/// Opaque reference to a bitmap of known pixel size.  What `id` points at is
/// up to the `AssetProvider` that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: u32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flip {
    Horizontal,
    Both,
}

pub trait AssetProvider {
    /// Load a named image.  Failure is fatal at startup.
    fn load_image(&mut self, name: &str) -> Result<ImageHandle>;

    /// A mirrored copy of an already loaded image.
    fn flip(&mut self, image: ImageHandle, flip: Flip) -> ImageHandle;
}

// ── Asset table ───────────────────────────────────────────────────────────────

pub const BACKGROUND: &str = "background.gif";
pub const PLAYER: &str = "player1.gif";
pub const EXPLOSION: &str = "explosion1.gif";
pub const ALIENS: [&str; 3] = ["alien1.gif", "alien2.gif", "alien3.gif"];
pub const SHOT: &str = "shot.gif";
pub const BOMB: &str = "bomb.gif";

#[derive(Clone, Debug)]
pub struct AssetTable {
    pub background: ImageHandle,
    /// `[facing left, facing right]`.
    pub player: [ImageHandle; 2],
    pub alien: [ImageHandle; 3],
    pub explosion: [ImageHandle; 2],
    pub shot: ImageHandle,
    pub bomb: ImageHandle,
}

impl AssetTable {
    pub fn load(provider: &mut impl AssetProvider) -> Result<Self> {
        let background = provider.load_image(BACKGROUND)?;

        let img = provider.load_image(PLAYER)?;
        let player = [img, provider.flip(img, Flip::Horizontal)];

        let img = provider.load_image(EXPLOSION)?;
        let explosion = [img, provider.flip(img, Flip::Both)];

        let alien = [
            provider.load_image(ALIENS[0])?,
            provider.load_image(ALIENS[1])?,
            provider.load_image(ALIENS[2])?,
        ];

        let shot = provider.load_image(SHOT)?;
        let bomb = provider.load_image(BOMB)?;

        debug!("asset table loaded");
        Ok(AssetTable {
            background,
            player,
            alien,
            explosion,
            shot,
            bomb,
        })
    }
}
