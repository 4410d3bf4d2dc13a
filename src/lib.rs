//! A small arcade engine: entities that live in groups, die when they leave
//! the last one, collide as rectangles and are repainted only where they
//! changed.

pub mod assets;
pub mod clock;
pub mod collide;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod group;
pub mod input;
pub mod render;

pub use error::{Error, Result};
