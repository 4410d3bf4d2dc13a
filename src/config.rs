//! Tuning constants.  Fixed once the session starts.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub fps: u32,

    pub player_speed: i32,
    /// Pixels of horizontal travel per bob of the player sprite.
    pub player_bounce: i32,
    pub gun_offset: i32,

    pub alien_speed: i32,
    pub alien_animcycle: u32,
    /// 1-in-N chance per tick of a new alien once the reload countdown is spent.
    pub alien_odds: u32,
    pub alien_reload: u32,

    pub explosion_life: u32,
    pub explosion_animcycle: u32,

    pub shot_speed: i32,
    pub max_shots: usize,

    pub bomb_speed: i32,
    /// A bomb whose bottom reaches this row explodes.
    pub bomb_floor: i32,
    /// 1-in-N chance per tick that the last alien drops a bomb.
    pub bomb_odds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fps: 60,
            player_speed: 10,
            player_bounce: 24,
            gun_offset: -11,
            alien_speed: 13,
            alien_animcycle: 12,
            alien_odds: 22,
            alien_reload: 12,
            explosion_life: 12,
            explosion_animcycle: 3,
            shot_speed: 11,
            max_shots: 2,
            bomb_speed: 9,
            bomb_floor: 470,
            bomb_odds: 60,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let nonzero = [
            ("fps", self.fps),
            ("alien_animcycle", self.alien_animcycle),
            ("alien_odds", self.alien_odds),
            ("explosion_life", self.explosion_life),
            ("explosion_animcycle", self.explosion_animcycle),
            ("bomb_odds", self.bomb_odds),
        ];
        for (name, value) in nonzero {
            if value == 0 {
                return Err(Error::Config(format!("{name} must be non-zero")));
            }
        }
        if self.player_bounce <= 0 {
            return Err(Error::Config("player_bounce must be positive".into()));
        }
        Ok(())
    }
}
