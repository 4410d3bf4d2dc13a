//! One game session and the loop that drives it.
//!
//! A tick always runs in the same order: erase → update → input → spawn →
//! collide → draw → present → pace.  Entities killed during collision are
//! therefore erased from where they were last tick and never drawn again.

use rand::Rng;
use tracing::{debug, info};

use crate::assets::AssetTable;
use crate::clock::{Clock, TimeSource};
use crate::collide::{match_groups, match_one};
use crate::config::GameConfig;
use crate::entities::{Entity, EntityId, GroupId, Rules};
use crate::error::Result;
use crate::geometry::{Rect, PLAYFIELD};
use crate::group::World;
use crate::input::{InputSource, KeyState};
use crate::render::{Background, Surface};

// ── Stages ───────────────────────────────────────────────────────────────────

/// The game grows one feature per stage; every stage includes the ones
/// before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Stage {
    /// Empty playfield: quit handling and pacing only.
    Blank,
    /// Tiled background.
    Background,
    /// A player that moves left and right.
    Player,
    /// Aliens, explosions and player-vs-alien collisions.
    Aliens,
    /// Shots and bombs: the full shooter.
    Bombs,
}

impl Stage {
    pub fn has_background(self) -> bool {
        self >= Stage::Background
    }

    pub fn has_player(self) -> bool {
        self >= Stage::Player
    }

    pub fn has_aliens(self) -> bool {
        self >= Stage::Aliens
    }

    pub fn has_weapons(self) -> bool {
        self >= Stage::Bombs
    }
}

// ── Session state ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Groups {
    /// Everything on screen; the render group.
    pub all: GroupId,
    pub aliens: GroupId,
    pub shots: GroupId,
    pub bombs: GroupId,
    /// The most recently spawned alien, which drops the bombs.
    pub last_alien: GroupId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    PlayerDied,
}

#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub dirty: Vec<Rect>,
    pub aliens_spawned: usize,
    pub bombs_dropped: usize,
    pub aliens_destroyed: usize,
    pub explosions_spawned: usize,
}

pub struct Game<R: Rng> {
    pub world: World,
    pub groups: Groups,
    pub player: Option<EntityId>,
    pub stage: Stage,
    pub frame: u64,
    assets: AssetTable,
    config: GameConfig,
    rng: R,
    alien_reload: u32,
}

impl<R: Rng> Game<R> {
    /// Fresh state for `stage`: the player (if the stage has one) and a first
    /// alien (if the stage has aliens).  Fails if `config` does not validate.
    pub fn new(stage: Stage, assets: AssetTable, config: GameConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let mut world = World::new();
        let groups = Groups {
            all: world.new_render_group(),
            aliens: world.new_group(),
            shots: world.new_group(),
            bombs: world.new_group(),
            last_alien: world.new_single(),
        };
        let rules = Rules {
            assets: &assets,
            config: &config,
        };

        let player = stage
            .has_player()
            .then(|| world.spawn(Entity::player(rules), &[groups.all]));
        if stage.has_aliens() {
            let alien = Entity::alien(rules, &mut rng);
            world.spawn(alien, &[groups.aliens, groups.all, groups.last_alien]);
        }

        let alien_reload = config.alien_reload;
        Ok(Game {
            world,
            groups,
            player,
            stage,
            frame: 0,
            assets,
            config,
            rng,
            alien_reload,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn background(&self) -> Background {
        if self.stage.has_background() {
            Background::Tiled(self.assets.background)
        } else {
            Background::Blank
        }
    }

    /// True once a stage with a player has lost it.
    pub fn is_over(&self) -> bool {
        self.player.is_some_and(|id| !self.world.is_alive(id))
    }

    /// Paint the whole background and show it.  Runs once before the first
    /// tick.
    pub fn start(&mut self, surface: &mut impl Surface) -> Result<()> {
        surface.erase(&self.background(), PLAYFIELD);
        surface.present_all()?;
        Ok(())
    }

    /// One simulation + render step.  Quit handling and pacing belong to
    /// the caller.
    pub fn tick(&mut self, keys: KeyState, surface: &mut impl Surface) -> Result<TickReport> {
        let mut report = TickReport::default();
        let background = self.background();
        let all = self.groups.all;

        // ── 1. Erase last frame ──────────────────────────────────────────────
        self.world.erase(all, surface, &background);

        // ── 2. Update every live entity ──────────────────────────────────────
        let rules = Rules {
            assets: &self.assets,
            config: &self.config,
        };
        self.world.update_all(all, rules);

        // ── 3. Player input ──────────────────────────────────────────────────
        self.apply_input(keys);

        // ── 4. Spawn rules ───────────────────────────────────────────────────
        if self.stage.has_aliens() {
            self.spawn_aliens(&mut report);
        }
        if self.stage.has_weapons() {
            self.drop_bombs(&mut report);
        }

        // ── 5. Collisions ────────────────────────────────────────────────────
        self.resolve_collisions(&mut report);

        // ── 6. Draw & present ────────────────────────────────────────────────
        report.dirty = self.world.draw(all, surface);
        surface.present(&report.dirty)?;

        self.world.reap();
        self.frame += 1;
        Ok(report)
    }

    fn apply_input(&mut self, keys: KeyState) {
        let Some(id) = self.player.filter(|&id| self.world.is_alive(id)) else {
            return;
        };
        let rules = Rules {
            assets: &self.assets,
            config: &self.config,
        };
        let live_shots = self.world.len(self.groups.shots);
        let Some(player) = self.world.get_mut(id) else {
            return;
        };
        player.steer(rules, keys.direction());

        if !self.stage.has_weapons() {
            return;
        }
        let fresh = player.trigger(keys.fire);
        if fresh && live_shots < self.config.max_shots {
            if let Some(pos) = player.gunpos(&self.config) {
                let shot = Entity::shot(rules, pos);
                self.world.spawn(shot, &[self.groups.shots, self.groups.all]);
            }
        }
    }

    fn spawn_aliens(&mut self, report: &mut TickReport) {
        if self.alien_reload > 0 {
            self.alien_reload -= 1;
            return;
        }
        if !self.rng.gen_ratio(1, self.config.alien_odds) {
            return;
        }
        let rules = Rules {
            assets: &self.assets,
            config: &self.config,
        };
        let alien = Entity::alien(rules, &mut self.rng);
        let g = self.groups;
        let id = self.world.spawn(alien, &[g.aliens, g.all, g.last_alien]);
        self.alien_reload = self.config.alien_reload;
        report.aliens_spawned += 1;
        debug!(?id, frame = self.frame, "alien spawned");
    }

    fn drop_bombs(&mut self, report: &mut TickReport) {
        let Some(alien) = self.world.single(self.groups.last_alien) else {
            return;
        };
        if !self.rng.gen_ratio(1, self.config.bomb_odds) {
            return;
        }
        let Some(rect) = self.world.get(alien).map(|entity| entity.rect) else {
            return;
        };
        let rules = Rules {
            assets: &self.assets,
            config: &self.config,
        };
        let g = self.groups;
        let bomb = Entity::bomb(rules, &rect, g.all);
        self.world.spawn(bomb, &[g.bombs, g.all]);
        report.bombs_dropped += 1;
    }

    /// Fixed order: player-vs-aliens, shots-vs-aliens, bombs-vs-player.
    /// Anything killed by an earlier rule is invisible to the later ones.
    fn resolve_collisions(&mut self, report: &mut TickReport) {
        let g = self.groups;

        if let Some(player) = self.player {
            for alien in match_one(&mut self.world, player, g.aliens, true) {
                self.explode(alien, report);
                self.explode(player, report);
                self.world.kill(player);
                report.aliens_destroyed += 1;
                info!(frame = self.frame, "player rammed by alien");
            }
        }

        if self.stage.has_weapons() {
            let crashed = match_groups(&mut self.world, g.aliens, g.shots, true, true);
            for &alien in crashed.keys() {
                self.explode(alien, report);
                report.aliens_destroyed += 1;
            }
            if !crashed.is_empty() {
                debug!(frame = self.frame, hits = crashed.len(), "aliens shot down");
            }

            if let Some(player) = self.player {
                for bomb in match_one(&mut self.world, player, g.bombs, true) {
                    self.explode(player, report);
                    self.explode(bomb, report);
                    self.world.kill(player);
                    info!(frame = self.frame, "player bombed");
                }
            }
        }
    }

    /// An explosion over wherever `actor` last was.
    fn explode(&mut self, actor: EntityId, report: &mut TickReport) {
        let Some(rect) = self.world.get(actor).map(|entity| entity.rect) else {
            return;
        };
        let rules = Rules {
            assets: &self.assets,
            config: &self.config,
        };
        self.world
            .spawn(Entity::explosion(rules, &rect), &[self.groups.all]);
        report.explosions_spawned += 1;
    }
}

// ── Loop ─────────────────────────────────────────────────────────────────────

pub struct GameLoop<I: InputSource, T: TimeSource> {
    input: I,
    clock: Clock<T>,
}

impl<I: InputSource, T: TimeSource> GameLoop<I, T> {
    pub fn new(input: I, clock: Clock<T>) -> Self {
        GameLoop { input, clock }
    }

    pub fn clock(&self) -> &Clock<T> {
        &self.clock
    }

    /// Run `game` until the player dies or quit is signalled.  The session
    /// is one-shot: to play again, build a fresh `Game`.
    pub fn run<R: Rng>(&mut self, game: &mut Game<R>, surface: &mut impl Surface) -> Result<Outcome> {
        info!(stage = ?game.stage, "session started");
        game.start(surface)?;
        self.clock.tick();

        let outcome = loop {
            let keys = self.input.poll();
            if keys.quit {
                break Outcome::Quit;
            }
            game.tick(keys, surface)?;
            self.clock.tick();
            if game.is_over() {
                break Outcome::PlayerDied;
            }
        };

        info!(
            ?outcome,
            ticks = game.frame,
            fps = self.clock.fps(),
            "session ended"
        );
        Ok(outcome)
    }
}
