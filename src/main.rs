mod display;
mod keyboard;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use alien_raid::assets::AssetTable;
use alien_raid::clock::{Clock, SystemTime};
use alien_raid::config::GameConfig;
use alien_raid::game::{Game, GameLoop, Outcome, Stage};

use crate::display::{GlyphSheet, Screen};
use crate::keyboard::Keyboard;

#[derive(Parser)]
#[command(name = "alien_raid")]
#[command(about = "Side-scrolling alien shooter for the terminal")]
struct Args {
    /// How much of the game to run
    #[arg(short, long, value_enum, default_value = "bombs")]
    stage: Stage,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the tuning constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target ticks per second (overrides the config file)
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs here; the terminal itself belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    let config = load_config(&args)?;

    // Assets load before the terminal is touched; a missing sprite aborts
    // with the screen still intact.
    let mut sheet = GlyphSheet::new();
    let assets = AssetTable::load(&mut sheet).context("loading sprites")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(stage = ?args.stage, seed = ?args.seed, "starting");

    let (width, height) = terminal::size().context("reading terminal size")?;
    if !display::fits(width, height) {
        let (cols, rows) = display::MIN_SIZE;
        bail!("terminal is {width}x{height}; the game needs at least {cols}x{rows}");
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, sheet, assets, config, args.stage, rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();

    match result? {
        Outcome::PlayerDied => println!("Game over."),
        Outcome::Quit => {}
    }
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    sheet: GlyphSheet,
    assets: AssetTable,
    config: GameConfig,
    stage: Stage,
    rng: StdRng,
) -> Result<Outcome> {
    let clock = Clock::new(config.fps, SystemTime::new());
    let mut game = Game::new(stage, assets, config, rng)?;
    let mut screen = Screen::new(out, sheet);
    let mut game_loop = GameLoop::new(Keyboard::spawn(), clock);
    let outcome = game_loop.run(&mut game, &mut screen)?;
    Ok(outcome)
}
