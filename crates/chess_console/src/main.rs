//! chess3d console
//!
//! Play against a UCI engine by typing commands:
//!
//! ```text
//! move e2e4
//! camera <theta> <phi> <r>
//! light <theta> <phi> <r>
//! power <0-100>
//! quit
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chess_console::{run, spawn_stdin_reader, ConsoleConfig, FrameLoop, GameContext, HeadlessScene};
use game_state::GameCoordinator;
use uci_client::{EngineClient, EngineWorker, SearchLimits};

#[derive(Parser, Debug)]
#[command(name = "chess3d")]
#[command(about = "Play chess against a UCI engine on a 3D board")]
struct Args {
    /// Config file (defaults to ./chess3d.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Engine executable, overrides the config file
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Search depth per engine move
    #[arg(long, conflicts_with = "movetime")]
    depth: Option<u8>,

    /// Thinking time per engine move, in milliseconds
    #[arg(long)]
    movetime: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut client = EngineClient::new(config.engine.clone());
    client
        .initialize()
        .with_context(|| format!("failed to start engine {}", config.engine.path.display()))?;
    let worker = EngineWorker::spawn(client).context("failed to start engine worker")?;

    let mut game = GameCoordinator::new(config.board, config.animation.clone());
    game.setup_standard().context("failed to set up the board")?;
    game.set_capture_observer(|piece| info!(piece, "removing captured piece from scene"));

    let mut ctx = GameContext::new(game, worker, HeadlessScene::default());
    let mut lines = spawn_stdin_reader().context("failed to read stdin")?;
    let mut frames = FrameLoop::new(config.frame.fps);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "Commands: move <e2e4> | camera <theta> <phi> <r> | light <theta> <phi> <r> | power <0-100> | quit"
    )?;
    out.flush()?;

    let session = run(&mut ctx, &mut lines, &mut frames, &mut out);
    if let Err(err) = ctx.shutdown() {
        warn!(%err, "engine did not shut down cleanly");
    }
    session.context("console output failed")
}

fn load_config(args: &Args) -> Result<ConsoleConfig> {
    let mut config = match &args.config {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::discover()?,
    };

    if let Some(engine) = &args.engine {
        config.engine.path = engine.clone();
    }
    if let Some(depth) = args.depth {
        config.engine.search = SearchLimits::depth(depth);
    }
    if let Some(ms) = args.movetime {
        config.engine.search = SearchLimits::time(Duration::from_millis(ms));
    }
    config.validate()?;

    info!(
        engine = %config.engine.path.display(),
        search = %config.engine.search.go_command(),
        fps = config.frame.fps,
        "configuration"
    );
    Ok(config)
}
