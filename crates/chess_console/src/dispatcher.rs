//! Routes operator commands to the game, the engine and the scene.
//!
//! Input mistakes and engine failures are reported on the output stream and
//! never end the session; only `quit` does.

use std::io::{self, Write};

use tracing::{debug, warn};

use game_state::GameCoordinator;
use uci_client::{EngineError, EngineWorker};

use crate::command::Command;
use crate::scene::Scene;

/// Asynchronous move exchange with an engine.
pub trait EngineLink {
    /// Send the operator's move. At most one request may be outstanding.
    fn submit(&mut self, mv: &str) -> Result<(), EngineError>;

    /// The engine's reply, if it has arrived. Never blocks.
    fn try_reply(&mut self) -> Option<Result<String, EngineError>>;

    fn is_busy(&self) -> bool;

    fn shutdown(&mut self) -> Result<(), EngineError>;
}

impl EngineLink for EngineWorker {
    fn submit(&mut self, mv: &str) -> Result<(), EngineError> {
        EngineWorker::submit(self, mv)
    }

    fn try_reply(&mut self) -> Option<Result<String, EngineError>> {
        EngineWorker::try_reply(self)
    }

    fn is_busy(&self) -> bool {
        EngineWorker::is_busy(self)
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        EngineWorker::shutdown(self)
    }
}

/// Whether the session goes on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a command can touch.
pub struct GameContext<E, S> {
    game: GameCoordinator,
    engine: E,
    scene: S,
    engine_closed: bool,
}

impl<E: EngineLink, S: Scene> GameContext<E, S> {
    pub fn new(game: GameCoordinator, engine: E, scene: S) -> Self {
        Self {
            game,
            engine,
            scene,
            engine_closed: false,
        }
    }

    pub fn game(&self) -> &GameCoordinator {
        &self.game
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Parse and run one input line.
    pub fn dispatch(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(%err, line, "rejected command");
                writeln!(out, "Invalid command or move: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Move(mv) => self.play(&mv, out)?,
            Command::Camera(view) => {
                self.scene.set_camera(view);
                writeln!(out, "Camera set to: {view}")?;
            }
            Command::Light(spot) => {
                let position = spot.to_cartesian();
                self.scene.set_light_position(position);
                writeln!(
                    out,
                    "Light position set to: {}, {}, {}",
                    position.x, position.y, position.z
                )?;
            }
            Command::Power(percent) => {
                self.scene.set_light_power(percent / 100.0);
                writeln!(out, "Light power set to: {percent}")?;
            }
            Command::Quit => {
                writeln!(out, "Thanks for playing!!")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, mv: &str, out: &mut impl Write) -> io::Result<()> {
        if self.engine.is_busy() {
            writeln!(out, "Engine is busy, wait for its reply before moving")?;
            return Ok(());
        }

        let outcome = match self.game.apply_move(mv) {
            Ok(outcome) => outcome,
            Err(err) => {
                writeln!(out, "Invalid command or move: {err}")?;
                return Ok(());
            }
        };
        if let Some(captured) = &outcome.captured {
            writeln!(out, "Captured {captured}")?;
        }

        if let Err(err) = self.engine.submit(mv) {
            warn!(%err, %mv, "engine rejected move");
            writeln!(out, "Engine error: {err}")?;
        }
        Ok(())
    }

    /// Report the engine's reply once it arrives.
    pub fn poll_engine(&mut self, out: &mut impl Write) -> io::Result<()> {
        match self.engine.try_reply() {
            Some(Ok(mv)) => writeln!(out, "Engine plays: {mv}"),
            Some(Err(err)) => writeln!(out, "Engine error: {err}"),
            None => Ok(()),
        }
    }

    /// One frame: animate, draw, pick up engine replies.
    pub fn tick(&mut self, delta: f32, out: &mut impl Write) -> io::Result<()> {
        self.game.advance_animations(delta);
        self.scene.draw(&self.game);
        self.poll_engine(out)
    }

    /// Nothing animating and no engine reply outstanding.
    pub fn is_idle(&self) -> bool {
        !self.game.is_animating() && !self.engine.is_busy()
    }

    /// Shut the engine down. Later calls do nothing.
    pub fn shutdown(&mut self) -> Result<(), EngineError> {
        if self.engine_closed {
            return Ok(());
        }
        self.engine_closed = true;
        self.engine.shutdown()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
