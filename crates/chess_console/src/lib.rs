//! Operator console for a 3D chess board.
//!
//! Reads one command per line, applies moves to the [`game_state`] board,
//! forwards them to a UCI engine through [`uci_client`] and passes camera and
//! light changes to a [`Scene`]. A fixed-rate [`FrameLoop`] keeps the board
//! animating while the engine thinks.

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod frame;
pub mod input;
pub mod scene;

pub use command::{Command, CommandError};
pub use config::{ConfigError, ConsoleConfig, FrameConfig, DEFAULT_CONFIG_FILE};
pub use dispatcher::{EngineLink, Flow, GameContext};
pub use frame::{run, FrameLoop};
pub use input::{spawn_line_reader, spawn_stdin_reader};
pub use scene::{HeadlessScene, Scene, Spherical};
