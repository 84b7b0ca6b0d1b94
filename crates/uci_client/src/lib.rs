//! Client side of the UCI protocol.
//!
//! Spawns an external chess engine as a child process, performs the
//! `uci`/`isready` handshake and exchanges move requests over the engine's
//! standard streams. [`EngineClient`] is the blocking session, [`EngineWorker`]
//! runs one on a background thread so a frame loop can poll for replies.
//!
//! The package also builds a `scripted_engine` binary. It is a fixture for
//! this crate's integration tests, not an engine, and is not meant to be
//! installed.

pub mod client;
pub mod config;
pub mod error;
pub mod limits;
pub mod protocol;
pub mod worker;

pub use client::{EngineClient, SessionState};
pub use config::EngineConfig;
pub use error::EngineError;
pub use limits::SearchLimits;
pub use protocol::*;
pub use worker::EngineWorker;
