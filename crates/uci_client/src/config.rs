//! Engine process settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::limits::SearchLimits;

/// How to launch the engine and how long to wait for it.
///
/// Every wait in the client is a polling loop: drain whatever lines the
/// engine produced, sleep `poll_interval_ms`, and give up after the matching
/// attempt budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine executable
    pub path: PathBuf,
    /// Extra command line arguments
    pub args: Vec<String>,
    /// Limits sent with every `go`
    pub search: SearchLimits,
    pub poll_interval_ms: u64,
    /// Budget for `uciok` and for `readyok`, each
    pub handshake_attempts: u32,
    /// Budget for `bestmove` after `go`
    pub search_attempts: u32,
    /// Extra budget for `bestmove` after the client sent `stop`
    pub stop_grace_attempts: u32,
    /// Budget for the process to exit after `quit` before it is killed
    pub shutdown_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("stockfish"),
            args: Vec::new(),
            search: SearchLimits::default(),
            poll_interval_ms: 10,
            handshake_attempts: 500,
            search_attempts: 6000,
            stop_grace_attempts: 200,
            shutdown_attempts: 100,
        }
    }
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
