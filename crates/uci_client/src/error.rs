//! Error type shared by the engine client and the background worker.

use std::io;

/// Errors that can occur while talking to the engine process
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Pipe or process creation failed
    #[error("failed to spawn engine `{path}`: {source}")]
    Spawn { path: String, source: io::Error },

    /// The engine stayed silent for the whole handshake budget
    #[error("engine never answered `{expected}` during the handshake")]
    HandshakeTimeout { expected: &'static str },

    /// The engine closed its output before acknowledging the handshake
    #[error("engine closed its output before answering `{expected}`")]
    HandshakeFailure { expected: &'static str },

    #[error("engine session already started")]
    AlreadyStarted,

    /// Session never initialized or already shut down
    #[error("engine session is not running")]
    NotRunning,

    /// A move request is still outstanding
    #[error("engine is still searching the previous move")]
    Busy,

    #[error("no search is pending")]
    NoSearchPending,

    #[error("malformed move text `{0}`")]
    InvalidMove(String),

    /// The output stream ended before a `bestmove` line arrived
    #[error("engine output ended without a bestmove")]
    NoMoveFound,

    #[error("malformed bestmove line `{0}`")]
    MalformedBestMove(String),

    /// Neither the search budget nor the grace period after `stop` produced a move
    #[error("engine produced no bestmove after {attempts} polling attempts")]
    SearchTimeout { attempts: u32 },

    /// The session hit a fatal protocol or process error earlier
    #[error("engine session faulted")]
    Faulted,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl EngineError {
    /// True when the engine itself misbehaved (died, hung or could not start),
    /// false when the caller made a mistake.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            EngineError::Spawn { .. }
                | EngineError::HandshakeTimeout { .. }
                | EngineError::HandshakeFailure { .. }
                | EngineError::NoMoveFound
                | EngineError::SearchTimeout { .. }
                | EngineError::Faulted
                | EngineError::Io(_)
        )
    }
}
