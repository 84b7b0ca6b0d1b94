//! Search limits sent with the `go` command.
//!
//! The engine is asked either for a fixed depth or for a fixed thinking time.
//! In a config file the two forms read `search = { depth = 10 }` and
//! `search = { movetime_ms = 1000 }`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long the engine may think about a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimits {
    /// Search to a fixed depth in plies (`go depth N`)
    #[serde(rename = "depth")]
    Depth(u8),
    /// Search for a fixed wall-clock time (`go movetime MS`)
    #[serde(rename = "movetime_ms")]
    MoveTime(#[serde(with = "millis")] Duration),
}

impl SearchLimits {
    /// Create limits with only depth constraint.
    pub fn depth(depth: u8) -> Self {
        SearchLimits::Depth(depth)
    }

    /// Create limits with only time constraint.
    pub fn time(move_time: Duration) -> Self {
        SearchLimits::MoveTime(move_time)
    }

    /// The `go` line for these limits.
    pub fn go_command(&self) -> String {
        match self {
            SearchLimits::Depth(depth) => format!("go depth {depth}"),
            SearchLimits::MoveTime(time) => format!("go movetime {}", time.as_millis()),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(10)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod limits_tests;
