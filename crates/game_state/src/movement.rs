//! In-flight piece animations.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Timing and matching constants for move animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Seconds a move takes from start to end
    pub movement_duration: f32,
    /// Peak height of a knight's jump
    pub knight_arc_height: f32,
    /// Distance under which a piece counts as standing on a square
    pub tolerance: f32,
    /// Identifier fragments that mark a piece as a knight
    pub knight_markers: Vec<String>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            movement_duration: 2.0,
            knight_arc_height: 2.0,
            tolerance: 0.1,
            knight_markers: vec!["KNIGHT".to_string(), "CAVALLO".to_string()],
        }
    }
}

impl AnimationSettings {
    pub fn is_knight(&self, piece_id: &str) -> bool {
        self.knight_markers
            .iter()
            .any(|marker| piece_id.contains(marker.as_str()))
    }
}

/// One piece travelling from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub piece_id: String,
    pub start: Vec3,
    pub end: Vec3,
    /// Fraction of the move done, in `[0, 1]`
    pub progress: f32,
    /// Jump along a sine arc instead of sliding
    pub is_arcing: bool,
    pub is_capture: bool,
}

impl Movement {
    /// Advance by `delta` seconds. Progress never decreases and stops at 1.
    pub fn advance(&mut self, delta: f32, duration: f32) {
        let step = if duration > 0.0 {
            delta.max(0.0) / duration
        } else {
            1.0
        };
        self.progress = (self.progress + step).min(1.0);
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Position at the current progress; exactly `end` once complete.
    pub fn current_position(&self, arc_height: f32) -> Vec3 {
        if self.is_complete() {
            return self.end;
        }
        let mut pos = self.start.lerp(self.end, self.progress);
        if self.is_arcing {
            pos.z += arc_height * (PI * self.progress).sin();
        }
        pos
    }
}
