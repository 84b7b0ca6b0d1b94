//! The rendering side of the console.
//!
//! Drawing itself lives outside this crate; the dispatcher only needs
//! somewhere to send camera and light changes and a per-frame draw call.

use glam::Vec3;
use std::fmt;
use tracing::{debug, trace};

use game_state::GameCoordinator;

/// A point given as polar angle `theta`, azimuth `phi` (both in degrees) and
/// radius `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub theta: f32,
    pub phi: f32,
    pub r: f32,
}

impl Spherical {
    pub fn new(theta: f32, phi: f32, r: f32) -> Self {
        Self { theta, phi, r }
    }

    /// `(r sin θ cos φ, r sin θ sin φ, r cos θ)`, z up.
    pub fn to_cartesian(&self) -> Vec3 {
        let theta = self.theta.to_radians();
        let phi = self.phi.to_radians();
        Vec3::new(
            self.r * theta.sin() * phi.cos(),
            self.r * theta.sin() * phi.sin(),
            self.r * theta.cos(),
        )
    }
}

impl fmt::Display for Spherical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.theta, self.phi, self.r)
    }
}

/// Camera, lighting and drawing.
pub trait Scene {
    fn set_camera(&mut self, view: Spherical);

    fn set_light_position(&mut self, position: Vec3);

    /// Intensity in `[0, 1]`.
    fn set_light_power(&mut self, power: f32);

    /// Render one frame of the board as it stands.
    fn draw(&mut self, game: &GameCoordinator);
}

/// A scene that only remembers what it was told.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessScene {
    pub camera: Spherical,
    pub light_position: Vec3,
    pub light_power: f32,
    pub frames_drawn: u64,
    /// Pieces visible in the last drawn frame
    pub visible_pieces: usize,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self {
            camera: Spherical::new(90.0, -90.0, 10.0),
            light_position: Vec3::new(0.0, 0.0, 15.0),
            light_power: 1.0,
            frames_drawn: 0,
            visible_pieces: 0,
        }
    }
}

impl Scene for HeadlessScene {
    fn set_camera(&mut self, view: Spherical) {
        debug!(%view, "camera moved");
        self.camera = view;
    }

    fn set_light_position(&mut self, position: Vec3) {
        debug!(%position, "light moved");
        self.light_position = position;
    }

    fn set_light_power(&mut self, power: f32) {
        debug!(power, "light power changed");
        self.light_power = power;
    }

    fn draw(&mut self, game: &GameCoordinator) {
        self.frames_drawn += 1;
        self.visible_pieces = game.active_pieces().count();
        trace!(
            frame = self.frames_drawn,
            pieces = self.visible_pieces,
            moving = game.movements().len(),
            "frame"
        );
    }
}
