//! Batting Practice - a fixed-timestep arcade batting simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pitcher, ball flight, swing, collisions)
//! - `clock`: Accumulator-driven fixed timestep
//! - `session`: Session lifecycle and the effect boundary (audio, status text)
//! - `settings`: JSON configuration

pub mod audio;
pub mod clock;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod status;

pub use clock::FixedTimestep;
pub use highscores::HighScores;
pub use session::{Session, Snapshot};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants (milliseconds and playfield pixels)
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1000.0 / 120.0;
    /// Largest frame delta fed to the accumulator (spiral-of-death guard)
    pub const MAX_FRAME_DELTA: f64 = 100.0;
    /// Reference frame duration that per-frame speeds are tuned against (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 16.667;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// How far past the sides/top a ball may travel before it is dropped
    pub const FIELD_MARGIN: f32 = 50.0;

    /// Pitcher defaults
    pub const PITCHER_Y: f32 = 150.0;
    pub const PITCHER_SIZE: f32 = 32.0;
    pub const PITCHER_IDLE_MS: f32 = 1500.0;
    pub const PITCHER_WINDUP_MS: f32 = 1000.0;

    /// Bat defaults - pivot sits left of the plate, above the bottom edge
    pub const BAT_PIVOT_X_OFFSET: f32 = -40.0;
    pub const BAT_PIVOT_Y_OFFSET: f32 = -120.0;
    pub const BAT_LENGTH: f32 = 50.0;
    pub const BAT_WIDTH: f32 = 12.0;
    /// Radians per reference frame (negative = counter-clockwise on screen)
    pub const BAT_SWING_SPEED: f32 = -0.3;
    pub const BAT_START_ANGLE: f32 = 0.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Exit speed after contact, pixels per reference frame
    pub const EXIT_SPEED: f32 = 12.0;

    /// Slope of the drawn foul lines (rise per unit run from home plate)
    pub const FOUL_LINE_SLOPE: f32 = 1.5;
    /// Good hits stay this far inside the foul lines
    pub const FAIR_SAFETY_MARGIN: f32 = 0.1;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Shortest unsigned angular distance between two angles, in [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    if diff > PI { TAU - diff } else { diff }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
