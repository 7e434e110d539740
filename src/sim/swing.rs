//! Bat swing
//!
//! A swing is one uninterruptible half turn from the start angle.

use std::f32::consts::PI;

use super::state::Bat;
use crate::consts::{BAT_START_ANGLE, REFERENCE_FRAME_MS};

/// Angle at which a swing completes
pub const SWING_END_ANGLE: f32 = BAT_START_ANGLE - PI;

impl Bat {
    /// Start a swing. Returns false (and changes nothing) if already swinging.
    pub fn begin_swing(&mut self) -> bool {
        if self.swinging {
            return false;
        }
        self.swinging = true;
        self.angle = BAT_START_ANGLE;
        true
    }

    /// Rotate the bat for one tick of `dt` milliseconds
    ///
    /// Returns true on the tick the swing completes.
    pub fn advance_swing(&mut self, dt: f32) -> bool {
        if !self.swinging {
            return false;
        }
        self.angle += self.swing_speed * (dt / REFERENCE_FRAME_MS);
        if self.angle <= SWING_END_ANGLE {
            self.angle = BAT_START_ANGLE;
            self.swinging = false;
            return true;
        }
        false
    }
}
