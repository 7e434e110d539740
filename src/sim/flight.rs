//! Ball flight
//!
//! Pitches drop straight toward the plate except the curveball, whose
//! sideways break is a function of how far it has travelled. Keying the
//! break to progress instead of time makes every curveball trace the same
//! path whatever its speed.

use std::f32::consts::PI;

use super::state::{Ball, PitchType};

/// Peak sideways break of a curveball, in pixels
pub const CURVE_BREAK: f32 = 50.0;
/// Fraction of the flight over which the break happens; the rest is straight
pub const CURVE_SETTLE_PROGRESS: f32 = 0.75;

/// Curveball offset from the release x for a given progress in [0, 1]
///
/// Breaks toward negative x and returns to the center line by 75% of the
/// flight.
pub fn curve_offset(progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    if progress < CURVE_SETTLE_PROGRESS {
        -(progress / CURVE_SETTLE_PROGRESS * PI).sin() * CURVE_BREAK
    } else {
        0.0
    }
}

/// Flight progress from release toward the plate line
///
/// Returns `None` when release and plate share a y coordinate.
pub fn flight_progress(ball: &Ball, plate_y: f32) -> Option<f32> {
    let total = plate_y - ball.spawn.y;
    if total.abs() < 1e-3 {
        return None;
    }
    Some(((ball.pos.y - ball.spawn.y) / total).clamp(0.0, 1.0))
}

/// Advance one ball by one tick
pub fn advance_ball(ball: &mut Ball, plate_y: f32, dt: f32) {
    ball.elapsed += dt;

    if ball.hit {
        ball.pos += ball.vel;
        return;
    }

    ball.pos.y += ball.speed_y;

    if ball.pitch == PitchType::Curveball {
        // Degenerate release/plate geometry gets no break
        let offset = flight_progress(ball, plate_y).map_or(0.0, curve_offset);
        ball.pos.x = ball.spawn.x + offset;
    }
}
