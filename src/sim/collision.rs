//! Bat-ball contact and outcome classification
//!
//! Contact is tested in polar space around the bat pivot: the ball must lie
//! close to the bat's current bearing and inside the barrel band. Where the
//! bat is pointing at contact decides fair or foul.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Bat, FoulSeverity, FoulSide};
use crate::consts::*;
use crate::{angle_between, cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Largest bearing difference between bat and ball that still makes contact
pub const CONTACT_ANGLE_TOLERANCE: f32 = 1.2;
/// Contact closer to the pivot than this is on the handle
pub const BARREL_INNER: f32 = 30.0;
/// Barrel reaches this far past the end of the bat
pub const BARREL_REACH: f32 = 15.0;

/// Bat angles (exclusive) that produce a fair ball
pub const GOOD_HIT_MIN: f32 = -2.5;
pub const GOOD_HIT_MAX: f32 = -0.2;
/// Contact angles are clamped to this range before mapping onto the fair zone
pub const CONTACT_CLAMP_MIN: f32 = -1.8;
pub const CONTACT_CLAMP_MAX: f32 = -0.4;
/// Exit angle jitter amplitude for good hits
pub const HIT_JITTER: f32 = 0.025;

/// Chance that a foul is a close call rather than way back
pub const CLOSE_CALL_CHANCE: f64 = 0.3;
pub const CLOSE_CALL_OVERSHOOT: f32 = 0.05;
pub const WAY_BACK_MIN: f32 = 0.2;
pub const WAY_BACK_MAX: f32 = 0.7;

/// Result of classifying a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    GoodHit {
        exit_angle: f32,
    },
    Foul {
        side: FoulSide,
        severity: FoulSeverity,
        exit_angle: f32,
    },
}

impl Contact {
    pub fn exit_angle(&self) -> f32 {
        match *self {
            Contact::GoodHit { exit_angle } | Contact::Foul { exit_angle, .. } => exit_angle,
        }
    }
}

/// Foul line angles as drawn from home plate: (left, right)
pub fn foul_line_angles() -> (f32, f32) {
    (
        (-FOUL_LINE_SLOPE).atan2(-1.0),
        (-FOUL_LINE_SLOPE).atan2(1.0),
    )
}

/// Fair zone shrunk by the safety margin: (left, right)
pub fn safe_fair_zone() -> (f32, f32) {
    let (left, right) = foul_line_angles();
    (left + FAIR_SAFETY_MARGIN, right - FAIR_SAFETY_MARGIN)
}

/// Whether the bat is positioned for a fair ball
pub fn is_good_hit_angle(bat_angle: f32) -> bool {
    bat_angle > GOOD_HIT_MIN && bat_angle < GOOD_HIT_MAX
}

/// Geometric contact test between the bat and one ball
pub fn bat_contacts_ball(bat: &Bat, ball_pos: Vec2) -> bool {
    let (dist, ball_angle) = cartesian_to_polar(ball_pos - bat.pivot);
    let diff = angle_between(normalize_angle(bat.angle), normalize_angle(ball_angle));

    diff < CONTACT_ANGLE_TOLERANCE
        && dist > BARREL_INNER
        && dist < bat.length + BARREL_REACH
        && ball_pos.x > bat.pivot.x - 10.0
        && ball_pos.y < bat.pivot.y + 30.0
}

/// Exit angle for a good hit
///
/// Early contact pulls toward the right field line, late contact toward the
/// left. The result is clamped to the safe fair zone with inclusive bounds,
/// which keeps it strictly inside the foul lines.
pub fn good_hit_exit_angle(contact_angle: f32, jitter: f32) -> f32 {
    let (safe_left, safe_right) = safe_fair_zone();
    let clamped = contact_angle.clamp(CONTACT_CLAMP_MIN, CONTACT_CLAMP_MAX);
    let ratio = (clamped - CONTACT_CLAMP_MAX) / (CONTACT_CLAMP_MIN - CONTACT_CLAMP_MAX);
    let angle = safe_right + ratio * (safe_left - safe_right) + jitter;
    angle.clamp(safe_left, safe_right)
}

/// Exit angle for a foul ball `overshoot` radians past the chosen line
pub fn foul_exit_angle(side: FoulSide, overshoot: f32) -> f32 {
    let (left, right) = foul_line_angles();
    match side {
        FoulSide::Left => left - overshoot,
        FoulSide::Right => right + overshoot,
    }
}

/// Exit speed in pixels per tick
pub fn exit_speed(dt: f32) -> f32 {
    EXIT_SPEED * (dt / REFERENCE_FRAME_MS)
}

/// Classify a contact at `bat_angle`, drawing randomness from `rng`
pub fn classify_contact<R: Rng>(bat_angle: f32, rng: &mut R) -> Contact {
    if is_good_hit_angle(bat_angle) {
        let jitter = rng.random_range(-HIT_JITTER..=HIT_JITTER);
        return Contact::GoodHit {
            exit_angle: good_hit_exit_angle(bat_angle, jitter),
        };
    }

    let side = if rng.random_bool(0.5) {
        FoulSide::Left
    } else {
        FoulSide::Right
    };
    let (severity, overshoot) = if rng.random_bool(CLOSE_CALL_CHANCE) {
        (FoulSeverity::CloseCall, CLOSE_CALL_OVERSHOOT)
    } else {
        (
            FoulSeverity::WayBack,
            rng.random_range(WAY_BACK_MIN..=WAY_BACK_MAX),
        )
    };
    Contact::Foul {
        side,
        severity,
        exit_angle: foul_exit_angle(side, overshoot),
    }
}

/// Test a ball against the bat and, on contact, send it off the bat
///
/// Returns the classified contact, or `None` if the ball was missed. Missed
/// balls are left untouched.
pub fn resolve_contact<R: Rng>(
    bat: &Bat,
    ball: &mut Ball,
    dt: f32,
    rng: &mut R,
) -> Option<Contact> {
    if !ball.active || !bat_contacts_ball(bat, ball.pos) {
        return None;
    }

    let contact = classify_contact(bat.angle, rng);
    ball.active = false;
    ball.hit = true;
    ball.vel = polar_to_cartesian(exit_speed(dt), contact.exit_angle());
    Some(contact)
}
