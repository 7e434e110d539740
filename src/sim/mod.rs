//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only from the injected RNG
//! - Stable iteration order (balls kept in spawn order)
//! - No audio, text or platform dependencies

pub mod collision;
pub mod flight;
pub mod pitcher;
pub mod state;
pub mod swing;
pub mod tick;

pub use collision::{Contact, bat_contacts_ball, classify_contact, resolve_contact};
pub use flight::{advance_ball, curve_offset};
pub use pitcher::{advance_pitcher, pitch_speed};
pub use state::{
    Ball, Bat, Field, FoulSeverity, FoulSide, GameEvent, GameState, PitchType, Pitcher,
    PitcherState, SessionStats, difficulty_multiplier,
};
pub use tick::{TickInput, swing, tick};
