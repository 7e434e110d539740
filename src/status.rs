//! Score line with an optional expiring annotation
//!
//! "GOOD HIT!" reverts to the plain score a second after it appears; fouls
//! stay up until something replaces them. Expiry is a timestamp checked at
//! read time, so nothing has to fire when it runs out.

use serde::{Deserialize, Serialize};

use crate::sim::{FoulSeverity, GameEvent};

/// How long a good-hit callout stays on screen (ms, wall clock)
pub const GOOD_HIT_DISPLAY_MS: f64 = 1000.0;

/// Extra text shown after the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callout {
    GoodHit,
    Foul(FoulSeverity),
}

impl Callout {
    pub fn text(&self) -> String {
        match self {
            Callout::GoodHit => "GOOD HIT!".to_string(),
            Callout::Foul(severity) => format!("FOUL ({})", severity.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Annotation {
    callout: Callout,
    /// Wall-clock time the callout disappears; `None` stays until replaced
    expires_at: Option<f64>,
}

/// The status line: score plus the latest callout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    annotation: Option<Annotation>,
}

impl Scoreboard {
    pub fn clear(&mut self) {
        self.annotation = None;
    }

    /// Show a callout as of `now`; the latest write wins
    pub fn annotate(&mut self, callout: Callout, now: f64) {
        let expires_at = match callout {
            Callout::GoodHit => Some(now + GOOD_HIT_DISPLAY_MS),
            Callout::Foul(_) => None,
        };
        self.annotation = Some(Annotation {
            callout,
            expires_at,
        });
    }

    /// Update from a simulation event. Returns true if the line changed.
    pub fn apply_event(&mut self, event: &GameEvent, now: f64) -> bool {
        match event {
            GameEvent::GoodHit { .. } => self.annotate(Callout::GoodHit, now),
            GameEvent::Foul { severity, .. } => self.annotate(Callout::Foul(*severity), now),
            _ => return false,
        }
        true
    }

    /// Callout still visible at `now`
    pub fn callout(&self, now: f64) -> Option<Callout> {
        self.annotation
            .filter(|a| a.expires_at.is_none_or(|t| now < t))
            .map(|a| a.callout)
    }

    /// Text for the score display at `now`
    pub fn display(&self, score: u32, now: f64) -> String {
        match self.callout(now) {
            Some(callout) => format!("Score: {} - {}", score, callout.text()),
            None => format!("Score: {}", score),
        }
    }
}
