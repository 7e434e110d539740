//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. The random source is not
//! part of the state; it is passed into `tick` so replays can inject a seed.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pitch types the pitcher can throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchType {
    Fastball,
    Changeup,
    Curveball,
    SuperFastball,
}

impl PitchType {
    pub const ALL: [PitchType; 4] = [
        PitchType::Fastball,
        PitchType::Changeup,
        PitchType::Curveball,
        PitchType::SuperFastball,
    ];

    /// Pick a pitch from a uniform roll in [0, 1)
    ///
    /// Cumulative thresholds: 10% super fastball, 40% fastball,
    /// 30% curveball, 20% changeup.
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.10 {
            PitchType::SuperFastball
        } else if roll < 0.50 {
            PitchType::Fastball
        } else if roll < 0.80 {
            PitchType::Curveball
        } else {
            PitchType::Changeup
        }
    }

    /// Base vertical speed in pixels per millisecond
    pub fn base_speed(&self) -> f32 {
        match self {
            PitchType::Fastball => 0.45,
            PitchType::Changeup => 0.25,
            PitchType::Curveball => 0.35,
            PitchType::SuperFastball => 0.65,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PitchType::Fastball => "fastball",
            PitchType::Changeup => "changeup",
            PitchType::Curveball => "curveball",
            PitchType::SuperFastball => "super fastball",
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speed multiplier from score: +2% per run, capped at 1.6x
pub fn difficulty_multiplier(score: u32) -> f32 {
    1.0 + (score as f32 * 0.02).min(0.6)
}

/// Pitcher phase. The pitch is committed when the windup starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PitcherState {
    /// Waiting for the field to clear
    #[default]
    Idle,
    /// Telegraphing the chosen pitch
    Windup { pitch: PitchType },
}

/// The pitcher on the mound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitcher {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub state: PitcherState,
    /// Milliseconds spent in the current state
    pub timer: f32,
    pub idle_duration: f32,
    pub windup_duration: f32,
}

impl Pitcher {
    pub fn new(field: &Field) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0 - PITCHER_SIZE / 2.0, PITCHER_Y),
            size: PITCHER_SIZE,
            state: PitcherState::Idle,
            timer: 0.0,
            idle_duration: PITCHER_IDLE_MS,
            windup_duration: PITCHER_WINDUP_MS,
        }
    }

    /// Pitch committed for the current windup, if any
    pub fn next_pitch(&self) -> Option<PitchType> {
        match self.state {
            PitcherState::Idle => None,
            PitcherState::Windup { pitch } => Some(pitch),
        }
    }

    /// Where a released ball appears (top-left of the ball)
    pub fn release_point(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size / 2.0 - BALL_SIZE / 2.0,
            self.pos.y + self.size,
        )
    }

    pub fn reset(&mut self) {
        self.state = PitcherState::Idle;
        self.timer = 0.0;
    }
}

/// The player's bat, rotating about a fixed pivot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bat {
    pub pivot: Vec2,
    pub length: f32,
    pub width: f32,
    /// Current rotation (radians, screen space)
    pub angle: f32,
    pub swinging: bool,
    /// Radians per reference frame
    pub swing_speed: f32,
}

impl Bat {
    pub fn new(field: &Field) -> Self {
        Self {
            pivot: Vec2::new(
                field.width / 2.0 + BAT_PIVOT_X_OFFSET,
                field.height + BAT_PIVOT_Y_OFFSET,
            ),
            length: BAT_LENGTH,
            width: BAT_WIDTH,
            angle: BAT_START_ANGLE,
            swinging: false,
            swing_speed: BAT_SWING_SPEED,
        }
    }
}

/// A pitched ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Release point, kept for the curveball path
    pub spawn: Vec2,
    pub pos: Vec2,
    pub size: f32,
    pub pitch: PitchType,
    /// Vertical displacement per tick before contact
    pub speed_y: f32,
    /// Displacement per tick after contact
    pub vel: Vec2,
    /// Milliseconds since release
    pub elapsed: f32,
    /// Still eligible for bat contact
    pub active: bool,
    /// Flying off the bat
    pub hit: bool,
}

impl Ball {
    pub fn new(id: u32, spawn: Vec2, pitch: PitchType, speed_y: f32) -> Self {
        Self {
            id,
            spawn,
            pos: spawn,
            size: BALL_SIZE,
            pitch,
            speed_y,
            vel: Vec2::ZERO,
            elapsed: 0.0,
            active: true,
            hit: false,
        }
    }
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    /// A ball at `pos` has left the playable area
    pub fn is_out_of_bounds(&self, pos: Vec2) -> bool {
        pos.y > self.height
            || pos.y < -FIELD_MARGIN
            || pos.x < -FIELD_MARGIN
            || pos.x > self.width + FIELD_MARGIN
    }
}

/// Which foul line a foul ball leaves past
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoulSide {
    Left,
    Right,
}

/// How far outside the foul line a foul ball goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoulSeverity {
    CloseCall,
    WayBack,
}

impl FoulSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            FoulSeverity::CloseCall => "CLOSE CALL",
            FoulSeverity::WayBack => "WAY BACK",
        }
    }
}

/// Notifications emitted by a tick for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Bat swing started
    Swing,
    /// Windup began for a telegraphed pitch (not emitted for fastballs)
    ChargeUp { pitch: PitchType },
    /// Ball left the pitcher's hand
    PitchRelease { pitch: PitchType },
    /// Fair ball, score went up
    GoodHit { exit_angle: f32 },
    /// Contact outside the good-hit window
    Foul {
        side: FoulSide,
        severity: FoulSeverity,
        exit_angle: f32,
    },
}

/// Per-session counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub fastballs: u32,
    pub changeups: u32,
    pub curveballs: u32,
    pub super_fastballs: u32,
    pub swings: u32,
    pub good_hits: u32,
    pub fouls: u32,
    /// Pitches that left the field without contact
    pub misses: u32,
}

impl SessionStats {
    pub fn record_pitch(&mut self, pitch: PitchType) {
        match pitch {
            PitchType::Fastball => self.fastballs += 1,
            PitchType::Changeup => self.changeups += 1,
            PitchType::Curveball => self.curveballs += 1,
            PitchType::SuperFastball => self.super_fastballs += 1,
        }
    }

    pub fn pitches(&self) -> u32 {
        self.fastballs + self.changeups + self.curveballs + self.super_fastballs
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Field,
    pub pitcher: Pitcher,
    pub bat: Bat,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    pub score: u32,
    pub stats: SessionStats,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Field::default())
    }
}

impl GameState {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            pitcher: Pitcher::new(&field),
            bat: Bat::new(&field),
            balls: Vec::new(),
            score: 0,
            stats: SessionStats::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to a fresh session on the same field
    pub fn reset(&mut self) {
        *self = Self::new(self.field);
    }
}
