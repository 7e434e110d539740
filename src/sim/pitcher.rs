//! Pitcher state machine
//!
//! Idle → Windup → (release) → Idle. The idle clock only runs while the
//! field is empty, so a new pitch never starts while a ball is in the air.

use rand::Rng;

use super::state::{
    Ball, GameEvent, GameState, PitchType, PitcherState, difficulty_multiplier,
};

/// Advance the pitcher by `dt` milliseconds, spawning a ball on release
pub fn advance_pitcher<R: Rng>(
    state: &mut GameState,
    dt: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    match state.pitcher.state {
        PitcherState::Idle => {
            if !state.balls.is_empty() {
                return;
            }
            state.pitcher.timer += dt;
            if state.pitcher.timer > state.pitcher.idle_duration {
                let pitch = PitchType::from_roll(rng.random::<f32>());
                state.pitcher.state = PitcherState::Windup { pitch };
                state.pitcher.timer = 0.0;
                log::debug!("Windup: {}", pitch);
                if pitch != PitchType::Fastball {
                    events.push(GameEvent::ChargeUp { pitch });
                }
            }
        }
        PitcherState::Windup { pitch } => {
            state.pitcher.timer += dt;
            if state.pitcher.timer > state.pitcher.windup_duration {
                release_pitch(state, pitch, dt);
                state.pitcher.state = PitcherState::Idle;
                state.pitcher.timer = 0.0;
                events.push(GameEvent::PitchRelease { pitch });
            }
        }
    }
}

/// Per-tick vertical speed for a pitch at the given score
pub fn pitch_speed(pitch: PitchType, score: u32, dt: f32) -> f32 {
    pitch.base_speed() * difficulty_multiplier(score) * dt
}

fn release_pitch(state: &mut GameState, pitch: PitchType, dt: f32) {
    let id = state.next_entity_id();
    let speed_y = pitch_speed(pitch, state.score, dt);
    let ball = Ball::new(id, state.pitcher.release_point(), pitch, speed_y);
    log::debug!(
        "Released {} #{} at {:.3} px/tick (score {})",
        pitch,
        id,
        speed_y,
        state.score
    );
    state.balls.push(ball);
    state.stats.record_pitch(pitch);
}
