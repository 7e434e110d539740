//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. A tick only
//! mutates state and returns the events it produced; playing sounds and
//! updating text is left to the caller.

use rand::Rng;

use super::collision::{Contact, resolve_contact};
use super::flight::advance_ball;
use super::pitcher::advance_pitcher;
use super::state::{GameEvent, GameState};

/// Barrel entry sits this far above the pivot for a ball on the center line
const AUTO_SWING_ENTRY_ABOVE_PIVOT: f32 = 50.0;
/// Ticks of lead the auto-batter gives itself before barrel entry
const AUTO_SWING_LEAD_TICKS: f32 = 7.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Swing the bat at the start of this tick
    pub swing: bool,
    /// Idle/demo mode - the bat swings by itself
    pub idle_mode: bool,
}

/// Start a swing if the bat is free. Returns the swing event on success.
pub fn swing(state: &mut GameState) -> Option<GameEvent> {
    if !state.bat.begin_swing() {
        return None;
    }
    state.stats.swings += 1;
    Some(GameEvent::Swing)
}

/// Advance the game state by one fixed timestep of `dt` milliseconds
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.swing || (input.idle_mode && auto_swing_due(state)) {
        events.extend(swing(state));
    }

    state.time_ticks += 1;

    // Pitcher may release a ball this tick
    advance_pitcher(state, dt, rng, &mut events);

    // Ball flight and removal
    let plate_y = state.bat.pivot.y;
    let field = state.field;
    let stats = &mut state.stats;
    state.balls.retain_mut(|ball| {
        advance_ball(ball, plate_y, dt);
        if field.is_out_of_bounds(ball.pos) {
            if !ball.hit {
                stats.misses += 1;
            }
            return false;
        }
        true
    });

    state.bat.advance_swing(dt);

    // Contact is only possible mid-swing
    if state.bat.swinging {
        for ball in &mut state.balls {
            let Some(contact) = resolve_contact(&state.bat, ball, dt, rng) else {
                continue;
            };
            match contact {
                Contact::GoodHit { exit_angle } => {
                    state.score += 1;
                    state.stats.good_hits += 1;
                    log::debug!(
                        "Good hit on #{} at bat angle {:.3}, exit {:.3}",
                        ball.id,
                        state.bat.angle,
                        exit_angle
                    );
                    events.push(GameEvent::GoodHit { exit_angle });
                }
                Contact::Foul {
                    side,
                    severity,
                    exit_angle,
                } => {
                    state.stats.fouls += 1;
                    log::debug!(
                        "Foul on #{} at bat angle {:.3}: {:?} {}",
                        ball.id,
                        state.bat.angle,
                        side,
                        severity.label()
                    );
                    events.push(GameEvent::Foul {
                        side,
                        severity,
                        exit_angle,
                    });
                }
            }
        }
    }

    events
}

/// Demo batter: swing when an incoming ball is a few ticks from the barrel
fn auto_swing_due(state: &GameState) -> bool {
    if state.bat.swinging {
        return false;
    }
    let entry_y = state.bat.pivot.y - AUTO_SWING_ENTRY_ABOVE_PIVOT;
    state
        .balls
        .iter()
        .filter(|b| b.active && b.speed_y > 0.0)
        .any(|b| {
            let ticks_out = (entry_y - b.pos.y) / b.speed_y;
            (0.0..=AUTO_SWING_LEAD_TICKS).contains(&ticks_out)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Ball, PitchType, PitcherState};
    use crate::polar_to_cartesian;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = SIM_DT as f32;

    #[test]
    fn test_first_pitch_arrives() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(12345);
        let input = TickInput::default();
        let mut released = None;
        // idle 1500ms + windup 1000ms ≈ 302 ticks
        for _ in 0..400 {
            for event in tick(&mut state, &input, DT, &mut rng) {
                if let GameEvent::PitchRelease { pitch } = event {
                    released = Some(pitch);
                }
            }
            if released.is_some() {
                break;
            }
        }
        let pitch = released.expect("pitch released");
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pitch, pitch);
        assert_eq!(state.pitcher.state, PitcherState::Idle);
    }

    #[test]
    fn test_ball_below_field_removed_same_tick() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let id = state.next_entity_id();
        let start = Vec2::new(395.0, state.field.height - 2.0);
        state
            .balls
            .push(Ball::new(id, start, PitchType::Fastball, 3.0));
        tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(state.balls.is_empty());
        assert_eq!(state.stats.misses, 1);
    }

    #[test]
    fn test_hit_ball_leaves_top_without_counting_miss() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = Ball::new(1, Vec2::new(400.0, -45.0), PitchType::Fastball, 3.0);
        ball.hit = true;
        ball.active = false;
        ball.vel = Vec2::new(0.0, -6.0);
        state.balls.push(ball);
        tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert!(state.balls.is_empty());
        assert_eq!(state.stats.misses, 0);
    }

    #[test]
    fn test_swing_input_and_retrigger() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput {
            swing: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, DT, &mut rng);
        assert_eq!(events, vec![GameEvent::Swing]);
        assert!(state.bat.swinging);
        let angle = state.bat.angle;

        // Second request mid-swing does nothing beyond the normal rotation
        let events = tick(&mut state, &input, DT, &mut rng);
        assert!(events.is_empty());
        assert!(state.bat.angle < angle);
        assert_eq!(state.stats.swings, 1);
    }

    #[test]
    fn test_contact_scores_good_hit() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(5);
        // Bat is at -1.0 after this tick's rotation; place the ball on that
        // bearing, compensating for its own drop this tick
        state.bat.swinging = true;
        state.bat.angle = -1.0 + 0.3 * DT / crate::consts::REFERENCE_FRAME_MS;
        let speed_y = 2.0;
        let pos = state.bat.pivot + polar_to_cartesian(45.0, -1.0) - Vec2::new(0.0, speed_y);
        state
            .balls
            .push(Ball::new(1, pos, PitchType::Fastball, speed_y));

        let events = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(state.score, 1);
        assert!(matches!(events.as_slice(), [GameEvent::GoodHit { .. }]));
        let ball = &state.balls[0];
        assert!(ball.hit && !ball.active);
        assert!((ball.vel.length() - crate::sim::collision::exit_speed(DT)).abs() < 1e-4);
    }

    #[test]
    fn test_contact_fouls_keeps_score() {
        // Same setup as a good hit, but the bat ends the tick at -0.1
        for seed in 0..50 {
            let mut state = GameState::default();
            state.score = 5;
            let mut rng = Pcg32::seed_from_u64(seed);
            state.bat.swinging = true;
            state.bat.angle = -0.1 + 0.3 * DT / crate::consts::REFERENCE_FRAME_MS;
            let speed_y = 2.0;
            let pos =
                state.bat.pivot + polar_to_cartesian(45.0, -0.1) - Vec2::new(0.0, speed_y);
            state
                .balls
                .push(Ball::new(1, pos, PitchType::Fastball, speed_y));

            let events = tick(&mut state, &TickInput::default(), DT, &mut rng);
            assert!(matches!(events.as_slice(), [GameEvent::Foul { .. }]));
            assert_eq!(state.score, 5);
            assert_eq!(state.stats.fouls, 1);
            assert_eq!(state.stats.good_hits, 0);
            let ball = &state.balls[0];
            assert!(ball.hit && !ball.active);
            assert!((ball.vel.length() - crate::sim::collision::exit_speed(DT)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_no_contact_when_not_swinging() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let pos = state.bat.pivot + polar_to_cartesian(45.0, -0.1);
        state
            .balls
            .push(Ball::new(1, pos, PitchType::Fastball, 0.0));
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT, &mut rng);
        }
        assert!(state.balls[0].active);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_idle_mode_puts_balls_in_play() {
        let mut state = GameState::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        // About 40 seconds of play
        for _ in 0..(120 * 40) {
            tick(&mut state, &input, DT, &mut rng);
        }
        let stats = &state.stats;
        assert!(stats.pitches() >= 5);
        assert!(stats.swings >= 5);
        assert!(stats.good_hits + stats.fouls > 0);
        assert_eq!(state.score, stats.good_hits);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::default();
        let mut state2 = GameState::default();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..3000 {
            let e1 = tick(&mut state1, &input, DT, &mut rng1);
            let e2 = tick(&mut state2, &input, DT, &mut rng2);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.balls.len(), state2.balls.len());
    }
}
