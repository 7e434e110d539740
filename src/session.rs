//! Session lifecycle and the effect boundary
//!
//! `Session` owns the world, the RNG and the fixed-step clock. The host calls
//! `frame` once per display frame and `swing` on input; events produced by
//! the simulation are dispatched here to the audio sink and scoreboard.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::audio::{AudioSink, SoundEffect};
use crate::clock::FixedTimestep;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, PitchType, PitcherState, TickInput};
use crate::status::Scoreboard;

/// Read-only view of the world for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub active: bool,
    pub pitcher: PitcherView,
    pub bat: BatView,
    pub balls: Vec<BallView>,
    pub score: u32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PitcherView {
    pub x: f32,
    pub y: f32,
    pub state: PitcherState,
    pub timer: f32,
    pub next_pitch: Option<PitchType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatView {
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// One player's batting session
pub struct Session<A: AudioSink> {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    clock: FixedTimestep,
    input: TickInput,
    scoreboard: Scoreboard,
    high_scores: HighScores,
    audio: A,
    active: bool,
    /// Timestamp of the most recent frame or input
    now: f64,
}

impl<A: AudioSink> Session<A> {
    pub fn new(settings: &Settings, audio: A) -> Self {
        Self {
            state: GameState::new(settings.field()),
            rng: Pcg32::seed_from_u64(settings.seed),
            seed: settings.seed,
            clock: FixedTimestep::default(),
            input: TickInput {
                swing: false,
                idle_mode: settings.demo_mode,
            },
            scoreboard: Scoreboard::default(),
            high_scores: HighScores::new(),
            audio,
            active: false,
            now: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        self.input.idle_mode = on;
    }

    /// Reset the world and begin stepping from `now`
    pub fn start_session(&mut self, now: f64) {
        self.state.reset();
        self.scoreboard.clear();
        self.clock.reset(now);
        self.now = now;
        self.active = true;
        log::info!("Session started (seed {})", self.seed);
    }

    /// Stop stepping and record the result
    pub fn end_session(&mut self, now: f64) {
        if !self.active {
            return;
        }
        self.active = false;
        self.now = now;
        let stats = &self.state.stats;
        let rank = self
            .high_scores
            .add_score(self.state.score, stats.pitches(), now);
        log::info!(
            "Session over: score {} from {} pitches ({} fouls, {} misses), rank {:?}",
            self.state.score,
            stats.pitches(),
            stats.fouls,
            stats.misses,
            rank
        );
    }

    /// Player input. Starts a session if none is running.
    pub fn swing(&mut self, now: f64) {
        if !self.active {
            self.start_session(now);
            return;
        }
        self.now = now;
        if let Some(event) = sim::swing(&mut self.state) {
            self.dispatch(&event);
        }
    }

    /// Run every simulation step owed at `now`. Returns the number of steps.
    pub fn frame(&mut self, now: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.now = now;
        self.clock.frame(now);

        let dt = self.clock.step() as f32;
        let mut steps = 0;
        while self.clock.consume_step() {
            let events = sim::tick(&mut self.state, &self.input, dt, &mut self.rng);
            for event in &events {
                self.dispatch(event);
            }
            steps += 1;
        }
        steps
    }

    /// Score line as it should read at `now`
    pub fn status_text(&self, now: f64) -> String {
        self.scoreboard.display(self.state.score, now)
    }

    /// Everything a renderer needs for the frame drawn at `now`
    pub fn snapshot(&self, now: f64) -> Snapshot {
        let pitcher = &self.state.pitcher;
        let bat = &self.state.bat;
        Snapshot {
            active: self.active,
            pitcher: PitcherView {
                x: pitcher.pos.x,
                y: pitcher.pos.y,
                state: pitcher.state,
                timer: pitcher.timer,
                next_pitch: pitcher.next_pitch(),
            },
            bat: BatView {
                pivot_x: bat.pivot.x,
                pivot_y: bat.pivot.y,
                angle: bat.angle,
            },
            balls: self
                .state
                .balls
                .iter()
                .map(|b| BallView {
                    x: b.pos.x,
                    y: b.pos.y,
                    size: b.size,
                })
                .collect(),
            score: self.state.score,
            status: self.status_text(now),
        }
    }

    fn dispatch(&mut self, event: &GameEvent) {
        self.scoreboard.apply_event(event, self.now);
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;

    /// Records every effect it is asked to play
    #[derive(Default)]
    struct RecordingAudio(Vec<SoundEffect>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn run_frames<A: AudioSink>(session: &mut Session<A>, start: f64, frames: u32) -> f64 {
        let mut t = start;
        for _ in 0..frames {
            t += 1000.0 / 60.0;
            session.frame(t);
        }
        t
    }

    #[test]
    fn test_swing_while_inactive_starts_session() {
        let mut session = Session::new(&Settings::default(), NullAudio);
        assert!(!session.is_active());
        assert_eq!(session.frame(100.0), 0);

        session.swing(100.0);
        assert!(session.is_active());
        // Starting does not swing
        assert!(!session.state().bat.swinging);

        session.swing(110.0);
        assert!(session.state().bat.swinging);
    }

    #[test]
    fn test_frame_runs_clamped_steps() {
        let mut session = Session::new(&Settings::default(), NullAudio);
        session.start_session(0.0);
        assert_eq!(session.frame(250.0), 12);
        assert_eq!(session.state().time_ticks, 12);
    }

    #[test]
    fn test_start_session_resets_world() {
        let settings = Settings {
            demo_mode: true,
            ..Default::default()
        };
        let mut session = Session::new(&settings, NullAudio);
        session.start_session(0.0);
        run_frames(&mut session, 0.0, 60 * 30);
        assert!(session.state().stats.pitches() > 0);

        session.end_session(30_000.0);
        session.start_session(31_000.0);
        let state = session.state();
        assert_eq!(state.score, 0);
        assert!(state.balls.is_empty());
        assert_eq!(state.pitcher.state, PitcherState::Idle);
        assert_eq!(state.pitcher.timer, 0.0);
        assert_eq!(session.status_text(31_000.0), "Score: 0");
    }

    #[test]
    fn test_demo_session_plays_sounds_and_scores() {
        let settings = Settings {
            demo_mode: true,
            seed: 7,
            ..Default::default()
        };
        let mut session = Session::new(&settings, RecordingAudio::default());
        session.start_session(0.0);
        let end = run_frames(&mut session, 0.0, 60 * 60);

        let played = &session.audio().0;
        assert!(played.contains(&SoundEffect::Swing));
        assert!(played.contains(&SoundEffect::PitchRelease));
        assert!(played.contains(&SoundEffect::Hit) || played.contains(&SoundEffect::Foul));
        let hits = played.iter().filter(|e| **e == SoundEffect::Hit).count();
        assert_eq!(hits as u32, session.score());

        session.end_session(end);
        assert!(!session.is_active());
        assert!(session.score() > 0);
        assert_eq!(session.high_scores().top_score(), Some(session.score()));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = Session::new(&Settings::default(), NullAudio);
        session.start_session(0.0);
        // Idle + windup is about 2.5s
        let now = run_frames(&mut session, 0.0, 60 * 3);
        let snap = session.snapshot(now);
        assert!(snap.active);
        assert_eq!(snap.balls.len(), session.state().balls.len());
        assert_eq!(snap.bat.pivot_x, session.state().bat.pivot.x);
        assert_eq!(snap.pitcher.next_pitch, session.state().pitcher.next_pitch());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"pivot_y\""));
    }

    #[test]
    fn test_snapshot_status_expires_after_session_end() {
        let settings = Settings {
            demo_mode: true,
            seed: 7,
            ..Default::default()
        };
        let mut session = Session::new(&settings, RecordingAudio::default());
        session.start_session(0.0);
        let mut now = 0.0;
        for _ in 0..60 * 60 {
            now += 1000.0 / 60.0;
            session.frame(now);
            if session.audio().0.contains(&SoundEffect::Hit) {
                break;
            }
        }
        assert!(session.audio().0.contains(&SoundEffect::Hit));

        session.end_session(now);
        assert!(session.snapshot(now).status.ends_with("GOOD HIT!"));
        // No more frames run, but the callout still expires on the renderer's clock
        let later = session.snapshot(now + 1500.0);
        assert_eq!(later.status, format!("Score: {}", session.score()));
        assert!(!later.active);
    }

    #[test]
    fn test_same_seed_same_session() {
        let settings = Settings {
            demo_mode: true,
            seed: 123,
            ..Default::default()
        };
        let mut a = Session::new(&settings, NullAudio);
        let mut b = Session::new(&settings, NullAudio);
        a.start_session(0.0);
        b.start_session(0.0);
        run_frames(&mut a, 0.0, 60 * 20);
        run_frames(&mut b, 0.0, 60 * 20);
        assert_eq!(a.state().stats, b.state().stats);
        assert_eq!(a.score(), b.score());
    }
}
