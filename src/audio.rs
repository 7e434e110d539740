//! Audio notifications
//!
//! The simulation only emits events; an `AudioSink` turns them into sound.
//! On the web that is procedurally generated Web Audio, elsewhere the sink
//! just logs. A sink that failed to initialize stays silent and never
//! reports back into the game.

use crate::settings::Settings;
use crate::sim::{GameEvent, PitchType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bat swing whoosh
    Swing,
    /// Ball leaves the pitcher's hand
    PitchRelease,
    /// Fair ball off the bat
    Hit,
    /// Foul ball off the bat
    Foul,
    /// Windup telegraph for a curveball
    ChargeCurve,
    /// Windup telegraph for a changeup
    ChargeChangeup,
    /// Windup telegraph for a super fastball
    ChargeSuperFastball,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Swing => Some(SoundEffect::Swing),
            GameEvent::PitchRelease { .. } => Some(SoundEffect::PitchRelease),
            GameEvent::GoodHit { .. } => Some(SoundEffect::Hit),
            GameEvent::Foul { .. } => Some(SoundEffect::Foul),
            GameEvent::ChargeUp { pitch } => match pitch {
                PitchType::Curveball => Some(SoundEffect::ChargeCurve),
                PitchType::Changeup => Some(SoundEffect::ChargeChangeup),
                PitchType::SuperFastball => Some(SoundEffect::ChargeSuperFastball),
                PitchType::Fastball => None,
            },
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Volume controls shared by the real sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    master: f32,
    sfx: f32,
    muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            master: 0.8,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl Volume {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut volume = Self::default();
        volume.set_master(settings.master_volume);
        volume.set_sfx(settings.sfx_volume);
        volume.set_muted(settings.muted);
        volume
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master(&mut self, vol: f32) {
        self.master = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx(&mut self, vol: f32) {
        self.sfx = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }
}

/// Logs each effect instead of playing it (headless/native builds)
#[derive(Debug, Default)]
pub struct LogAudio {
    volume: Volume,
    played: usize,
}

impl LogAudio {
    pub fn new(volume: Volume) -> Self {
        Self { volume, played: 0 }
    }

    /// Effects that were audible so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume.effective();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} at volume {:.2}", effect, vol);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect, Volume};

    /// Web Audio output with procedurally generated effects
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: Volume,
    }

    impl WebAudio {
        pub fn new(volume: Volume) -> Self {
            // May fail outside a secure context; the sink then stays silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn volume_mut(&mut self) -> &mut Volume {
            &mut self.volume
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One oscillator sweeping `from` → `to` Hz over `len` seconds
        fn sweep(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            len: f64,
            peak: f32,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                // Airy whoosh
                SoundEffect::Swing => {
                    Self::sweep(ctx, OscillatorType::Triangle, 500.0, 120.0, 0.15, vol * 0.25)
                }
                SoundEffect::PitchRelease => {
                    Self::sweep(ctx, OscillatorType::Sine, 300.0, 600.0, 0.08, vol * 0.2)
                }
                // Wooden crack with a bright top
                SoundEffect::Hit => {
                    Self::sweep(ctx, OscillatorType::Square, 900.0, 200.0, 0.12, vol * 0.35);
                    Self::sweep(ctx, OscillatorType::Sine, 150.0, 60.0, 0.1, vol * 0.5);
                }
                // Duller tick
                SoundEffect::Foul => {
                    Self::sweep(ctx, OscillatorType::Triangle, 400.0, 120.0, 0.1, vol * 0.3)
                }
                SoundEffect::ChargeCurve => {
                    Self::sweep(ctx, OscillatorType::Sine, 200.0, 500.0, 0.6, vol * 0.2)
                }
                SoundEffect::ChargeChangeup => {
                    Self::sweep(ctx, OscillatorType::Sine, 400.0, 150.0, 0.6, vol * 0.2)
                }
                SoundEffect::ChargeSuperFastball => {
                    Self::sweep(ctx, OscillatorType::Sawtooth, 150.0, 1200.0, 0.8, vol * 0.25)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_up_sounds() {
        let curve = GameEvent::ChargeUp {
            pitch: PitchType::Curveball,
        };
        assert_eq!(SoundEffect::for_event(&curve), Some(SoundEffect::ChargeCurve));
        let fast = GameEvent::ChargeUp {
            pitch: PitchType::Fastball,
        };
        assert_eq!(SoundEffect::for_event(&fast), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Swing),
            Some(SoundEffect::Swing)
        );
    }

    #[test]
    fn test_muted_log_audio_is_silent() {
        let mut volume = Volume::default();
        volume.set_muted(true);
        let mut sink = LogAudio::new(volume);
        sink.play(SoundEffect::Hit);
        assert_eq!(sink.played(), 0);

        let mut sink = LogAudio::new(Volume::default());
        sink.play(SoundEffect::Hit);
        assert_eq!(sink.played(), 1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut volume = Volume::default();
        volume.set_master(3.0);
        volume.set_sfx(-1.0);
        assert_eq!(volume.effective(), 0.0);
        volume.set_sfx(0.5);
        assert!((volume.effective() - 0.5).abs() < 1e-6);
    }
}
