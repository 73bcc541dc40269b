//! Sound effects
//!
//! Procedurally generated beeps - no external files needed! The Web Audio
//! implementation only exists on wasm32; native builds use [`NullAudio`].

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct orb tapped
    Good,
    /// Wrong orb tapped or round lost
    Bad,
    /// Round cleared
    Fanfare,
}

impl SoundEffect {
    /// Oscillator frequency in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            SoundEffect::Good => 880.0,
            SoundEffect::Bad => 180.0,
            SoundEffect::Fanfare => 1320.0,
        }
    }

    /// Envelope length in seconds
    pub fn duration(&self) -> f64 {
        match self {
            SoundEffect::Good => 0.20,
            SoundEffect::Bad => 0.25,
            SoundEffect::Fanfare => 0.32,
        }
    }

    /// Gain at the start of the envelope
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Good => 0.0008,
            SoundEffect::Bad | SoundEffect::Fanfare => 0.0009,
        }
    }
}

/// Fire-and-forget effect player
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Peak gain is this multiple of the base volume
    const ATTACK_GAIN: f32 = 90.0;

    /// Web Audio player
    ///
    /// The context is created lazily on the first effect, which always
    /// follows a user gesture, so browsers allow it to start.
    #[derive(Default)]
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        failed: bool,
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self::default()
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.failed {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        self.failed = true;
                    }
                }
            }
            self.ctx.as_ref()
        }

        /// Create an oscillator wired through a gain node
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
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = self.context() else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match effect {
                SoundEffect::Good => OscillatorType::Sine,
                SoundEffect::Bad => OscillatorType::Triangle,
                SoundEffect::Fanfare => OscillatorType::Square,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, effect.frequency(), osc_type) else {
                return;
            };

            let t = ctx.current_time();
            let vol = effect.base_volume();
            let len = effect.duration();

            gain.gain().set_value(vol);
            gain.gain()
                .exponential_ramp_to_value_at_time(vol * ATTACK_GAIN, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + len)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.02).ok();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_envelopes() {
        assert_eq!(SoundEffect::Good.frequency(), 880.0);
        assert_eq!(SoundEffect::Bad.frequency(), 180.0);
        assert!(SoundEffect::Fanfare.duration() > SoundEffect::Good.duration());
    }
}
