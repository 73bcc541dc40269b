//! Engine facade shared by every scene
//!
//! Owns the pieces a scene reaches for each frame: canvas size, the seeded
//! RNG, the tween scheduler, the particle pool and the platform ports
//! (clock, audio, HUD, storage).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, NullAudio, SoundEffect};
use crate::persistence::Save;
use crate::platform::{Clock, ManualClock};
use crate::sim::particles::ParticlePool;
use crate::sim::tween::{Easing, OnDone, Prop, TweenId, TweenScheduler, TweenTarget};
use crate::ui::{Hud, NullHud};

pub struct Engine {
    size: Vec2,
    rng: Pcg32,
    pub tweens: TweenScheduler,
    pub particles: ParticlePool,
    clock: Box<dyn Clock>,
    audio: Box<dyn AudioSink>,
    hud: Box<dyn Hud>,
    save: Save,
    sfx_on: bool,
}

impl Engine {
    pub fn new(size: Vec2, seed: u64, clock: Box<dyn Clock>, save: Save) -> Self {
        Self {
            size,
            rng: Pcg32::seed_from_u64(seed),
            tweens: TweenScheduler::new(),
            particles: ParticlePool::new(),
            clock,
            audio: Box::new(NullAudio),
            hud: Box::new(NullHud),
            save,
            sfx_on: true,
        }
    }

    /// Silent, in-memory engine on a manual clock
    pub fn headless(size: Vec2, seed: u64) -> Self {
        Self::new(size, seed, Box::new(ManualClock::new()), Save::in_memory())
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_hud(mut self, hud: Box<dyn Hud>) -> Self {
        self.hud = hud;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Uniform float in `[lo, hi)`; `lo` when the range is empty
    pub fn rand(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }

    /// Clock time in milliseconds
    pub fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Start a tween at the current clock time
    pub fn tween(
        &mut self,
        target: TweenTarget,
        props: &[(Prop, f32)],
        duration_ms: f64,
        easing: Easing,
        on_done: Option<OnDone>,
    ) -> TweenId {
        let now = self.now();
        self.tweens.schedule(now, target, props, duration_ms, easing, on_done)
    }

    /// Particle burst at `pos`
    pub fn burst(&mut self, pos: Vec2, count: usize) {
        self.particles.spawn(&mut self.rng, pos, count);
    }

    /// Play an effect if sound is on
    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_on {
            self.audio.play(effect);
        }
    }

    pub fn sfx_on(&self) -> bool {
        self.sfx_on
    }

    pub fn set_sfx(&mut self, on: bool) {
        self.sfx_on = on;
    }

    pub fn hud(&mut self) -> &mut dyn Hud {
        self.hud.as_mut()
    }

    pub fn save(&self) -> &Save {
        &self.save
    }
}
