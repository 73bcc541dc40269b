//! Pooled burst particles
//!
//! A fixed ring of slots. Spawning always takes the next slot in cursor
//! order, even if that particle is still alive, so a burst never allocates.

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLE_CAPACITY, PARTICLE_GRAVITY, VELOCITY_SCALE};
use crate::clamp;
use crate::renderer::{Paint, Surface};

/// A single particle slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds remaining; dead at or below zero
    pub life: f32,
    pub alpha: f32,
    pub hue: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            life: 0.0,
            alpha: 1.0,
            hue: 0.0,
        }
    }
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn spawn(&mut self, rng: &mut impl Rng, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-3.0..-0.2));
        self.radius = rng.random_range(1.2..3.2);
        self.life = rng.random_range(0.6..1.2);
        self.alpha = 1.0;
        self.hue = rng.random_range(0.0..360.0);
    }

    fn step(&mut self, dt: f32) {
        self.pos += self.vel * VELOCITY_SCALE * dt;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= dt;
        self.alpha = clamp(self.life * 1.2, 0.0, 1.0);
    }
}

/// Fixed-capacity particle ring
pub struct ParticlePool {
    slots: Box<[Particle; PARTICLE_CAPACITY]>,
    cursor: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            slots: Box::new([Particle::default(); PARTICLE_CAPACITY]),
            cursor: 0,
        }
    }

    /// Emit `count` particles at `pos`
    pub fn spawn(&mut self, rng: &mut impl Rng, pos: Vec2, count: usize) {
        for _ in 0..count {
            let slot = self.cursor % PARTICLE_CAPACITY;
            self.slots[slot].spawn(rng, pos);
            self.cursor = self.cursor.wrapping_add(1);
        }
    }

    /// Step and draw every live particle; dead slots are skipped
    pub fn advance_and_render(&mut self, dt: f32, surface: &mut dyn Surface) {
        for p in self.slots.iter_mut().filter(|p| p.is_alive()) {
            p.step(dt);
            if !p.is_alive() {
                continue;
            }
            surface.set_alpha(p.alpha);
            surface.fill_circle(p.pos, p.radius, Paint::Hsl { h: p.hue, s: 80.0, l: 60.0 });
        }
        surface.set_alpha(1.0);
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_alive()).count()
    }

    /// Index the next spawn will write
    pub fn next_slot(&self) -> usize {
        self.cursor % PARTICLE_CAPACITY
    }

    pub fn slots(&self) -> &[Particle] {
        &self.slots[..]
    }

    pub fn capacity(&self) -> usize {
        PARTICLE_CAPACITY
    }
}
