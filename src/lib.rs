//! Catch Stars - tap the orb that matches the prompt
//!
//! Core modules:
//! - `sim`: Gameplay simulation (tweens, particles, prompts, orbs, rounds)
//! - `scene`: Scene lifecycle and the flat-replace scene manager
//! - `engine`: Facade shared by scenes (size, RNG, tweens, bursts, ports)
//! - `renderer`: 2D drawing surface abstraction (Canvas 2D on web)
//! - `platform`: Browser/native platform abstraction (clock)
//! - `persistence`: Best-effort key/value save store
//! - `settings`: Persisted preferences (prompt modes, sound flags)
//! - `play`/`game`: The gameplay scene and the frame-driven shell around it
//! - `audio`/`ui`: Sound effect and HUD ports

pub mod audio;
pub mod engine;
pub mod game;
pub mod persistence;
pub mod play;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod ui;

pub use engine::Engine;
pub use game::Game;
pub use settings::{Modes, Settings};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Velocities are authored in pixels per 1/60 s frame
    pub const VELOCITY_SCALE: f32 = 60.0;

    /// Particle pool capacity
    pub const PARTICLE_CAPACITY: usize = 300;
    /// Particles emitted when a correct orb pops
    pub const POP_BURST: usize = 42;
    /// Downward velocity added to a particle every step
    pub const PARTICLE_GRAVITY: f32 = 0.03;

    /// Orb spawn margins from the canvas edge
    pub const ORB_MARGIN_X: f32 = 60.0;
    pub const ORB_MARGIN_Y: f32 = 120.0;
    /// Orb radius range
    pub const ORB_RADIUS_MIN: f32 = 34.0;
    pub const ORB_RADIUS_MAX: f32 = 52.0;
    /// Orb lifetime range (seconds)
    pub const ORB_LIFE_MIN: f32 = 10.0;
    pub const ORB_LIFE_MAX: f32 = 14.0;
    /// Extra orb speed per level above 1
    pub const ORB_SPEED_PER_LEVEL: f32 = 0.15;
    /// Edge length of one orb sprite in the sheet
    pub const ORB_SPRITE_SIZE: f32 = 256.0;

    /// Minimum orbs per round
    pub const MIN_SLOTS: u32 = 6;
    /// Orbs per round are `SLOT_BASE + level` (at least `MIN_SLOTS`)
    pub const SLOT_BASE: u32 = 4;
    /// Highest reachable level; stored values above it are clamped
    pub const MAX_LEVEL: u32 = 1000;

    /// Score for a correct tap
    pub const CORRECT_TAP_SCORE: u32 = 3;
    /// Penalty for a wrong tap (score never goes below zero)
    pub const WRONG_TAP_PENALTY: u32 = 1;
    /// Round clear bonus: base + per star + per streak
    pub const CLEAR_BONUS_BASE: u32 = 10;
    pub const CLEAR_BONUS_PER_STAR: u32 = 4;
    pub const CLEAR_BONUS_PER_STREAK: u32 = 2;

    /// Accuracy needed for two stars
    pub const TWO_STAR_ACCURACY: f32 = 0.75;
    /// Accuracy and remaining time needed for three stars
    pub const THREE_STAR_ACCURACY: f32 = 0.9;
    pub const THREE_STAR_TIME: f32 = 0.3;

    /// Pop animation: starting scale and restore duration
    pub const POP_SCALE: f32 = 0.8;
    pub const POP_MS: f64 = 160.0;

    /// Starting lives for a fresh game
    pub const START_LIVES: u32 = 3;
}

/// Clamp `v` into `[lo, hi]` without panicking on an inverted range
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}
