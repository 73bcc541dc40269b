//! Gameplay simulation module
//!
//! Everything that changes over time lives here:
//! - Tweens driven by clock time
//! - A fixed particle ring for pop bursts
//! - Prompts, orbs and the round controller
//!
//! Nothing in here touches the DOM; platform access goes through the
//! [`Engine`](crate::Engine) ports.

pub mod orb;
pub mod particles;
pub mod prompt;
pub mod round;
pub mod state;
pub mod tween;

pub use orb::{Orb, OrbAnim};
pub use particles::{Particle, ParticlePool};
pub use prompt::{Category, Op, OrbColor, Prompt, PromptKind, Shape, Tag};
pub use round::{RoundController, TapOutcome};
pub use state::{
    Difficulty, PlayerState, RoundPhase, RoundSettings, RoundSummary, TapStats, star_rating,
};
pub use tween::{Easing, Prop, TweenId, TweenScheduler, Tweenable};
