//! Round controller
//!
//! One round: generate a prompt, scatter orbs with the correct ones planted
//! among distractors, then resolve taps and the timer into Won or Lost.

use glam::Vec2;
use rand::seq::index;

use super::orb::Orb;
use super::prompt::Prompt;
use super::state::{PlayerState, RoundPhase, RoundSummary, TapStats, star_rating};
use super::tween::{Easing, Prop};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::persistence::Save;
use crate::settings::Modes;
use crate::{Engine, clamp};

/// Orbs hit by a single tap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapOutcome {
    pub correct: u32,
    pub wrong: u32,
}

impl TapOutcome {
    pub fn hit_anything(&self) -> bool {
        self.correct + self.wrong > 0
    }
}

pub struct RoundController {
    state: PlayerState,
    modes: Modes,
    phase: RoundPhase,
    prompt: Option<Prompt>,
    /// Draw order; the last orb is on top
    orbs: Vec<Orb>,
    /// Seconds left in the round
    timer: f32,
    stats: TapStats,
    last_summary: Option<RoundSummary>,
}

impl RoundController {
    pub fn new(state: PlayerState, modes: Modes) -> Self {
        Self {
            state,
            modes,
            phase: RoundPhase::Idle,
            prompt: None,
            orbs: Vec::new(),
            timer: 0.0,
            stats: TapStats::default(),
            last_summary: None,
        }
    }

    /// Controller with persisted progress and modes
    pub fn load(save: &Save) -> Self {
        Self::new(PlayerState::load(save), Modes::load(save))
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Share of the round still left, in [0, 1]
    pub fn time_fraction(&self) -> f32 {
        clamp(self.timer / self.state.round_time, 0.0, 1.0)
    }

    pub fn stats(&self) -> TapStats {
        self.stats
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    /// Game over: lost with no lives left
    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::Lost && self.state.lives == 0
    }

    /// Push every HUD value
    pub fn sync_hud(&self, engine: &mut Engine) {
        let hud = engine.hud();
        hud.set_score(self.state.score);
        hud.set_streak(self.state.streak);
        hud.set_level(self.state.level);
        hud.set_lives(self.state.lives);
        if let Some(prompt) = &self.prompt {
            hud.set_prompt(&prompt.text);
        }
    }

    /// Generate a prompt and populate the orbs
    pub fn start_round(&mut self, engine: &mut Engine) {
        self.orbs.clear();
        self.stats = TapStats::default();

        let prompt = Prompt::generate(engine.rng(), &self.modes.enabled());
        engine.hud().set_prompt(&prompt.text);

        let slots = self.state.slot_count();
        let wanted = (self.state.targets_per_round as usize).min(slots);
        let mut planted = vec![false; slots];
        for i in index::sample(engine.rng(), slots, wanted) {
            planted[i] = true;
        }

        let size = engine.size();
        let speed = self.state.orb_speed();
        let answer = prompt.tag();
        for correct in planted {
            let tag = if correct { answer } else { prompt.distractor(engine.rng()) };
            let orb = Orb::spawn(engine.rng(), size, speed, tag, correct);
            self.orbs.push(orb);
        }

        self.timer = self.state.round_time;
        self.phase = RoundPhase::Active;
        log::info!(
            "Round start: level {}, {} orbs, {} targets, answer {}",
            self.state.level,
            slots,
            wanted,
            answer
        );
        self.prompt = Some(prompt);
    }

    /// Advance orbs and the round timer
    pub fn step(&mut self, engine: &mut Engine, dt: f32) {
        if self.phase != RoundPhase::Active {
            return;
        }

        let size = engine.size();
        for orb in &mut self.orbs {
            orb.step(dt, size);
        }
        self.orbs.retain(|o| !o.is_expired());

        self.timer -= dt;
        if self.timer <= 0.0 {
            log::info!("Round timed out");
            self.lose(engine, false);
        }
    }

    /// Resolve a tap at `point` against every orb under it
    pub fn handle_tap(&mut self, engine: &mut Engine, point: Vec2) -> TapOutcome {
        let mut outcome = TapOutcome::default();
        if self.phase != RoundPhase::Active {
            return outcome;
        }

        // Topmost (last drawn) first
        for i in (0..self.orbs.len()).rev() {
            if !self.orbs[i].contains(point) {
                continue;
            }
            self.stats.taps += 1;
            if self.orbs[i].correct {
                self.stats.correct += 1;
                outcome.correct += 1;
                let orb = self.orbs.remove(i);
                Self::pop(engine, &orb);
                self.state.score = self.state.score.saturating_add(CORRECT_TAP_SCORE);
                engine.play(SoundEffect::Good);
            } else {
                self.stats.wrong += 1;
                outcome.wrong += 1;
                self.state.score = self.state.score.saturating_sub(WRONG_TAP_PENALTY);
                engine.play(SoundEffect::Bad);
            }
        }

        if !outcome.hit_anything() {
            return outcome;
        }
        log::debug!("Tap at {:?}: {:?}", point, outcome);
        engine.hud().set_score(self.state.score);

        let targets_left = self.orbs.iter().any(|o| o.correct);
        if outcome.correct > 0 && !targets_left {
            self.win(engine);
        } else if outcome.wrong > 0 && outcome.correct == 0 {
            self.state.lives = self.state.lives.saturating_sub(1);
            engine.hud().set_lives(self.state.lives);
            if self.state.lives == 0 {
                self.lose(engine, true);
            } else {
                self.state.save(engine.save());
            }
        } else {
            self.state.save(engine.save());
        }

        outcome
    }

    /// Burst plus a shrink-and-spring on the orb
    fn pop(engine: &mut Engine, orb: &Orb) {
        engine.burst(orb.pos, POP_BURST);
        if let Ok(mut anim) = orb.anim.try_borrow_mut() {
            anim.bump = POP_SCALE;
        }
        engine.tween(
            orb.anim.clone(),
            &[(Prop::Scale, 1.0)],
            POP_MS,
            Easing::BackOut,
            None,
        );
    }

    fn win(&mut self, engine: &mut Engine) {
        let accuracy = self.stats.accuracy();
        let time_fraction = self.time_fraction();
        let stars = star_rating(accuracy, time_fraction);

        self.state.best_stars = self.state.best_stars.max(stars);
        let bonus = (CLEAR_BONUS_BASE + CLEAR_BONUS_PER_STAR * stars as u32)
            .saturating_add(CLEAR_BONUS_PER_STREAK.saturating_mul(self.state.streak));
        self.state.score = self.state.score.saturating_add(bonus);
        self.state.streak = self.state.streak.saturating_add(1);
        let level = self.state.level;
        self.state.level = level.saturating_add(1).min(MAX_LEVEL);
        engine.play(SoundEffect::Fanfare);

        self.finish(
            engine,
            RoundSummary {
                won: true,
                stars,
                accuracy,
                time_fraction,
                level,
                lives: self.state.lives,
                score: self.state.score,
            },
        );
    }

    /// `lives_taken`: the tap path already removed the life
    fn lose(&mut self, engine: &mut Engine, lives_taken: bool) {
        if !lives_taken {
            self.state.lives = self.state.lives.saturating_sub(1);
        }
        self.state.streak = 0;
        engine.play(SoundEffect::Bad);

        self.finish(
            engine,
            RoundSummary {
                won: false,
                stars: 0,
                accuracy: self.stats.accuracy(),
                time_fraction: self.time_fraction(),
                level: self.state.level,
                lives: self.state.lives,
                score: self.state.score,
            },
        );
    }

    fn finish(&mut self, engine: &mut Engine, summary: RoundSummary) {
        self.phase = if summary.won { RoundPhase::Won } else { RoundPhase::Lost };
        self.orbs.clear();

        self.state.save(engine.save());
        self.sync_hud(engine);
        engine.hud().round_ended(&summary);

        log::info!("Round end: {}", summary.title());
        self.last_summary = Some(summary);
    }

    /// Back to level 1 with full lives
    pub fn reset_progress(&mut self, engine: &mut Engine) {
        self.state.reset_progress();
        self.state.save(engine.save());
        self.abandon();
        self.sync_hud(engine);
        log::info!("Progress reset");
    }

    /// Drop the current round without resolving it
    pub fn abandon(&mut self) {
        self.orbs.clear();
        self.prompt = None;
        self.phase = RoundPhase::Idle;
    }
}
