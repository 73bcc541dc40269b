//! Player progress and round bookkeeping
//!
//! `PlayerState` is the persisted aggregate; everything else here lives only
//! for the current round.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::Save;

/// Orb speed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Maximum orb speed component at level 1 (pixels per 1/60 s)
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.1,
            Difficulty::Normal => 1.6,
            Difficulty::Hard => 2.2,
        }
    }
}

/// Persisted progress and round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerState {
    pub score: u32,
    pub streak: u32,
    pub level: u32,
    pub lives: u32,
    /// Round length in seconds
    pub round_time: f32,
    pub targets_per_round: u32,
    pub difficulty: Difficulty,
    pub best_stars: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            level: 1,
            lives: START_LIVES,
            round_time: 30.0,
            targets_per_round: 3,
            difficulty: Difficulty::Normal,
            best_stars: 0,
        }
    }
}

impl PlayerState {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "STATE";

    pub fn load(save: &Save) -> Self {
        let state = save.get(Self::STORAGE_KEY, Self::default()).sanitized();
        log::info!(
            "Player state: level {}, score {}, lives {}",
            state.level,
            state.score,
            state.lives
        );
        state
    }

    pub fn save(&self, save: &Save) {
        save.set(Self::STORAGE_KEY, self);
    }

    /// Pull stored values back into playable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.level = self.level.clamp(1, MAX_LEVEL);
        self.lives = self.lives.min(START_LIVES);
        self.targets_per_round = self.targets_per_round.clamp(1, MIN_SLOTS.max(SLOT_BASE + MAX_LEVEL));
        self.round_time = if self.round_time.is_finite() {
            self.round_time.max(1.0)
        } else {
            defaults.round_time
        };
        self.best_stars = self.best_stars.min(3);
        self
    }

    /// Orbs on screen this level
    pub fn slot_count(&self) -> usize {
        MIN_SLOTS.max(SLOT_BASE.saturating_add(self.level.min(MAX_LEVEL))) as usize
    }

    /// Speed cap for this level and difficulty
    pub fn orb_speed(&self) -> f32 {
        self.difficulty.base_speed() + self.level.saturating_sub(1) as f32 * ORB_SPEED_PER_LEVEL
    }

    /// Back to level 1 with full lives; configuration and best stars stay
    pub fn reset_progress(&mut self) {
        self.score = 0;
        self.streak = 0;
        self.level = 1;
        self.lives = START_LIVES;
    }

    pub fn apply(&mut self, round: &RoundSettings) {
        self.targets_per_round = round.targets_per_round.max(1);
        self.round_time = round.round_time.max(1.0);
        self.difficulty = round.difficulty;
    }
}

/// User-editable round configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSettings {
    pub targets_per_round: u32,
    pub round_time: f32,
    pub difficulty: Difficulty,
}


/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Active,
    Won,
    Lost,
}

/// Tap counters for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapStats {
    pub taps: u32,
    pub correct: u32,
    pub wrong: u32,
}

impl TapStats {
    pub fn accuracy(&self) -> f32 {
        self.correct as f32 / self.taps.max(1) as f32
    }
}

/// 1-3 stars for a cleared round
pub fn star_rating(accuracy: f32, time_fraction: f32) -> u8 {
    if accuracy >= THREE_STAR_ACCURACY && time_fraction >= THREE_STAR_TIME {
        3
    } else if accuracy >= TWO_STAR_ACCURACY {
        2
    } else {
        1
    }
}

/// What the UI needs to know when a round ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSummary {
    pub won: bool,
    /// 0 for a lost round
    pub stars: u8,
    pub accuracy: f32,
    pub time_fraction: f32,
    /// Level the round was played at
    pub level: u32,
    pub lives: u32,
    pub score: u32,
}

impl RoundSummary {
    pub fn is_game_over(&self) -> bool {
        !self.won && self.lives == 0
    }

    /// Overlay headline
    pub fn title(&self) -> String {
        if self.won {
            let stars = self.stars.min(3) as usize;
            format!(
                "Level {} Complete!  {}{}",
                self.level,
                "★".repeat(stars),
                "☆".repeat(3 - stars)
            )
        } else if self.is_game_over() {
            "Game Over 💥".to_string()
        } else {
            "Missed it, try again!".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, Save};

    #[test]
    fn test_star_thresholds() {
        assert_eq!(star_rating(1.0, 25.0 / 30.0), 3);
        assert_eq!(star_rating(0.95, 0.1), 2);
        assert_eq!(star_rating(0.8, 0.9), 2);
        assert_eq!(star_rating(0.5, 1.0), 1);
        assert_eq!(star_rating(0.9, 0.3), 3);
    }

    #[test]
    fn test_slot_count() {
        let mut s = PlayerState::default();
        assert_eq!(s.slot_count(), 6);
        s.level = 3;
        assert_eq!(s.slot_count(), 7);
        s.level = 10;
        assert_eq!(s.slot_count(), 14);
    }

    #[test]
    fn test_orb_speed_scales_with_level() {
        let mut s = PlayerState {
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        assert_eq!(s.orb_speed(), 2.2);
        s.level = 5;
        assert!((s.orb_speed() - 2.8).abs() < 1e-6);
    }

    #[test]
    fn test_state_json_shape() {
        let json = serde_json::to_value(PlayerState::default()).unwrap();
        assert_eq!(json["roundTime"], 30.0);
        assert_eq!(json["targetsPerRound"], 3);
        assert_eq!(json["difficulty"], "normal");
        assert_eq!(json["bestStars"], 0);
    }

    #[test]
    fn test_partial_state_fills_defaults() {
        let s: PlayerState = serde_json::from_str(r#"{"score":42,"level":4}"#).unwrap();
        assert_eq!(s.score, 42);
        assert_eq!(s.level, 4);
        assert_eq!(s.lives, 3);
        assert_eq!(s.round_time, 30.0);
    }

    #[test]
    fn test_out_of_range_state_clamped() {
        let storage = MemoryStorage::new();
        storage.insert_raw(
            PlayerState::STORAGE_KEY,
            r#"{"level":4294967295,"lives":99,"targetsPerRound":0,"bestStars":9}"#,
        );
        let save = Save::new(Box::new(storage));

        let s = PlayerState::load(&save);
        assert_eq!(s.level, MAX_LEVEL);
        assert_eq!(s.lives, START_LIVES);
        assert_eq!(s.targets_per_round, 1);
        assert_eq!(s.best_stars, 3);
        assert_eq!(s.slot_count(), (SLOT_BASE + MAX_LEVEL) as usize);
    }

    #[test]
    fn test_slot_count_saturates() {
        let s = PlayerState {
            level: u32::MAX,
            ..Default::default()
        };
        assert_eq!(s.slot_count(), (SLOT_BASE + MAX_LEVEL) as usize);
    }

    #[test]
    fn test_malformed_state_loads_defaults() {
        let storage = MemoryStorage::new();
        storage.insert_raw(PlayerState::STORAGE_KEY, "{not json");
        let save = Save::new(Box::new(storage));
        assert_eq!(PlayerState::load(&save), PlayerState::default());
    }

    #[test]
    fn test_apply_guards_zero_values() {
        let mut s = PlayerState::default();
        s.apply(&RoundSettings {
            targets_per_round: 0,
            round_time: 0.0,
            difficulty: Difficulty::Easy,
        });
        assert_eq!(s.targets_per_round, 1);
        assert_eq!(s.round_time, 1.0);
        assert_eq!(s.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_summary_titles() {
        let won = RoundSummary {
            won: true,
            stars: 2,
            accuracy: 0.8,
            time_fraction: 0.5,
            level: 4,
            lives: 3,
            score: 10,
        };
        assert_eq!(won.title(), "Level 4 Complete!  ★★☆");

        let over = RoundSummary { won: false, stars: 0, lives: 0, ..won };
        assert!(over.is_game_over());
        assert_eq!(over.title(), "Game Over 💥");

        let retry = RoundSummary { lives: 2, ..over };
        assert_eq!(retry.title(), "Missed it, try again!");
    }

}
