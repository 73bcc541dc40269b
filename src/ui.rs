//! HUD sink
//!
//! The round controller pushes display values here; it never reads back.

use crate::sim::RoundSummary;

/// Receives display updates from the game
pub trait Hud {
    fn set_score(&mut self, score: u32);
    fn set_streak(&mut self, streak: u32);
    fn set_level(&mut self, level: u32);
    fn set_lives(&mut self, lives: u32);
    fn set_prompt(&mut self, text: &str);
    /// A round just finished
    fn round_ended(&mut self, summary: &RoundSummary);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl Hud for NullHud {
    fn set_score(&mut self, _score: u32) {}
    fn set_streak(&mut self, _streak: u32) {}
    fn set_level(&mut self, _level: u32) {}
    fn set_lives(&mut self, _lives: u32) {}
    fn set_prompt(&mut self, _text: &str) {}
    fn round_ended(&mut self, _summary: &RoundSummary) {}
}

/// Logs prompts and round results (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_score(&mut self, _score: u32) {}
    fn set_streak(&mut self, _streak: u32) {}
    fn set_level(&mut self, _level: u32) {}
    fn set_lives(&mut self, _lives: u32) {}

    fn set_prompt(&mut self, text: &str) {
        log::info!("Prompt: {}", text);
    }

    fn round_ended(&mut self, summary: &RoundSummary) {
        log::info!(
            "{} (score {}, lives {}, accuracy {:.0}%)",
            summary.title(),
            summary.score,
            summary.lives,
            summary.accuracy * 100.0
        );
    }
}

/// Text for the lives chip
pub fn hearts(lives: u32) -> String {
    "❤️".repeat(lives as usize)
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomHud;

#[cfg(target_arch = "wasm32")]
mod dom {
    use web_sys::{Document, Element};

    use super::{Hud, hearts};
    use crate::sim::RoundSummary;

    /// Writes into the page's HUD chips and the pause overlay
    pub struct DomHud {
        score: Option<Element>,
        streak: Option<Element>,
        level: Option<Element>,
        lives: Option<Element>,
        prompt: Option<Element>,
        overlay: Option<Element>,
        title: Option<Element>,
    }

    impl DomHud {
        pub fn new(document: &Document) -> Self {
            let get = |id: &str| {
                let el = document.get_element_by_id(id);
                if el.is_none() {
                    log::warn!("HUD element #{} missing", id);
                }
                el
            };
            Self {
                score: get("scoreChip"),
                streak: get("streakChip"),
                level: get("levelChip"),
                lives: get("livesChip"),
                prompt: get("prompt"),
                overlay: get("pauseOverlay"),
                title: get("pauseTitle"),
            }
        }

        fn text(el: &Option<Element>, text: &str) {
            if let Some(el) = el {
                el.set_text_content(Some(text));
            }
        }

        /// Show the pause overlay with `title`
        pub fn show_overlay(&self, title: &str) {
            Self::text(&self.title, title);
            if let Some(ov) = &self.overlay {
                let _ = ov.class_list().add_1("show");
            }
        }

        pub fn hide_overlay(&self) {
            if let Some(ov) = &self.overlay {
                let _ = ov.class_list().remove_1("show");
            }
        }
    }

    impl Hud for DomHud {
        fn set_score(&mut self, score: u32) {
            Self::text(&self.score, &format!("Score: {}", score));
        }

        fn set_streak(&mut self, streak: u32) {
            Self::text(&self.streak, &format!("Streak: {}", streak));
        }

        fn set_level(&mut self, level: u32) {
            Self::text(&self.level, &format!("Level: {}", level));
        }

        fn set_lives(&mut self, lives: u32) {
            Self::text(&self.lives, &hearts(lives));
        }

        fn set_prompt(&mut self, text: &str) {
            Self::text(&self.prompt, text);
        }

        fn round_ended(&mut self, summary: &RoundSummary) {
            self.show_overlay(&summary.title());
        }
    }
}
