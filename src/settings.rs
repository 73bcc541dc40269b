//! Game settings and preferences
//!
//! Persisted separately from player progress, one storage key per concern.

use serde::{Deserialize, Serialize};

use crate::persistence::Save;
use crate::sim::Category;

/// Which prompt categories can come up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modes {
    pub numbers: bool,
    pub letters: bool,
    pub colors: bool,
    pub addsub: bool,
    pub shapes: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            numbers: true,
            letters: true,
            colors: true,
            addsub: true,
            shapes: false,
        }
    }
}

impl Modes {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "MODES";

    /// Enabled categories, in display order
    pub fn enabled(&self) -> Vec<Category> {
        [
            (self.numbers, Category::Numbers),
            (self.letters, Category::Letters),
            (self.colors, Category::Colors),
            (self.addsub, Category::AddSub),
            (self.shapes, Category::Shapes),
        ]
        .into_iter()
        .filter_map(|(on, c)| on.then_some(c))
        .collect()
    }

    pub fn load(save: &Save) -> Self {
        save.get(Self::STORAGE_KEY, Self::default())
    }

    pub fn save(&self, save: &Save) {
        save.set(Self::STORAGE_KEY, self);
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub modes: Modes,
    /// Sound effects on
    pub sfx_on: bool,
    /// Music on (stored for the settings screen; nothing plays music yet)
    pub music_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modes: Modes::default(),
            sfx_on: true,
            music_on: false,
        }
    }
}

impl Settings {
    const SFX_KEY: &'static str = "SFX_ON";
    const MUSIC_KEY: &'static str = "MUSIC_ON";

    pub fn load(save: &Save) -> Self {
        let defaults = Self::default();
        let settings = Self {
            modes: Modes::load(save),
            sfx_on: save.get(Self::SFX_KEY, defaults.sfx_on),
            music_on: save.get(Self::MUSIC_KEY, defaults.music_on),
        };
        log::info!(
            "Settings: sfx {}, modes {:?}",
            settings.sfx_on,
            settings.modes.enabled()
        );
        settings
    }

    pub fn save(&self, save: &Save) {
        self.modes.save(save);
        save.set(Self::SFX_KEY, &self.sfx_on);
        save.set(Self::MUSIC_KEY, &self.music_on);
        log::info!("Settings saved");
    }
}
