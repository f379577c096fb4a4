use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Factor range and per-question time budget for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub max_factor: u32,
    pub timer_secs: u32,
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                max_factor: 5,
                timer_secs: 15,
            },
            Difficulty::Medium => DifficultyConfig {
                max_factor: 8,
                timer_secs: 10,
            },
            Difficulty::Hard => DifficultyConfig {
                max_factor: 10,
                timer_secs: 7,
            },
        }
    }

    pub const fn max_factor(self) -> u32 {
        self.config().max_factor
    }

    pub const fn timer_secs(self) -> u32 {
        self.config().timer_secs
    }

    /// Menu shortcut: 1 = easy, 2 = medium, 3 = hard
    pub fn from_menu_key(c: char) -> Option<Self> {
        match c {
            '1' | 'e' => Some(Difficulty::Easy),
            '2' | 'm' => Some(Difficulty::Medium),
            '3' | 'h' => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// One-line summary shown on the start menu
    pub fn blurb(self) -> String {
        let cfg = self.config();
        format!("Tables 1-{} • {}s", cfg.max_factor, cfg.timer_secs)
    }
}
