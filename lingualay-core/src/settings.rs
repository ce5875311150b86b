use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FromStr for FontSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            other => Err(CoreError::Parse(format!("unknown font size: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::Parse(format!("unknown theme: {other}"))),
        }
    }
}

pub const DEFAULT_NEW_CARDS_PER_DAY: u32 = 20;
pub const DEFAULT_MAX_REVIEW_TIME_MINUTES: u32 = 30;

/// User preferences.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub new_cards_per_day: u32,
    pub max_review_time_minutes: u32,
    pub show_timer: bool,
    pub card_font_size: FontSize,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            new_cards_per_day: DEFAULT_NEW_CARDS_PER_DAY,
            max_review_time_minutes: DEFAULT_MAX_REVIEW_TIME_MINUTES,
            show_timer: true,
            card_font_size: FontSize::default(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.new_cards_per_day == 0 {
            return Err(CoreError::Invalid("new cards per day must be at least 1"));
        }
        if self.max_review_time_minutes == 0 {
            return Err(CoreError::Invalid("max review time must be at least 1 minute"));
        }
        Ok(())
    }
}
