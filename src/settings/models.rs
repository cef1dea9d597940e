use serde::{Deserialize, Serialize};

use crate::flashcards::Grade;

use super::SettingsError;

/// Day offsets a parent configures for each grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentSettings {
    #[serde(default = "default_again_days")]
    pub again_days: u32,
    #[serde(default = "default_hard_days")]
    pub hard_days: u32,
    #[serde(default = "default_easy_days")]
    pub easy_days: u32,
}

fn default_again_days() -> u32 {
    0
}

fn default_hard_days() -> u32 {
    1
}

fn default_easy_days() -> u32 {
    3
}

impl Default for ParentSettings {
    fn default() -> Self {
        Self {
            again_days: default_again_days(),
            hard_days: default_hard_days(),
            easy_days: default_easy_days(),
        }
    }
}

impl ParentSettings {
    pub fn days_for(&self, grade: Grade) -> u32 {
        match grade {
            Grade::Again => self.again_days,
            Grade::Hard => self.hard_days,
            Grade::Easy => self.easy_days,
        }
    }
}

/// Raw text entered in the settings form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub again_days: String,
    pub hard_days: String,
    pub easy_days: String,
}

impl SettingsForm {
    pub fn from_settings(settings: &ParentSettings) -> Self {
        Self {
            again_days: settings.again_days.to_string(),
            hard_days: settings.hard_days.to_string(),
            easy_days: settings.easy_days.to_string(),
        }
    }

    /// Parse the three fields. All must be integers, none negative.
    pub fn parse(&self) -> Result<ParentSettings, SettingsError> {
        let fields = [&self.again_days, &self.hard_days, &self.easy_days];
        let mut parsed = [0i64; 3];
        for (slot, raw) in parsed.iter_mut().zip(fields) {
            *slot = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| SettingsError::NotAnInteger(raw.clone()))?;
        }
        if parsed.iter().any(|d| *d < 0) {
            return Err(SettingsError::NegativeInterval);
        }
        let to_days = |d: i64| u32::try_from(d).map_err(|_| SettingsError::NotAnInteger(d.to_string()));

        Ok(ParentSettings {
            again_days: to_days(parsed[0])?,
            hard_days: to_days(parsed[1])?,
            easy_days: to_days(parsed[2])?,
        })
    }
}
