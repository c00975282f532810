// Settings module
// User preferences that drive the time-table

use serde::{Deserialize, Serialize};

use crate::services::timetable::TimeUnit;

/// How the day's time-table is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAddressing {
    /// One row per hour with sub-columns
    #[default]
    Rows,
    /// One continuous column of cells
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub time_table_unit: TimeUnit,
    pub addressing: GridAddressing,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_table_unit: TimeUnit::Ten,
            addressing: GridAddressing::Rows,
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        if self.theme != "light" && self.theme != "dark" {
            return Err(format!("theme must be \"light\" or \"dark\", got {:?}", self.theme));
        }

        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        self.theme == "dark"
    }
}
