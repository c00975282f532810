// Time block module
// A planner event with a concrete clock range, placed on the daily time-table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::timetable::{ClockTime, TimetableError};

/// Default block color (first entry of the planner palette)
pub const DEFAULT_BLOCK_COLOR: &str = "#ec4899";

/// Palette offered by the block editor
pub const BLOCK_COLORS: [(&str, &str); 6] = [
    ("Pink", "#ec4899"),
    ("Purple", "#a855f7"),
    ("Blue", "#3b82f6"),
    ("Green", "#10b981"),
    ("Yellow", "#f59e0b"),
    ("Red", "#ef4444"),
];

/// Event rendered on the time-table.
///
/// Owned by the event store; the grid only reads blocks and emits requests
/// to create or change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>, // HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>, // HH:MM, exclusive
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_color() -> String {
    DEFAULT_BLOCK_COLOR.to_string()
}

impl TimeBlock {
    /// Create a builder for constructing blocks with optional fields
    pub fn builder() -> TimeBlockBuilder {
        TimeBlockBuilder::new()
    }

    /// Parsed `(start, end)` if both times are present.
    ///
    /// Returns `Ok(None)` for blocks without a clock range and an error when
    /// either time is malformed.
    pub fn clock_range(&self) -> Result<Option<(ClockTime, ClockTime)>, TimetableError> {
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => {
                Ok(Some((ClockTime::parse(start)?, ClockTime::parse_end(end)?)))
            }
            _ => Ok(None),
        }
    }

    /// Whether the block should be placed on the grid at all.
    pub fn is_timed(&self) -> bool {
        !self.is_all_day && self.start_time.is_some() && self.end_time.is_some()
    }

    /// Validate the block
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.title.trim().is_empty() {
            return Err(TimetableError::InvalidBlock(
                "title cannot be empty".to_string(),
            ));
        }

        if !is_hex_color(&self.color) {
            return Err(TimetableError::InvalidBlock(format!(
                "color must be in hex format (#RRGGBB), got {:?}",
                self.color
            )));
        }

        if self.is_all_day {
            return Ok(());
        }

        match self.clock_range()? {
            Some((start, end)) if end <= start => Err(TimetableError::EmptyRange {
                start: start.to_string(),
                end: end.to_string(),
            }),
            Some(_) => Ok(()),
            None => Err(TimetableError::InvalidBlock(
                "timed block needs both start and end time".to_string(),
            )),
        }
    }

    /// Duration in minutes, if the block has a valid clock range
    pub fn duration_minutes(&self) -> Option<u32> {
        match self.clock_range() {
            Ok(Some((start, end))) if end > start => Some(end.minutes() - start.minutes()),
            _ => None,
        }
    }
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Partial fields for an in-place edit of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimeBlockUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Copy of `block` with the present fields replaced.
    pub fn apply_to(&self, block: &TimeBlock) -> TimeBlock {
        let mut updated = block.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(color) = &self.color {
            updated.color = color.clone();
        }
        if let Some(start) = &self.start_time {
            updated.start_time = Some(start.clone());
        }
        if let Some(end) = &self.end_time {
            updated.end_time = Some(end.clone());
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
        }
        updated
    }
}

/// Builder for creating blocks with optional fields
#[derive(Default)]
pub struct TimeBlockBuilder {
    id: Option<String>,
    title: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<String>,
    end_time: Option<String>,
    color: Option<String>,
    is_all_day: bool,
    description: Option<String>,
}

impl TimeBlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set both clock times ("HH:MM")
    pub fn time_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build and validate the block. A missing id is left empty for the
    /// store to assign.
    pub fn build(self) -> Result<TimeBlock, TimetableError> {
        let block = TimeBlock {
            id: self.id.unwrap_or_default(),
            title: self
                .title
                .ok_or_else(|| TimetableError::InvalidBlock("title is required".to_string()))?,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color.unwrap_or_else(default_color),
            is_all_day: self.is_all_day,
            description: self.description,
        };
        block.validate()?;
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let block = TimeBlock::builder()
            .title("Focus")
            .time_range("09:00", "10:30")
            .build()
            .unwrap();

        assert_eq!(block.color, DEFAULT_BLOCK_COLOR);
        assert!(!block.is_all_day);
        assert!(block.is_timed());
        assert_eq!(block.duration_minutes(), Some(90));
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let result = TimeBlock::builder()
            .title("Backwards")
            .time_range("10:00", "09:00")
            .build();

        assert_eq!(
            result,
            Err(TimetableError::EmptyRange {
                start: "10:00".to_string(),
                end: "09:00".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert!(TimeBlock::builder()
            .title("  ")
            .time_range("09:00", "10:00")
            .build()
            .is_err());
        assert!(TimeBlock::builder()
            .title("Color")
            .time_range("09:00", "10:00")
            .color("blue")
            .build()
            .is_err());
        assert!(matches!(
            TimeBlock::builder().title("Time").time_range("9:00", "10:00").build(),
            Err(TimetableError::InvalidTimeFormat(_))
        ));
        assert!(TimeBlock::builder().title("Untimed").build().is_err());
    }

    #[test]
    fn test_all_day_block_needs_no_times() {
        let block = TimeBlock::builder()
            .title("Holiday")
            .all_day(true)
            .build()
            .unwrap();
        assert!(!block.is_timed());
        assert_eq!(block.duration_minutes(), None);
    }

    #[test]
    fn test_end_of_day_is_valid_end() {
        let block = TimeBlock::builder()
            .title("Late")
            .time_range("23:30", "24:00")
            .build()
            .unwrap();
        assert_eq!(block.duration_minutes(), Some(30));
    }

    #[test]
    fn test_update_applies_present_fields() {
        let block = TimeBlock::builder()
            .id("b1")
            .title("Old")
            .time_range("09:00", "10:00")
            .build()
            .unwrap();
        let update = TimeBlockUpdate {
            title: Some("New".to_string()),
            end_time: Some("11:00".to_string()),
            ..Default::default()
        };

        let updated = update.apply_to(&block);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.start_time.as_deref(), Some("09:00"));
        assert_eq!(updated.end_time.as_deref(), Some("11:00"));
        assert_eq!(updated.id, "b1");
        assert!(!update.is_empty());
        assert!(TimeBlockUpdate::default().is_empty());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r##"{
            "id": "e1",
            "title": "Standup",
            "date": "2025-03-04",
            "startTime": "09:20",
            "endTime": "09:50",
            "color": "#3b82f6",
            "isAllDay": false
        }"##;
        let block: TimeBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.start_time.as_deref(), Some("09:20"));
        assert_eq!(block.date, NaiveDate::from_ymd_opt(2025, 3, 4));

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["endTime"], "09:50");
        assert!(value.get("description").is_none());
    }
}
