// Test fixtures - reusable test data
// Provides consistent blocks and days across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use planner_timetable::models::time_block::TimeBlock;

/// Sample days for testing
pub mod dates {
    use super::*;

    /// Monday, June 2, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }
}

/// Sample blocks for testing
pub mod blocks {
    use super::*;

    pub fn block(id: &str, title: &str, start: &str, end: &str) -> TimeBlock {
        TimeBlock::builder()
            .id(id)
            .title(title)
            .time_range(start, end)
            .build()
            .unwrap()
    }

    /// 09:20-09:50, inside a single hour row
    pub fn single_row() -> TimeBlock {
        block("single", "Standup", "09:20", "09:50")
    }

    /// 09:40-10:20, crossing one hour boundary
    pub fn spanning() -> TimeBlock {
        block("spanning", "Review", "09:40", "10:20")
    }

    /// 09:30-10:00, ending exactly on the hour
    pub fn ends_on_hour() -> TimeBlock {
        block("on-hour", "Focus", "09:30", "10:00")
    }

    pub fn all_day() -> TimeBlock {
        TimeBlock::builder()
            .id("all-day")
            .title("Holiday")
            .all_day(true)
            .build()
            .unwrap()
    }

    /// A typical working day
    pub fn workday() -> Vec<TimeBlock> {
        vec![
            block("b1", "Standup", "09:00", "09:15"),
            block("b2", "Deep work", "09:30", "12:00"),
            block("b3", "Lunch", "12:00", "13:00"),
            block("b4", "1:1", "14:10", "14:40"),
            block("b5", "Wrap up", "17:45", "18:30"),
            all_day(),
        ]
    }

    /// Seed file contents in the store's JSON format
    pub fn workday_json() -> &'static str {
        r##"[
            {"id": "b1", "title": "Standup", "startTime": "09:00", "endTime": "09:15"},
            {"id": "b2", "title": "Deep work", "startTime": "09:30", "endTime": "12:00", "color": "#3b82f6"},
            {"title": "Lunch", "date": "2025-06-03", "startTime": "12:00", "endTime": "13:00"}
        ]"##
    }
}
