use chrono::{DateTime, TimeZone};

const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_FORMAT: &str = "%a, %b %-d";

/// Wall clock text shown under the speed.
pub struct ClockFormat {}

impl ClockFormat {
    pub fn new() -> Self {
        ClockFormat {}
    }

    pub fn format_time<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        now.format(TIME_FORMAT).to_string()
    }

    pub fn format_date<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        now.format(DATE_FORMAT).to_string()
    }
}
