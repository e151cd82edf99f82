use chrono::{DateTime, Local, Utc};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Human-readable rendering of instants in text output.
pub trait TimeFormatter {
    fn format_time(&self, instant: DateTime<Utc>) -> String;
}

/// Renders in the platform's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeFormatter;

impl TimeFormatter for LocalTimeFormatter {
    fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&Local).format(TIME_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UtcTimeFormatter;

impl TimeFormatter for UtcTimeFormatter {
    fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant.format(TIME_FORMAT).to_string()
    }
}
