use clap::ValueEnum;

use taskscope_core::{JsonPrinter, LocalTimeFormatter, Printer, TextPrinter, UtcTimeFormatter};

use crate::config::TimeZoneSetting;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented, human-readable lines
    #[default]
    Text,
    /// One line of compact JSON
    Json,
}

impl OutputFormat {
    pub fn printer(self, time_zone: TimeZoneSetting) -> Box<dyn Printer> {
        match (self, time_zone) {
            (Self::Text, TimeZoneSetting::Local) => Box::new(TextPrinter::new(LocalTimeFormatter)),
            (Self::Text, TimeZoneSetting::Utc) => Box::new(TextPrinter::new(UtcTimeFormatter)),
            (Self::Json, _) => Box::new(JsonPrinter),
        }
    }
}
