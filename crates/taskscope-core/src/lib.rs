pub mod durations;
pub mod error;
pub mod models;
pub mod printer;
pub mod sink;
pub mod source;
pub mod stats;
pub mod summary;
pub mod time;

pub use error::{ShowError, ShowResult, SinkError, StatsError, SummaryError, TaskError};
pub use models::{Config, Task, TaskCollection, TaskId};
pub use printer::{JsonPrinter, Printer, TextPrinter};
pub use sink::{LineSink, MemorySink, WriterSink};
pub use source::TaskSource;
pub use stats::Stats;
pub use summary::TasksSummary;
pub use time::{LocalTimeFormatter, TimeFormatter, UtcTimeFormatter};
