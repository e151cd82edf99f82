//! Renderers for task listings and summaries.
//!
//! A printer never buffers: every logical line goes to the [`LineSink`] as
//! soon as it is produced, so a failing sink leaves the earlier lines written.

mod json;
mod text;

pub use json::JsonPrinter;
pub use text::TextPrinter;

use crate::error::ShowResult;
use crate::models::Task;
use crate::sink::LineSink;
use crate::summary::TasksSummary;

pub trait Printer {
    fn show_tasks(&self, sink: &mut dyn LineSink, tasks: &[Task]) -> ShowResult<()>;

    fn show_summary(&self, sink: &mut dyn LineSink, summary: &TasksSummary) -> ShowResult<()>;
}
