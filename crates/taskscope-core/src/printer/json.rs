use crate::error::ShowResult;
use crate::models::Task;
use crate::printer::Printer;
use crate::sink::LineSink;
use crate::summary::TasksSummary;

/// Single-line compact JSON, decodable with the same model types.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrinter;

impl Printer for JsonPrinter {
    fn show_tasks(&self, sink: &mut dyn LineSink, tasks: &[Task]) -> ShowResult<()> {
        let json = serde_json::to_string(tasks)?;
        sink.write_line(&json)?;
        Ok(())
    }

    fn show_summary(&self, sink: &mut dyn LineSink, summary: &TasksSummary) -> ShowResult<()> {
        let json = serde_json::to_string(summary)?;
        sink.write_line(&json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::stats::Stats;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_listing_is_empty_array() {
        let mut sink = MemorySink::new();
        JsonPrinter.show_tasks(&mut sink, &[]).expect("show tasks");
        assert_eq!(sink.lines(), ["[]"]);
    }

    #[test]
    fn test_listing_output_decodes_back_to_tasks() {
        let updated = Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts");
        let tasks = vec![
            Task::new("42", "+test", "success", updated).group(),
            Task::new("43", "+test+start", "success", updated)
                .with_parent("42")
                .with_started_at(updated),
        ];

        let mut sink = MemorySink::new();
        JsonPrinter.show_tasks(&mut sink, &tasks).expect("show tasks");

        let lines = sink.into_lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains('\n'));
        let decoded: Vec<Task> = serde_json::from_str(&lines[0]).expect("decode");
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn test_summary_output_is_one_line() {
        let summary =
            TasksSummary::new(3, 2, 1, Stats::of_millis([5]), None, None).expect("summary");
        let mut sink = MemorySink::new();
        JsonPrinter.show_summary(&mut sink, &summary).expect("show summary");
        assert_eq!(
            sink.lines(),
            [r#"{"totalTasks":3,"totalInvokedTasks":2,"totalSuccessTasks":1,"startDelayMillis":{"count":1,"mean":5.0,"populationStandardDeviation":0.0},"execDurationOfGroupTasksMillis":null,"execDurationOfNonGroupTasksMillis":null}"#]
        );
    }
}
