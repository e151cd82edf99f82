use crate::error::ShowResult;
use crate::models::{Config, Task};
use crate::printer::Printer;
use crate::sink::LineSink;
use crate::stats::Stats;
use crate::summary::TasksSummary;
use crate::time::{LocalTimeFormatter, TimeFormatter};

/// Fixed-layout, human-readable output.
///
/// Each task takes eleven indented lines plus a blank separator, followed by
/// an `N entries.` trailer for the whole listing.
pub struct TextPrinter {
    formatter: Box<dyn TimeFormatter>,
}

impl TextPrinter {
    pub fn new(formatter: impl TimeFormatter + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
        }
    }

    fn show_task(&self, sink: &mut dyn LineSink, task: &Task) -> ShowResult<()> {
        let started = task
            .started_at
            .map(|t| self.formatter.format_time(t))
            .unwrap_or_default();
        let parent = task
            .parent_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "null".to_string());

        sink.write_line(&format!("   id: {}", task.id))?;
        sink.write_line(&format!("   name: {}", task.full_name))?;
        sink.write_line(&format!("   state: {}", task.state))?;
        sink.write_line(&format!("   started: {}", started))?;
        sink.write_line(&format!(
            "   updated: {}",
            self.formatter.format_time(task.updated_at)
        ))?;
        sink.write_line(&format!("   config: {}", params(&task.config)?))?;
        sink.write_line(&format!("   parent: {}", parent))?;
        sink.write_line(&format!(
            "   upstreams: {}",
            serde_json::to_string(&task.upstreams)?
        ))?;
        sink.write_line(&format!("   export params: {}", params(&task.export_params)?))?;
        sink.write_line(&format!("   store params: {}", params(&task.store_params)?))?;
        sink.write_line(&format!("   state params: {}", params(&task.state_params)?))?;
        sink.write_line("")?;
        Ok(())
    }
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self::new(LocalTimeFormatter)
    }
}

impl Printer for TextPrinter {
    fn show_tasks(&self, sink: &mut dyn LineSink, tasks: &[Task]) -> ShowResult<()> {
        for task in tasks {
            self.show_task(sink, task)?;
        }
        sink.write_line(&format!("{} entries.", tasks.len()))?;
        Ok(())
    }

    fn show_summary(&self, sink: &mut dyn LineSink, summary: &TasksSummary) -> ShowResult<()> {
        sink.write_line(&format!("   total tasks: {}", summary.total_tasks()))?;
        sink.write_line(&format!(
            "   total invoked tasks: {}",
            summary.total_invoked_tasks()
        ))?;
        sink.write_line(&format!(
            "   total success tasks: {}",
            summary.total_success_tasks()
        ))?;

        let blocks = [
            ("start delay (ms)", summary.start_delay_millis()),
            (
                "exec duration of group tasks (ms)",
                summary.exec_duration_of_group_tasks_millis(),
            ),
            (
                "exec duration of non-group tasks (ms)",
                summary.exec_duration_of_non_group_tasks_millis(),
            ),
        ];
        for (title, stats) in blocks {
            if let Some(stats) = stats {
                show_stats(sink, title, stats)?;
            }
        }
        Ok(())
    }
}

fn show_stats(sink: &mut dyn LineSink, title: &str, stats: &Stats) -> ShowResult<()> {
    sink.write_line(&format!("   {}:", title))?;
    sink.write_line(&format!("       average: {}", stats.mean_millis()))?;
    sink.write_line(&format!("       stddev: {}", stats.stddev_millis()))?;
    Ok(())
}

fn params(config: &Config) -> ShowResult<String> {
    Ok(config.to_json()?)
}
