use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use tracing::info;

use taskscope_core::{LineSink, TaskSource, TasksSummary};

use crate::config::TimeZoneSetting;
use crate::format::OutputFormat;

#[derive(Args)]
pub struct Tasks {
    /// Attempt ID
    pub attempt_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print aggregate statistics instead of the task list
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}

impl Tasks {
    pub async fn execute(
        self,
        source: Arc<dyn TaskSource>,
        time_zone: TimeZoneSetting,
        sink: &mut dyn LineSink,
    ) -> Result<()> {
        let tasks = source
            .list_tasks(&self.attempt_id)
            .await
            .with_context(|| format!("Failed to fetch tasks of attempt {}", self.attempt_id))?;
        info!(attempt_id = %self.attempt_id, tasks = tasks.len(), "fetched tasks");

        let printer = self.format.printer(time_zone);
        if self.summary {
            let summary = TasksSummary::from_tasks(&tasks);
            printer
                .show_summary(sink, &summary)
                .context("Failed to print task summary")?;
        } else {
            printer
                .show_tasks(sink, &tasks)
                .context("Failed to print tasks")?;
        }

        Ok(())
    }
}
