use serde::{Deserialize, Serialize};

use crate::durations::{TaskIndex, exec_duration_millis};
use crate::error::SummaryError;
use crate::models::Task;
use crate::stats::Stats;

/// Aggregate view over the tasks of one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SummaryFields")]
pub struct TasksSummary {
    total_tasks: u64,
    total_invoked_tasks: u64,
    total_success_tasks: u64,
    start_delay_millis: Option<Stats>,
    exec_duration_of_group_tasks_millis: Option<Stats>,
    exec_duration_of_non_group_tasks_millis: Option<Stats>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryFields {
    total_tasks: u64,
    total_invoked_tasks: u64,
    total_success_tasks: u64,
    start_delay_millis: Option<Stats>,
    exec_duration_of_group_tasks_millis: Option<Stats>,
    exec_duration_of_non_group_tasks_millis: Option<Stats>,
}

impl TryFrom<SummaryFields> for TasksSummary {
    type Error = SummaryError;

    fn try_from(fields: SummaryFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.total_tasks,
            fields.total_invoked_tasks,
            fields.total_success_tasks,
            fields.start_delay_millis,
            fields.exec_duration_of_group_tasks_millis,
            fields.exec_duration_of_non_group_tasks_millis,
        )
    }
}

impl TasksSummary {
    pub fn new(
        total_tasks: u64,
        total_invoked_tasks: u64,
        total_success_tasks: u64,
        start_delay_millis: Option<Stats>,
        exec_duration_of_group_tasks_millis: Option<Stats>,
        exec_duration_of_non_group_tasks_millis: Option<Stats>,
    ) -> Result<Self, SummaryError> {
        if total_invoked_tasks > total_tasks {
            return Err(SummaryError::InvokedExceedsTotal {
                invoked: total_invoked_tasks,
                total: total_tasks,
            });
        }
        if total_success_tasks > total_invoked_tasks {
            return Err(SummaryError::SuccessExceedsInvoked {
                success: total_success_tasks,
                invoked: total_invoked_tasks,
            });
        }

        Ok(Self {
            total_tasks,
            total_invoked_tasks,
            total_success_tasks,
            start_delay_millis,
            exec_duration_of_group_tasks_millis,
            exec_duration_of_non_group_tasks_millis,
        })
    }

    /// Summarizes a listing.
    ///
    /// `totalSuccessTasks` counts tasks in the `success` state *that were
    /// invoked*, not every task in that state: group tasks can finish as
    /// `success` without a `startedAt`, and counting them would let successes
    /// exceed invoked tasks.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let index = TaskIndex::new(tasks);

        let invoked = tasks.iter().filter(|t| t.is_invoked());
        let total_invoked_tasks = invoked.clone().count() as u64;
        let total_success_tasks = invoked.filter(|t| t.is_success()).count() as u64;

        let start_delays = tasks.iter().filter_map(|t| index.start_delay_millis(t));

        Self {
            total_tasks: tasks.len() as u64,
            total_invoked_tasks,
            total_success_tasks,
            start_delay_millis: Stats::of_millis(start_delays),
            exec_duration_of_group_tasks_millis: Stats::of_millis(exec_durations(tasks, true)),
            exec_duration_of_non_group_tasks_millis: Stats::of_millis(exec_durations(tasks, false)),
        }
    }

    pub fn total_tasks(&self) -> u64 {
        self.total_tasks
    }

    pub fn total_invoked_tasks(&self) -> u64 {
        self.total_invoked_tasks
    }

    pub fn total_success_tasks(&self) -> u64 {
        self.total_success_tasks
    }

    pub fn start_delay_millis(&self) -> Option<&Stats> {
        self.start_delay_millis.as_ref()
    }

    pub fn exec_duration_of_group_tasks_millis(&self) -> Option<&Stats> {
        self.exec_duration_of_group_tasks_millis.as_ref()
    }

    pub fn exec_duration_of_non_group_tasks_millis(&self) -> Option<&Stats> {
        self.exec_duration_of_non_group_tasks_millis.as_ref()
    }
}

fn exec_durations(tasks: &[Task], is_group: bool) -> impl Iterator<Item = i64> + '_ {
    tasks
        .iter()
        .filter(move |t| t.is_group == is_group)
        .filter_map(exec_duration_millis)
}
