//! Start delay and execution duration of individual tasks.
//!
//! All values are whole milliseconds and never negative; clock skew between
//! the control plane's writers is clamped to zero.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Task, TaskId};

/// Id lookup over one task listing, used to resolve parents and upstreams.
pub struct TaskIndex<'a> {
    by_id: HashMap<&'a TaskId, &'a Task>,
}

impl<'a> TaskIndex<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            by_id: tasks.iter().map(|t| (&t.id, t)).collect(),
        }
    }

    pub fn get(&self, id: &TaskId) -> Option<&'a Task> {
        self.by_id.get(id).copied()
    }

    /// Instant at which `task` could have been started.
    ///
    /// With upstreams this is the last upstream update; every upstream must
    /// be part of the listing. Without upstreams it is the parent's start.
    pub fn ready_at(&self, task: &Task) -> Option<DateTime<Utc>> {
        if task.upstreams.is_empty() {
            let parent = self.get(task.parent_id.as_ref()?)?;
            return parent.started_at;
        }

        let mut ready_at = None;
        for id in &task.upstreams {
            let Some(upstream) = self.get(id) else {
                debug!(task = %task.id, upstream = %id, "upstream not in listing");
                return None;
            };
            ready_at = ready_at.max(Some(upstream.updated_at));
        }
        ready_at
    }

    /// `startedAt - ready_at`; `None` when either end is unknown.
    pub fn start_delay_millis(&self, task: &Task) -> Option<i64> {
        let started_at = task.started_at?;
        let ready_at = self.ready_at(task)?;
        Some(millis_between(ready_at, started_at))
    }
}

/// `updatedAt - startedAt`; `None` for tasks that never started.
pub fn exec_duration_millis(task: &Task) -> Option<i64> {
    let started_at = task.started_at?;
    Some(millis_between(started_at, task.updated_at))
}

fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from).num_milliseconds().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + millis)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_exec_duration_requires_started_at() {
        let pending = Task::new("1", "+wf", "planned", at(500)).group();
        assert_eq!(exec_duration_millis(&pending), None);

        let started = Task::new("2", "+wf+a", "success", at(1750)).with_started_at(at(250));
        assert_eq!(exec_duration_millis(&started), Some(1500));
    }

    #[test]
    fn test_exec_duration_clamps_clock_skew() {
        let task = Task::new("2", "+wf+a", "success", at(100)).with_started_at(at(300));
        assert_eq!(exec_duration_millis(&task), Some(0));
    }

    #[test]
    fn test_start_delay_from_parent_start() {
        let tasks = vec![
            Task::new("1", "+wf", "success", at(5000))
                .group()
                .with_started_at(at(0)),
            Task::new("2", "+wf+a", "success", at(900))
                .with_parent("1")
                .with_started_at(at(120)),
        ];
        let index = TaskIndex::new(&tasks);

        assert_eq!(index.start_delay_millis(&tasks[1]), Some(120));
        // the root has neither parent nor upstreams
        assert_eq!(index.start_delay_millis(&tasks[0]), None);
    }

    #[test]
    fn test_start_delay_waits_for_last_upstream() {
        let tasks = vec![
            Task::new("1", "+wf", "success", at(9000))
                .group()
                .with_started_at(at(0)),
            Task::new("2", "+wf+a", "success", at(1000))
                .with_parent("1")
                .with_started_at(at(10)),
            Task::new("3", "+wf+b", "success", at(3000))
                .with_parent("1")
                .with_started_at(at(20)),
            Task::new("4", "+wf+c", "success", at(4000))
                .with_parent("1")
                .with_upstreams(["2", "3"])
                .with_started_at(at(3250)),
        ];
        let index = TaskIndex::new(&tasks);

        assert_eq!(index.ready_at(&tasks[3]), Some(at(3000)));
        assert_eq!(index.start_delay_millis(&tasks[3]), Some(250));
    }

    #[test]
    fn test_start_delay_unknown_when_upstream_missing_or_not_started() {
        let tasks = vec![
            Task::new("1", "+wf", "running", at(0)).group(),
            Task::new("2", "+wf+a", "running", at(50))
                .with_parent("1")
                .with_started_at(at(40)),
            Task::new("3", "+wf+b", "running", at(90))
                .with_parent("1")
                .with_upstreams(["99"])
                .with_started_at(at(80)),
            Task::new("4", "+wf+c", "blocked", at(90)).with_parent("1"),
        ];
        let index = TaskIndex::new(&tasks);

        // parent never started
        assert_eq!(index.start_delay_millis(&tasks[1]), None);
        assert_eq!(index.start_delay_millis(&tasks[2]), None);
        assert_eq!(index.start_delay_millis(&tasks[3]), None);
    }
}
