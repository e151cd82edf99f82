// Source of task records for an attempt.
// Implementations: HttpTaskSource (taskscope-cli), in-memory fakes in tests.

use async_trait::async_trait;

use crate::models::Task;

#[async_trait]
pub trait TaskSource: Send + Sync {
    /// All tasks of `attempt_id`, in the order the control plane returns them.
    async fn list_tasks(&self, attempt_id: &str) -> anyhow::Result<Vec<Task>>;
}
