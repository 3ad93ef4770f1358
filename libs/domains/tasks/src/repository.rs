use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{CreateTask, ReplaceTask, Task, UpdateTask};

/// Repository trait for Task persistence
///
/// Defines the data access interface for tasks; the service layer only
/// depends on this trait, never on a concrete backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// List all tasks ordered by sort_order, then creation time
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Partially update an existing task
    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task>;

    /// Fully replace an existing task
    async fn replace(&self, id: Uuid, input: ReplaceTask) -> TaskResult<Task>;

    /// Delete a task by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> TaskResult<bool>;

    /// Set the sort position of a single task without touching updated_at
    ///
    /// Returns false when the id does not match any task.
    async fn set_sort_order(&self, id: Uuid, sort_order: i32) -> TaskResult<bool>;

    /// Count all tasks
    async fn count(&self) -> TaskResult<usize>;
}
