use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, ReorderRequest, ReplaceTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

// Manual impl so cloning does not require R: Clone
impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List all tasks in display order
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Partially update a task
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Fully replace a task
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn replace_task(&self, id: Uuid, input: ReplaceTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.replace(id, input).await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }

    /// Apply a bulk reorder, one entry at a time
    ///
    /// Entries missing an id or a sort_order are skipped, and ids that match
    /// no task are silently ignored. A database failure on any entry aborts
    /// the rest of the batch.
    #[instrument(skip(self, request), fields(entries = request.task_orders.len()))]
    pub async fn reorder_tasks(&self, request: ReorderRequest) -> TaskResult<()> {
        for entry in request.task_orders {
            let (Some(id), Some(sort_order)) = (entry.id, entry.sort_order) else {
                tracing::debug!("Skipping incomplete reorder entry");
                continue;
            };

            if !self.repository.set_sort_order(id, sort_order).await? {
                tracing::debug!(task_id = %id, "Reorder entry matched no task");
            }
        }

        Ok(())
    }

    /// Count all tasks
    pub async fn count_tasks(&self) -> TaskResult<usize> {
        self.repository.count().await
    }
}
