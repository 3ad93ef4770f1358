use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Task priority levels
// No strum EnumString here: DeriveActiveEnum already provides TryFrom<&str>
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    #[sea_orm(string_value = "low")]
    Low,
    /// Default priority
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// Task entity - represents a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// Whether the task is completed
    pub completed: bool,
    /// Task priority
    pub priority: TaskPriority,
    /// Position in the user-defined ordering
    pub sort_order: i32,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub sort_order: i32,
    pub due_date: Option<DateTime<Utc>>,
}

/// DTO for fully replacing a task (PUT semantics)
///
/// Fields left out of the request body fall back to their defaults, so a
/// replace always describes the complete new state of the task.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReplaceTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub sort_order: i32,
    pub due_date: Option<DateTime<Utc>>,
}

/// DTO for partially updating a task (PATCH semantics)
///
/// Only the fields present in the request body are changed.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, Default)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub sort_order: Option<i32>,
    /// Double option so `"due_date": null` clears the date while an absent
    /// field leaves it untouched
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Bulk reorder request body
///
/// Entries with a missing `id` or `sort_order` are skipped, as are ids that
/// do not match any task. The operation is best-effort per entry.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReorderRequest {
    #[serde(default)]
    pub task_orders: Vec<TaskOrder>,
}

/// A single (task id, new position) pair within a reorder request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TaskOrder {
    pub id: Option<Uuid>,
    pub sort_order: Option<i32>,
}

/// Response body for a completed reorder
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReorderResponse {
    pub status: String,
}

impl ReorderResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

impl Task {
    /// Apply a partial update, touching `updated_at`
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(sort_order) = update.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        self.updated_at = Utc::now();
    }

    /// Replace every mutable field, preserving `id` and `created_at`
    pub fn apply_replace(&mut self, replace: ReplaceTask) {
        self.title = replace.title;
        self.description = replace.description;
        self.completed = replace.completed;
        self.priority = replace.priority;
        self.sort_order = replace.sort_order;
        self.due_date = replace.due_date;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_priority_displays_lowercase() {
        assert_eq!(TaskPriority::Low.to_string(), "low");
        assert_eq!(TaskPriority::Medium.to_string(), "medium");
        assert_eq!(TaskPriority::High.to_string(), "high");
    }

    #[test]
    fn test_priority_db_value_matches_serde() {
        let priority: TaskPriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(priority, TaskPriority::High);
        assert_eq!(priority.to_value(), "high");
    }

    #[test]
    fn test_priority_rejects_unknown_value() {
        let result = serde_json::from_str::<TaskPriority>("\"urgent\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }
}
