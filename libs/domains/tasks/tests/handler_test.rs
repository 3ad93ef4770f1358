//! Handler tests for the Tasks domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! The handlers run against an in-memory repository behind the same
//! `TaskRepository` trait as the PostgreSQL implementation, so routing,
//! extraction, and status-code behavior are exercised without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// Trait-compatible in-memory store mirroring the PostgreSQL repository's
/// behavior, including the reorder contract (unknown ids are ignored and
/// updated_at is left alone).
#[derive(Default)]
struct InMemoryTaskRepository {
    tasks: Mutex<Vec<Task>>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            priority: input.priority,
            sort_order: input.sort_order,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let mut tasks = self.tasks.lock().unwrap().clone();
        tasks.sort_by_key(|t| (t.sort_order, t.created_at));
        Ok(tasks)
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.apply_update(input);
        Ok(task.clone())
    }

    async fn replace(&self, id: Uuid, input: ReplaceTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.apply_replace(input);
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }

    async fn set_sort_order(&self, id: Uuid, sort_order: i32) -> TaskResult<bool> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.sort_order = sort_order;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> TaskResult<usize> {
        Ok(self.tasks.lock().unwrap().len())
    }
}

fn test_app() -> (axum::Router, TaskService<InMemoryTaskRepository>) {
    let service = TaskService::new(InMemoryTaskRepository::default());
    (handlers::router(service.clone()), service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn seed_task(service: &TaskService<InMemoryTaskRepository>, title: &str) -> Task {
    service
        .create_task(CreateTask {
            title: title.to_string(),
            description: String::new(),
            completed: false,
            priority: TaskPriority::Medium,
            sort_order: 0,
            due_date: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_task_returns_201_with_defaults() {
    let (app, _service) = test_app();

    let request = json_request("POST", "/", json!({"title": "Buy milk"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "");
    assert!(!task.completed);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.sort_order, 0);
    assert!(task.due_date.is_none());
}

#[tokio::test]
async fn test_create_task_empty_title_returns_400() {
    let (app, _service) = test_app();

    let request = json_request("POST", "/", json!({"title": ""}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_missing_title_returns_400() {
    let (app, _service) = test_app();

    let request = json_request("POST", "/", json!({"description": "no title"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_unknown_priority_returns_400() {
    let (app, _service) = test_app();

    let request = json_request(
        "POST",
        "/",
        json!({"title": "Buy milk", "priority": "urgent"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_task_returns_200() {
    let (app, service) = test_app();
    let created = seed_task(&service, "Read book").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.id, created.id);
    assert_eq!(task.title, "Read book");
}

#[tokio::test]
async fn test_get_task_missing_returns_404() {
    let (app, _service) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_task_invalid_uuid_returns_400() {
    let (app, _service) = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tasks_ordered_by_sort_order_then_created_at() {
    let (app, service) = test_app();

    for (title, sort_order) in [("third", 2), ("first", 0), ("second", 1)] {
        service
            .create_task(CreateTask {
                title: title.to_string(),
                description: String::new(),
                completed: false,
                priority: TaskPriority::Medium,
                sort_order,
                due_date: None,
            })
            .await
            .unwrap();
    }

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_replace_task_resets_unspecified_fields() {
    let (app, service) = test_app();

    let created = service
        .create_task(CreateTask {
            title: "Original".to_string(),
            description: "detailed notes".to_string(),
            completed: true,
            priority: TaskPriority::High,
            sort_order: 7,
            due_date: None,
        })
        .await
        .unwrap();

    let request = json_request(
        "PUT",
        &format!("/{}", created.id),
        json!({"title": "Replaced"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.title, "Replaced");
    assert_eq!(task.description, "");
    assert!(!task.completed);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.sort_order, 0);
    // Full replace must not change identity or creation time
    assert_eq!(task.id, created.id);
    assert_eq!(task.created_at, created.created_at);
}

#[tokio::test]
async fn test_replace_task_missing_returns_404() {
    let (app, _service) = test_app();

    let request = json_request(
        "PUT",
        &format!("/{}", Uuid::now_v7()),
        json!({"title": "ghost"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_task_updates_only_given_fields() {
    let (app, service) = test_app();
    let created = seed_task(&service, "Water plants").await;

    let request = json_request(
        "PATCH",
        &format!("/{}", created.id),
        json!({"completed": true}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert!(task.completed);
    assert_eq!(task.title, "Water plants");
    assert_eq!(task.created_at, created.created_at);
    assert!(task.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_patch_task_can_clear_due_date() {
    let (app, service) = test_app();

    let due: DateTime<Utc> = "2030-01-01T00:00:00Z".parse().unwrap();
    let created = service
        .create_task(CreateTask {
            title: "Pay rent".to_string(),
            description: String::new(),
            completed: false,
            priority: TaskPriority::Medium,
            sort_order: 0,
            due_date: Some(due),
        })
        .await
        .unwrap();

    let request = json_request(
        "PATCH",
        &format!("/{}", created.id),
        json!({"due_date": null}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task: Task = json_body(response.into_body()).await;
    assert!(task.due_date.is_none());
}

#[tokio::test]
async fn test_delete_task_returns_204_then_404() {
    let (app, service) = test_app();
    let created = seed_task(&service, "Throw out").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task_decrements_count_by_one() {
    let (app, service) = test_app();

    let doomed = seed_task(&service, "one").await;
    seed_task(&service, "two").await;
    seed_task(&service, "three").await;

    assert_eq!(service.count_tasks().await.unwrap(), 3);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", doomed.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(service.count_tasks().await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_task_missing_returns_404() {
    let (app, _service) = test_app();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_tasks_applies_new_positions() {
    let (app, service) = test_app();

    let a = seed_task(&service, "a").await;
    let b = seed_task(&service, "b").await;
    let c = seed_task(&service, "c").await;

    let request = json_request(
        "POST",
        "/reorder",
        json!({
            "task_orders": [
                {"id": c.id, "sort_order": 0},
                {"id": a.id, "sort_order": 1},
                {"id": b.id, "sort_order": 2},
            ]
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"status": "success"}));

    let tasks = service.list_tasks().await.unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["c", "a", "b"]);
}

#[tokio::test]
async fn test_reorder_tasks_skips_unknown_and_incomplete_entries() {
    let (app, service) = test_app();

    let a = seed_task(&service, "a").await;
    let b = seed_task(&service, "b").await;

    let request = json_request(
        "POST",
        "/reorder",
        json!({
            "task_orders": [
                {"id": Uuid::now_v7(), "sort_order": 0},
                {"sort_order": 5},
                {"id": b.id},
                {"id": b.id, "sort_order": 0},
                {"id": a.id, "sort_order": 1},
            ]
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let tasks = service.list_tasks().await.unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["b", "a"]);
}

#[tokio::test]
async fn test_reorder_tasks_empty_body_is_success() {
    let (app, _service) = test_app();

    let request = json_request("POST", "/reorder", json!({}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"status": "success"}));
}

#[tokio::test]
async fn test_reorder_does_not_touch_updated_at() {
    let (app, service) = test_app();
    let created = seed_task(&service, "stable").await;

    let request = json_request(
        "POST",
        "/reorder",
        json!({"task_orders": [{"id": created.id, "sort_order": 9}]}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let task = service.get_task(created.id).await.unwrap();
    assert_eq!(task.sort_order, 9);
    assert_eq!(task.updated_at, created.updated_at);
}
