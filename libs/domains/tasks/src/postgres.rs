use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, ReplaceTask, Task, UpdateTask},
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(task_id = %model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::SortOrder)
            .order_by_asc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateTask) -> TaskResult<Task> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model: entity::ActiveModel = task.into();
        let updated_model = self.base.update(active_model).await?;

        tracing::info!(task_id = %id, "Updated task");
        Ok(updated_model.into())
    }

    async fn replace(&self, id: Uuid, input: ReplaceTask) -> TaskResult<Task> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_replace(input);

        let active_model: entity::ActiveModel = task.into();
        let replaced_model = self.base.update(active_model).await?;

        tracing::info!(task_id = %id, "Replaced task");
        Ok(replaced_model.into())
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_sort_order(&self, id: Uuid, sort_order: i32) -> TaskResult<bool> {
        // Targeted column update; deliberately leaves updated_at alone so a
        // reorder does not register as a content change
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::SortOrder, Expr::value(sort_order))
            .filter(entity::Column::Id.eq(id))
            .exec(self.base.db())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> TaskResult<usize> {
        let count = entity::Entity::find().count(self.base.db()).await?;
        Ok(count as usize)
    }
}
