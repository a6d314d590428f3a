use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::database::entities::{todos, todos::Entity as Todos};

/// Fields of a todo about to be inserted. The caller supplies the uuid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub uuid: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Storage adapter handed to the API layer.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, todo: NewTodo) -> Result<todos::Model, DbErr>;

    async fn list(&self) -> Result<Vec<todos::Model>, DbErr>;

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<todos::Model>, DbErr>;

    /// Returns the number of rows touched.
    async fn set_completed(&self, uuid: &str, completed: bool) -> Result<u64, DbErr>;

    /// Returns the number of rows removed, which may be zero.
    async fn delete_by_uuid(&self, uuid: &str) -> Result<u64, DbErr>;
}

pub struct DatabaseTodoStore {
    db: DatabaseConnection,
}

impl DatabaseTodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for DatabaseTodoStore {
    async fn create(&self, todo: NewTodo) -> Result<todos::Model, DbErr> {
        let now = Utc::now();
        let model = todos::ActiveModel {
            uuid: Set(todo.uuid),
            title: Set(todo.title),
            description: Set(todo.description),
            completed: Set(todo.completed),
            file_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model.insert(&self.db).await
    }

    async fn list(&self) -> Result<Vec<todos::Model>, DbErr> {
        Todos::find()
            .order_by_asc(todos::Column::Id)
            .all(&self.db)
            .await
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<todos::Model>, DbErr> {
        Todos::find()
            .filter(todos::Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
    }

    async fn set_completed(&self, uuid: &str, completed: bool) -> Result<u64, DbErr> {
        let result = Todos::update_many()
            .col_expr(todos::Column::Completed, Expr::value(completed))
            .col_expr(todos::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(todos::Column::Uuid.eq(uuid))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_by_uuid(&self, uuid: &str) -> Result<u64, DbErr> {
        let result = Todos::delete_many()
            .filter(todos::Column::Uuid.eq(uuid))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
