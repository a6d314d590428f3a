use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::database::entities::todos;
use crate::errors::AppError;
use crate::server::app::AppState;
use crate::server::extract::ApiJson;
use crate::services::NewTodo;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Only `completed` is applied; any other field in the body is accepted and ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub completed: bool,
}

pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<todos::Model>), AppError> {
    let todo = state
        .todos
        .create(NewTodo {
            uuid: Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
        })
        .await?;

    debug!("Created todo {}", todo.uuid);
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<todos::Model>>, AppError> {
    let todos = state.todos.list().await?;
    Ok(Json(todos))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<todos::Model>, AppError> {
    let todo = state
        .todos
        .find_by_uuid(&uuid)
        .await
        .map_err(|err| AppError::NotFound(err.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Todo {} not found", uuid)))?;

    Ok(Json(todo))
}

/// An unknown uuid updates nothing, and the re-read then answers 404 rather
/// than returning an empty todo.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    ApiJson(payload): ApiJson<UpdateTodoRequest>,
) -> Result<Json<todos::Model>, AppError> {
    let updated = state.todos.set_completed(&uuid, payload.completed).await?;
    debug!("Updated {} row(s) for todo {}", updated, uuid);

    let todo = state
        .todos
        .find_by_uuid(&uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Todo {} not found", uuid)))?;

    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = state.todos.delete_by_uuid(&uuid).await?;
    debug!("Deleted {} row(s) for todo {}", deleted, uuid);

    Ok(StatusCode::NO_CONTENT)
}
