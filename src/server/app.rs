use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{files, health, todos};
use crate::services::{DatabaseTodoStore, FileStore, TodoStore};

#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<dyn TodoStore>,
    pub files: FileStore,
}

impl AppState {
    pub fn new(todos: Arc<dyn TodoStore>, files: FileStore) -> Self {
        Self { todos, files }
    }

    pub fn with_database(db: DatabaseConnection, files: FileStore) -> Self {
        Self::new(Arc::new(DatabaseTodoStore::new(db)), files)
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(todo_routes())
        .merge(file_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", post(todos::create_todo).get(todos::list_todos))
        .route(
            "/todos/:uuid",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/upload",
            post(files::upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/files/list", get(files::list_files))
        .route("/files/download/:filename", get(files::download_file))
        .route("/files/:filename", delete(files::delete_file))
}
