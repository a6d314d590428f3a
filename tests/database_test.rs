//! Database functionality tests
//!
//! Tests for the migration and the sea-orm backed todo store

use anyhow::Result;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use tempfile::NamedTempFile;
use todo_stack::database::entities::todos;
use todo_stack::database::setup_database;
use todo_stack::services::{DatabaseTodoStore, NewTodo, TodoStore};

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

fn new_todo(uuid: &str, title: &str) -> NewTodo {
    NewTodo {
        uuid: uuid.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        completed: false,
    }
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let rows = todos::Entity::find().all(&db).await?;
    assert_eq!(rows.len(), 0);

    setup_database(&db).await?;
    assert_eq!(todos::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_store_crud() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let store = DatabaseTodoStore::new(db);

    let created = store.create(new_todo("uuid-1", "Buy milk")).await?;
    assert_eq!(created.uuid, "uuid-1");
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);
    assert_eq!(created.file_path, None);
    assert!(created.id > 0);

    let found = store
        .find_by_uuid("uuid-1")
        .await?
        .expect("Todo should exist");
    assert_eq!(found.id, created.id);

    assert_eq!(store.set_completed("uuid-1", true).await?, 1);
    let found = store.find_by_uuid("uuid-1").await?.unwrap();
    assert!(found.completed);
    assert_eq!(found.title, "Buy milk");
    assert_eq!(found.description, "Buy milk description");
    assert!(found.updated_at >= created.updated_at);

    assert_eq!(store.delete_by_uuid("uuid-1").await?, 1);
    assert!(store.find_by_uuid("uuid-1").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_unknown_uuid_touches_nothing() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let store = DatabaseTodoStore::new(db);

    store.create(new_todo("uuid-1", "Keep me")).await?;

    assert_eq!(store.set_completed("missing", true).await?, 0);
    assert_eq!(store.delete_by_uuid("missing").await?, 0);
    assert!(store.find_by_uuid("missing").await?.is_none());

    let all = store.list().await?;
    assert_eq!(all.len(), 1);
    assert!(!all[0].completed);

    Ok(())
}

#[tokio::test]
async fn test_uuid_is_unique() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let store = DatabaseTodoStore::new(db);

    store.create(new_todo("same", "First")).await?;
    let duplicate = store.create(new_todo("same", "Second")).await;
    assert!(duplicate.is_err());

    assert_eq!(store.list().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_list_in_insertion_order() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let store = DatabaseTodoStore::new(db);

    for (i, title) in ["one", "two", "three"].iter().enumerate() {
        store.create(new_todo(&format!("uuid-{}", i), title)).await?;
    }

    let titles: Vec<String> = store.list().await?.into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);

    Ok(())
}
