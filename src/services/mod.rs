pub mod file_store;
pub mod todo_store;

pub use file_store::{FileStore, FileStoreError};
pub use todo_store::{DatabaseTodoStore, NewTodo, TodoStore};
