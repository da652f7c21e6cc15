/// Data models for Todograph
///
/// # Models
///
/// - `user`: user accounts (login key is the unique email)
/// - `todo`: todo items, each owned by exactly one user

pub mod todo;
pub mod user;

pub use todo::{CreateTodo, Todo, UpdateTodo};
pub use user::{CreateUser, User};
