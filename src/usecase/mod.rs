//! Business rules, independent of HTTP and of the storage backend.

pub mod auth;
pub mod project;
pub mod task;
pub mod user;

pub use auth::AuthUsecase;
pub use project::ProjectUsecase;
pub use task::TaskUsecase;
pub use user::UserUsecase;
