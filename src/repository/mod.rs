//! Persistence contracts.
//!
//! Use cases depend only on these traits. `postgres` backs them with a
//! `PgPool`; `memory` keeps everything in process and is what the test suite
//! runs against.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewProject, NewSession, NewTask, NewUser, Project, Session, Task, User};

pub use memory::MemoryStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a user and returns its new ID. A taken email yields `EmailNotAvailable`.
    async fn store(&self, user: &NewUser) -> AppResult<String>;
    /// `Ok(())` if no user has this email yet, `EmailNotAvailable` otherwise.
    async fn verify_available_email(&self, email: &str) -> AppResult<()>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
}

/// Refresh-token sessions, keyed by the token string.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn store(&self, session: &NewSession) -> AppResult<()>;
    /// Returns the number of deleted records (0 or 1).
    async fn delete_by_token(&self, token: &str) -> AppResult<u64>;
    async fn exists_by_token(&self, token: &str) -> AppResult<bool>;
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>>;
    /// Deletes the record for `old_token` and stores `next` as one atomic step.
    ///
    /// Fails with `AuthNotExist` and stores nothing when `old_token` is already
    /// gone, so only one of several concurrent rotations of a token succeeds.
    async fn rotate(&self, old_token: &str, next: &NewSession) -> AppResult<()>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn store(&self, task: &NewTask) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Task>>;
    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Task>>;
    /// Persists the editable fields of `task` and bumps `updated_at`.
    async fn update(&self, task: &Task) -> AppResult<String>;
    async fn delete_by_id(&self, id: &str) -> AppResult<u64>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn store(&self, project: &NewProject) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Project>>;
    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Project>>;
}
