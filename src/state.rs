//! Composition root: wires repositories and providers into the use cases the
//! HTTP handlers receive as app data.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use sqlx::PgPool;

use crate::auth::{BcryptHasher, JwtIssuer, PasswordHasher, TokenIssuer};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::id::IdGenerator;
use crate::repository::postgres::PgStore;
use crate::repository::{
    MemoryStore, ProjectRepository, SessionRepository, TaskRepository, UserRepository,
};
use crate::usecase::{AuthUsecase, ProjectUsecase, TaskUsecase, UserUsecase};

/// One handle per repository trait. Both backends implement all four traits
/// on a single store, so every field usually points at the same object.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub projects: Arc<dyn ProjectRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool, ids: Arc<dyn IdGenerator>) -> Self {
        let store = Arc::new(PgStore::new(pool, ids));
        Self {
            users: store.clone(),
            sessions: store.clone(),
            tasks: store.clone(),
            projects: store,
        }
    }

    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            sessions: store.clone(),
            tasks: store.clone(),
            projects: store,
        }
    }
}

/// Upper bound on how long a single use-case call may run.
///
/// Dropping the wrapped future cancels whatever repository call it was
/// awaiting; writes that already committed stay committed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Duration);

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.0, fut).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("request exceeded deadline of {:?}", self.0);
                Err(AppError::Timeout)
            }
        }
    }
}

/// Everything the route handlers need, cheap to clone into each worker.
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthUsecase>,
    pub users: web::Data<UserUsecase>,
    pub tasks: web::Data<TaskUsecase>,
    pub projects: web::Data<ProjectUsecase>,
    pub deadline: web::Data<Deadline>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AppServices {
    pub fn new(
        repos: Repositories,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        deadline: Deadline,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthUsecase::new(
                repos.users.clone(),
                repos.sessions,
                hasher.clone(),
                tokens.clone(),
            )),
            users: web::Data::new(UserUsecase::new(repos.users, hasher)),
            tasks: web::Data::new(TaskUsecase::new(repos.tasks, repos.projects.clone())),
            projects: web::Data::new(ProjectUsecase::new(repos.projects)),
            deadline: web::Data::new(deadline),
            tokens,
        }
    }

    pub fn from_config(config: &Config, repos: Repositories) -> Self {
        Self::new(
            repos,
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(JwtIssuer::new(&config.access_token, &config.refresh_token)),
            Deadline::new(config.request_timeout),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let deadline = Deadline::new(Duration::from_secs(1));
        assert_eq!(deadline.run(async { Ok(7) }).await.unwrap(), 7);

        let failed: AppResult<()> = deadline.run(async { Err(AppError::UserNotFound) }).await;
        assert!(matches!(failed, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_deadline_times_out() {
        let deadline = Deadline::new(Duration::from_millis(10));
        let result = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(AppError::Timeout)));
    }
}
