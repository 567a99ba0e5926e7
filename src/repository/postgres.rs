//! Postgres implementation of every repository trait.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::id::IdGenerator;
use crate::models::{NewProject, NewSession, NewTask, NewUser, Project, Session, Task, User};
use crate::repository::{ProjectRepository, SessionRepository, TaskRepository, UserRepository};

/// Embedded schema migrations from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";
const SESSION_COLUMNS: &str = "id, user_id, token, expires_at";
const TASK_COLUMNS: &str =
    "id, user_id, project_id, content, description, is_completed, due_date, created_at, updated_at";
const PROJECT_COLUMNS: &str = "id, user_id, title, created_at, updated_at";

/// Repositories backed by a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
}

impl PgStore {
    pub fn new(pool: PgPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self { pool, ids }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserRepository for PgStore {
    async fn store(&self, user: &NewUser) -> AppResult<String> {
        let id = self.ids.generate();
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(&id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::EmailNotAvailable
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(id)
    }

    async fn verify_available_email(&self, email: &str) -> AppResult<()> {
        let existing = sqlx::query_as::<_, (String,)>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match existing {
            Some(_) => Err(AppError::EmailNotAvailable),
            None => Ok(()),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl SessionRepository for PgStore {
    async fn store(&self, session: &NewSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO authentications (id, user_id, token, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(self.ids.generate())
        .bind(&session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM authentications WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn exists_by_token(&self, token: &str) -> AppResult<bool> {
        let (exists,) = sqlx::query_as::<_, (bool,)>(
            "SELECT EXISTS (SELECT 1 FROM authentications WHERE token = $1)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        let sql = format!("SELECT {} FROM authentications WHERE token = $1", SESSION_COLUMNS);
        Ok(sqlx::query_as::<_, Session>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn rotate(&self, old_token: &str, next: &NewSession) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM authentications WHERE token = $1")
            .bind(old_token)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::AuthNotExist);
        }

        sqlx::query(
            "INSERT INTO authentications (id, user_id, token, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(self.ids.generate())
        .bind(&next.user_id)
        .bind(&next.token)
        .bind(next.expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PgStore {
    async fn store(&self, task: &NewTask) -> AppResult<String> {
        let id = self.ids.generate();
        sqlx::query(
            "INSERT INTO tasks (id, user_id, project_id, content, description, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&id)
        .bind(&task.user_id)
        .bind(&task.project_id)
        .bind(&task.content)
        .bind(&task.description)
        .bind(task.due_date)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at",
            TASK_COLUMNS
        );
        Ok(sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, task: &Task) -> AppResult<String> {
        let result = sqlx::query(
            "UPDATE tasks \
             SET project_id = $2, content = $3, description = $4, is_completed = $5, \
                 due_date = $6, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(&task.id)
        .bind(&task.project_id)
        .bind(&task.content)
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.due_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TaskNotFound);
        }
        Ok(task.id.clone())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ProjectRepository for PgStore {
    async fn store(&self, project: &NewProject) -> AppResult<String> {
        let id = self.ids.generate();
        sqlx::query("INSERT INTO projects (id, user_id, title) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(&project.user_id)
            .bind(&project.title)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Project>> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Project>> {
        let sql = format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY created_at",
            PROJECT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }
}
