//! In-process implementation of every repository trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::id::IdGenerator;
use crate::models::{NewProject, NewSession, NewTask, NewUser, Project, Session, Task, User};
use crate::repository::{ProjectRepository, SessionRepository, TaskRepository, UserRepository};

/// Keeps users, sessions, tasks and projects in memory.
///
/// Sessions are keyed by token, mirroring the unique `token` column of the
/// SQL schema. Listings come back in insertion order.
pub struct MemoryStore {
    ids: Arc<dyn IdGenerator>,
    users: RwLock<Vec<User>>,
    sessions: RwLock<HashMap<String, Session>>,
    tasks: RwLock<Vec<Task>>,
    projects: RwLock<Vec<Project>>,
}

impl MemoryStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            users: RwLock::new(Vec::new()),
            sessions: RwLock::new(HashMap::new()),
            tasks: RwLock::new(Vec::new()),
            projects: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored sessions, live or expired.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Sessions belonging to `user_id`, in no particular order.
    pub async fn sessions_for_user(&self, user_id: &str) -> Vec<Session> {
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| session.user_id == user_id)
            .cloned()
            .collect()
    }

    fn session_from(&self, session: &NewSession) -> Session {
        Session {
            id: self.ids.generate(),
            user_id: session.user_id.clone(),
            token: session.token.clone(),
            expires_at: session.expires_at,
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn store(&self, user: &NewUser) -> AppResult<String> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::EmailNotAvailable);
        }

        let now = Utc::now();
        let id = self.ids.generate();
        users.push(User {
            id: id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn verify_available_email(&self, email: &str) -> AppResult<()> {
        match self.find_by_email(email).await? {
            Some(_) => Err(AppError::EmailNotAvailable),
            None => Ok(()),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn store(&self, session: &NewSession) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.token) {
            return Err(AppError::Internal("duplicate session token".into()));
        }
        sessions.insert(session.token.clone(), self.session_from(session));
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<u64> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(token).map_or(0, |_| 1))
    }

    async fn exists_by_token(&self, token: &str) -> AppResult<bool> {
        Ok(self.sessions.read().await.contains_key(token))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn rotate(&self, old_token: &str, next: &NewSession) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&next.token) {
            return Err(AppError::Internal("duplicate session token".into()));
        }
        if sessions.remove(old_token).is_none() {
            return Err(AppError::AuthNotExist);
        }
        sessions.insert(next.token.clone(), self.session_from(next));
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn store(&self, task: &NewTask) -> AppResult<String> {
        let now = Utc::now();
        let id = self.ids.generate();
        self.tasks.write().await.push(Task {
            id: id.clone(),
            user_id: task.user_id.clone(),
            project_id: task.project_id.clone(),
            content: task.content.clone(),
            description: task.description.clone(),
            is_completed: false,
            due_date: task.due_date,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, task: &Task) -> AppResult<String> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .iter_mut()
            .find(|stored| stored.id == task.id)
            .ok_or(AppError::TaskNotFound)?;

        stored.project_id = task.project_id.clone();
        stored.content = task.content.clone();
        stored.description = task.description.clone();
        stored.is_completed = task.is_completed;
        stored.due_date = task.due_date;
        stored.updated_at = Utc::now();
        Ok(stored.id.clone())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<u64> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        Ok((before - tasks.len()) as u64)
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn store(&self, project: &NewProject) -> AppResult<String> {
        let now = Utc::now();
        let id = self.ids.generate();
        self.projects.write().await.push(Project {
            id: id.clone(),
            user_id: project.user_id.clone(),
            title: project.title.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|project| project.id == id).cloned())
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|project| project.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UuidGenerator;
    use chrono::{DateTime, Duration};
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        MemoryStore::new(Arc::new(UuidGenerator))
    }

    fn new_session(token: &str, expires_at: DateTime<Utc>) -> NewSession {
        NewSession {
            user_id: "user-1".into(),
            token: token.into(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_session_store_find_delete() {
        let store = store();
        let expires_at = Utc::now() + Duration::hours(1);
        SessionRepository::store(&store, &new_session("token-a", expires_at))
            .await
            .unwrap();

        let found = store.find_by_token("token-a").await.unwrap().unwrap();
        assert_eq!(found.user_id, "user-1");
        assert_eq!(found.token, "token-a");
        assert_eq!(found.expires_at, expires_at);
        assert!(store.exists_by_token("token-a").await.unwrap());

        assert_eq!(store.delete_by_token("token-a").await.unwrap(), 1);
        assert_eq!(store.delete_by_token("token-a").await.unwrap(), 0);
        assert!(store.find_by_token("token-a").await.unwrap().is_none());
        assert!(!store.exists_by_token("token-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_session_tokens_are_unique() {
        let store = store();
        let expires_at = Utc::now() + Duration::hours(1);
        SessionRepository::store(&store, &new_session("token-a", expires_at))
            .await
            .unwrap();

        let duplicate = SessionRepository::store(&store, &new_session("token-a", expires_at)).await;
        assert!(matches!(duplicate, Err(AppError::Internal(_))));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_rotate_replaces_record() {
        let store = store();
        let expires_at = Utc::now() + Duration::hours(1);
        SessionRepository::store(&store, &new_session("old", expires_at))
            .await
            .unwrap();

        store
            .rotate("old", &new_session("new", expires_at + Duration::hours(1)))
            .await
            .unwrap();

        assert!(store.find_by_token("old").await.unwrap().is_none());
        assert!(store.find_by_token("new").await.unwrap().is_some());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_rotate_of_consumed_token_stores_nothing() {
        let store = store();
        let expires_at = Utc::now() + Duration::hours(1);

        let result = store.rotate("gone", &new_session("new", expires_at)).await;
        assert!(matches!(result, Err(AppError::AuthNotExist)));
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let store = store();
        let user = NewUser {
            name: "Gopher".into(),
            email: "gopher@go.dev".into(),
            password_hash: "digest".into(),
        };
        let id = UserRepository::store(&store, &user).await.unwrap();

        assert!(matches!(
            store.verify_available_email("gopher@go.dev").await,
            Err(AppError::EmailNotAvailable)
        ));
        assert!(matches!(
            UserRepository::store(&store, &user).await,
            Err(AppError::EmailNotAvailable)
        ));

        let found = UserRepository::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(found.email, "gopher@go.dev");
    }

    #[tokio::test]
    async fn test_task_update_and_delete() {
        let store = store();
        let id = TaskRepository::store(
            &store,
            &NewTask {
                user_id: "user-1".into(),
                project_id: None,
                content: "Buy milk".into(),
                description: String::new(),
                due_date: None,
            },
        )
        .await
        .unwrap();

        let mut task = TaskRepository::find_by_id(&store, &id).await.unwrap().unwrap();
        task.is_completed = true;
        task.content = "Buy oat milk".into();
        store.update(&task).await.unwrap();

        let updated = TaskRepository::find_by_id(&store, &id).await.unwrap().unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.content, "Buy oat milk");
        assert!(updated.updated_at >= updated.created_at);

        assert_eq!(store.delete_by_id(&id).await.unwrap(), 1);
        assert!(TaskRepository::find_by_id(&store, &id).await.unwrap().is_none());
    }
}
