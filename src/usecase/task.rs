use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskInput, TaskUpdateInput};
use crate::repository::{ProjectRepository, TaskRepository};

/// Task CRUD. Every operation is scoped to the calling user; tasks owned by
/// someone else are reported as `TaskForbidden`.
pub struct TaskUsecase {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl TaskUsecase {
    pub fn new(tasks: Arc<dyn TaskRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { tasks, projects }
    }

    pub async fn create(&self, user_id: &str, input: TaskInput) -> AppResult<String> {
        if let Some(project_id) = &input.project_id {
            self.verify_project_owner(user_id, project_id).await?;
        }
        self.tasks.store(&input.into_new_task(user_id)).await
    }

    pub async fn get_all(&self, user_id: &str) -> AppResult<Vec<Task>> {
        self.tasks.find_all_by_user_id(user_id).await
    }

    pub async fn get_by_id(&self, user_id: &str, task_id: &str) -> AppResult<Task> {
        self.owned_task(user_id, task_id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        task_id: &str,
        input: TaskUpdateInput,
    ) -> AppResult<String> {
        let mut task = self.owned_task(user_id, task_id).await?;
        if let Some(project_id) = &input.project_id {
            self.verify_project_owner(user_id, project_id).await?;
        }

        input.apply_to(&mut task);
        self.tasks.update(&task).await
    }

    pub async fn remove(&self, user_id: &str, task_id: &str) -> AppResult<()> {
        self.owned_task(user_id, task_id).await?;

        if self.tasks.delete_by_id(task_id).await? == 0 {
            return Err(AppError::TaskNotFound);
        }
        Ok(())
    }

    async fn owned_task(&self, user_id: &str, task_id: &str) -> AppResult<Task> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AppError::TaskNotFound)?;

        if task.user_id != user_id {
            return Err(AppError::TaskForbidden);
        }
        Ok(task)
    }

    async fn verify_project_owner(&self, user_id: &str, project_id: &str) -> AppResult<()> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::ProjectNotFound)?;

        if project.user_id != user_id {
            return Err(AppError::ProjectForbidden);
        }
        Ok(())
    }
}
