use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewProject, Project, ProjectInput};
use crate::repository::ProjectRepository;

pub struct ProjectUsecase {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectUsecase {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn create(&self, user_id: &str, input: ProjectInput) -> AppResult<String> {
        self.projects
            .store(&NewProject {
                user_id: user_id.to_string(),
                title: input.title,
            })
            .await
    }

    pub async fn get_all(&self, user_id: &str) -> AppResult<Vec<Project>> {
        self.projects.find_all_by_user_id(user_id).await
    }

    /// Fetches a project, failing with `ProjectForbidden` if another user owns it.
    pub async fn get_by_id(&self, user_id: &str, project_id: &str) -> AppResult<Project> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(AppError::ProjectNotFound)?;

        if project.user_id != user_id {
            return Err(AppError::ProjectForbidden);
        }
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UuidGenerator;
    use crate::repository::MemoryStore;
    use pretty_assertions::assert_eq;

    fn usecase() -> ProjectUsecase {
        ProjectUsecase::new(Arc::new(MemoryStore::new(Arc::new(UuidGenerator))))
    }

    #[tokio::test]
    async fn test_projects_are_scoped_to_owner() {
        let projects = usecase();
        let id = projects
            .create("user-1", ProjectInput { title: "Home".into() })
            .await
            .unwrap();
        projects
            .create("user-2", ProjectInput { title: "Work".into() })
            .await
            .unwrap();

        let mine = projects.get_all("user-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Home");

        assert_eq!(projects.get_by_id("user-1", &id).await.unwrap().id, id);
        assert!(matches!(
            projects.get_by_id("user-2", &id).await,
            Err(AppError::ProjectForbidden)
        ));
        assert!(matches!(
            projects.get_by_id("user-1", "missing").await,
            Err(AppError::ProjectNotFound)
        ));
    }
}
