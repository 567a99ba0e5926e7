use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A named group of tasks owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: String,
    #[serde(skip_serializing, default)]
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub user_id: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "Title is required field"))]
    pub title: String,
}

impl ProjectInput {
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_input_validation() {
        let mut blank = ProjectInput { title: "  ".into() };
        blank.normalize();
        assert!(blank.validate().is_err());

        let mut valid = ProjectInput {
            title: " Groceries ".into(),
        };
        valid.normalize();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.title, "Groceries");
    }
}
