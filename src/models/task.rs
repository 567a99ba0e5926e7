use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: String,
    /// Owner of the task. Not exposed over the API.
    #[serde(skip_serializing, default)]
    pub user_id: String,
    /// Project the task is filed under, if any.
    pub project_id: Option<String>,
    /// What needs to be done.
    pub content: String,
    /// Free-form details, empty when not given.
    pub description: String,
    pub is_completed: bool,
    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// A task about to be stored. The repository assigns ID and timestamps.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: String,
    pub project_id: Option<String>,
    pub content: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Must not be blank.
    #[validate(length(min = 1, message = "Content is required field"))]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Input structure for replacing a task's editable fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdateInput {
    #[validate(length(min = 1, message = "Content is required field"))]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskInput {
    pub fn normalize(&mut self) {
        self.content = self.content.trim().to_string();
        self.project_id = normalize_reference(self.project_id.take());
    }

    pub fn into_new_task(self, user_id: &str) -> NewTask {
        NewTask {
            user_id: user_id.to_string(),
            project_id: self.project_id,
            content: self.content,
            description: self.description.unwrap_or_default(),
            due_date: self.due_date,
        }
    }
}

impl TaskUpdateInput {
    pub fn normalize(&mut self) {
        self.content = self.content.trim().to_string();
        self.project_id = normalize_reference(self.project_id.take());
    }

    /// Overwrites the editable fields of `task`, leaving identity and owner alone.
    pub fn apply_to(self, task: &mut Task) {
        task.project_id = self.project_id;
        task.content = self.content;
        task.description = self.description.unwrap_or_default();
        task.is_completed = self.is_completed;
        task.due_date = self.due_date;
    }
}

/// Treats a blank project reference as "no project".
fn normalize_reference(reference: Option<String>) -> Option<String> {
    reference
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskCreated {
    pub id: String,
}
