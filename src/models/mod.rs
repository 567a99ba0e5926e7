pub mod project;
pub mod session;
pub mod task;
pub mod user;

pub use project::{NewProject, Project, ProjectCreated, ProjectInput};
pub use session::{NewSession, Session, SessionToken};
pub use task::{NewTask, Task, TaskCreated, TaskInput, TaskUpdateInput};
pub use user::{NewUser, RegisteredUser, User, UserInput};
