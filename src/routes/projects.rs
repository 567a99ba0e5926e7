use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::{ProjectCreated, ProjectInput};
use crate::response::success;
use crate::state::Deadline;
use crate::usecase::ProjectUsecase;

/// Creates a project owned by the caller.
///
/// ## Responses:
/// - `201 Created`: `{id}` of the new project.
/// - `400 Bad Request`: `"Title is required field"`.
#[post("")]
pub async fn create_project(
    projects: web::Data<ProjectUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    body: web::Json<ProjectInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = body.into_inner();
    input.normalize();
    input.validate()?;

    let id = deadline.run(projects.create(user.as_str(), input)).await?;
    Ok(success(
        StatusCode::CREATED,
        "Successfully created project",
        ProjectCreated { id },
    ))
}

#[get("")]
pub async fn get_projects(
    projects: web::Data<ProjectUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
) -> Result<HttpResponse, AppError> {
    let list = deadline.run(projects.get_all(user.as_str())).await?;
    Ok(success(StatusCode::OK, "", list))
}

/// Fetches one project.
///
/// ## Responses:
/// - `200 OK`: the project.
/// - `403 Forbidden`: the project belongs to another user.
/// - `404 Not Found`: no such project.
#[get("/{id}")]
pub async fn get_project(
    projects: web::Data<ProjectUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let project = deadline
        .run(projects.get_by_id(user.as_str(), &path.into_inner()))
        .await?;
    Ok(success(StatusCode::OK, "", project))
}
