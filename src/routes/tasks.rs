use actix_web::{delete, get, http::StatusCode, post, put, web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::{TaskCreated, TaskInput, TaskUpdateInput};
use crate::response::success;
use crate::state::Deadline;
use crate::usecase::TaskUsecase;

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `content`: what needs doing (required).
/// - `description` (optional): free text, defaults to empty.
/// - `project_id` (optional): must name a project owned by the caller.
/// - `due_date` (optional): RFC 3339 timestamp.
///
/// ## Responses:
/// - `201 Created`: `{id}` of the new task.
/// - `400 Bad Request`: `"Content is required field"`.
/// - `403 Forbidden` / `404 Not Found`: the referenced project is not usable.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    body: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = body.into_inner();
    input.normalize();
    input.validate()?;

    let id = deadline.run(tasks.create(user.as_str(), input)).await?;
    Ok(success(
        StatusCode::CREATED,
        "Successfully created task",
        TaskCreated { id },
    ))
}

/// Lists the caller's tasks in creation order.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
) -> Result<HttpResponse, AppError> {
    let list = deadline.run(tasks.get_all(user.as_str())).await?;
    Ok(success(StatusCode::OK, "", list))
}

#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = deadline
        .run(tasks.get_by_id(user.as_str(), &path.into_inner()))
        .await?;
    Ok(success(StatusCode::OK, "", task))
}

/// Replaces the editable fields of a task.
///
/// Omitted optional fields are cleared; `is_completed` defaults to `false`.
///
/// ## Responses:
/// - `200 OK`: `{id}` of the updated task.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no such task.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
    body: web::Json<TaskUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = body.into_inner();
    input.normalize();
    input.validate()?;

    let id = deadline
        .run(tasks.update(user.as_str(), &path.into_inner(), input))
        .await?;
    Ok(success(
        StatusCode::OK,
        "Successfully updated task",
        TaskCreated { id },
    ))
}

#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    deadline
        .run(tasks.remove(user.as_str(), &path.into_inner()))
        .await?;
    Ok(success(StatusCode::OK, "Successfully deleted task", ()))
}
