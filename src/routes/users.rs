use actix_web::{http::StatusCode, post, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::models::UserInput;
use crate::response::success;
use crate::state::Deadline;
use crate::usecase::UserUsecase;

/// Register a new user.
///
/// ## Request Body:
/// - `name`: display name (required).
/// - `email`: a valid, not yet registered email address.
/// - `password`: at least 6 bytes after trimming.
///
/// ## Responses:
/// - `201 Created`: `{id, email}` in the payload.
/// - `400 Bad Request`: validation failure or `"Email is not available"`.
#[post("")]
pub async fn register(
    users: web::Data<UserUsecase>,
    deadline: web::Data<Deadline>,
    body: web::Json<UserInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = body.into_inner();
    input.normalize();
    input.validate()?;

    let user = deadline.run(users.register(input)).await?;
    Ok(success(StatusCode::CREATED, "Successfully registered user", user))
}
