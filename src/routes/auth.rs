use actix_web::{delete, get, http::StatusCode, post, put, web, HttpResponse};
use validator::Validate;

use crate::auth::{AuthenticatedUserId, LoginRequest, RefreshTokenRequest};
use crate::error::AppError;
use crate::models::SessionToken;
use crate::response::success;
use crate::state::Deadline;
use crate::usecase::AuthUsecase;

/// Log in with email and password.
///
/// ## Request Body:
/// - `email`: the account email (required).
/// - `password`: the account password (required).
///
/// ## Responses:
/// - `200 OK`: `{access_token, refresh_token}` in the payload.
/// - `400 Bad Request`: missing fields, unknown email or wrong password.
#[post("")]
pub async fn login(
    auth: web::Data<AuthUsecase>,
    deadline: web::Data<Deadline>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let mut request = body.into_inner();
    request.normalize();
    request.validate()?;

    let tokens = deadline
        .run(auth.login(&request.email, &request.password))
        .await?;
    Ok(success(StatusCode::OK, "Successfully logged in user", tokens))
}

/// Exchange a refresh token for a new token pair. The old refresh token stops
/// working once this succeeds.
///
/// ## Responses:
/// - `200 OK`: `{access_token, refresh_token}` in the payload.
/// - `400 Bad Request`: blank or expired refresh token.
/// - `404 Not Found`: no session exists for the token.
#[put("")]
pub async fn refresh(
    auth: web::Data<AuthUsecase>,
    deadline: web::Data<Deadline>,
    body: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let token = SessionToken::parse(&body.refresh_token)?;

    let tokens = deadline.run(auth.refresh(token.as_str())).await?;
    Ok(success(
        StatusCode::OK,
        "Successfully refreshed authentication token",
        tokens,
    ))
}

/// Profile of the user owning the access token.
#[get("")]
pub async fn profile(
    auth: web::Data<AuthUsecase>,
    deadline: web::Data<Deadline>,
    user: AuthenticatedUserId,
) -> Result<HttpResponse, AppError> {
    let profile = deadline.run(auth.profile(user.as_str())).await?;
    Ok(success(StatusCode::OK, "", profile))
}

/// Close the session bound to a refresh token.
///
/// ## Responses:
/// - `200 OK`: null payload.
/// - `400 Bad Request`: blank token, or the session was already closed.
#[delete("")]
pub async fn logout(
    auth: web::Data<AuthUsecase>,
    deadline: web::Data<Deadline>,
    _user: AuthenticatedUserId,
    body: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    deadline.run(auth.logout(&body.refresh_token)).await?;
    Ok(success(StatusCode::OK, "Successfully logout user", ()))
}
