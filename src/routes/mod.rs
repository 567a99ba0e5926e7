pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::state::AppServices;

/// Registers use cases and every `/api` resource on `cfg`.
///
/// Meant to be mounted inside a scope wrapped by `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig, services: &AppServices) {
    cfg.app_data(json_config())
        .app_data(services.auth.clone())
        .app_data(services.users.clone())
        .app_data(services.tasks.clone())
        .app_data(services.projects.clone())
        .app_data(services.deadline.clone())
        .service(
            web::scope("/auth")
                .service(auth::login)
                .service(auth::refresh)
                .service(auth::profile)
                .service(auth::logout),
        )
        .service(web::scope("/users").service(users::register))
        .service(
            web::scope("/projects")
                .service(projects::create_project)
                .service(projects::get_projects)
                .service(projects::get_project),
        )
        .service(
            web::scope("/tasks")
                .service(tasks::create_task)
                .service(tasks::get_tasks)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Undecodable JSON bodies become the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::debug!("rejected request body: {}", err);
        AppError::BadRequest("Invalid request body".into()).into()
    })
}
