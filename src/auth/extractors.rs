use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::error::AppError;

/// ID of the user whose access token `AuthMiddleware` accepted.
///
/// Handlers outside the middleware never see one, so extraction there fails
/// with `MissingBearerToken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub String);

impl AuthenticatedUserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for AuthenticatedUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUserId>().cloned();
        ready(user.ok_or_else(|| AppError::MissingBearerToken.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn echo(user: AuthenticatedUserId) -> HttpResponse {
        HttpResponse::Ok().body(user.as_str().to_string())
    }

    #[actix_rt::test]
    async fn test_reads_user_from_extensions() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut()
            .insert(AuthenticatedUserId("user-123".to_string()));

        let user = AuthenticatedUserId::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.as_str(), "user-123");
    }

    #[actix_rt::test]
    async fn test_unprotected_handler_is_rejected() {
        let app = test::init_service(App::new().route("/me", web::get().to(echo))).await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
