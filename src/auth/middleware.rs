use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUserId;
use crate::auth::token::TokenIssuer;
use crate::error::AppError;

/// Routes reachable without an access token, relative to the application root.
const PUBLIC_ROUTES: [(Method, &str); 3] = [
    (Method::POST, "/api/users"),
    (Method::POST, "/api/auth"),
    (Method::PUT, "/api/auth"),
];

/// Verifies the `Authorization: Bearer` access token and stores the caller's
/// user ID in the request extensions.
pub struct AuthMiddleware {
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<dyn TokenIssuer>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let verified = bearer_token(&req)
            .ok_or(AppError::MissingBearerToken)
            .and_then(|token| self.tokens.verify_access_token(token));

        match verified {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUserId(user_id));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let response = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn is_public(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PUBLIC_ROUTES
        .iter()
        .any(|(public_method, public_path)| public_method == method && *public_path == path)
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
