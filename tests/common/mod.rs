#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use taskit::auth::{AuthMiddleware, BcryptHasher, JwtIssuer, TokenPair};
use taskit::config::TokenConfig;
use taskit::id::UuidGenerator;
use taskit::repository::MemoryStore;
use taskit::response::SuccessBody;
use taskit::routes;
use taskit::state::{AppServices, Deadline, Repositories};

pub const PASSWORD: &str = "secret_password";

/// In-memory services plus a handle on the store for direct inspection.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub services: AppServices,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_refresh_ttl(3600)
    }

    pub fn with_refresh_ttl(refresh_ttl: i64) -> Self {
        let store = Arc::new(MemoryStore::new(Arc::new(UuidGenerator)));
        let tokens = JwtIssuer::new(
            &TokenConfig {
                key: "integration_access_key".into(),
                expires_in: 900,
            },
            &TokenConfig {
                key: "integration_refresh_key".into(),
                expires_in: refresh_ttl,
            },
        );
        let services = AppServices::new(
            Repositories::in_memory(store.clone()),
            Arc::new(BcryptHasher::new(4)),
            Arc::new(tokens),
            Deadline::new(Duration::from_secs(5)),
        );
        Self { store, services }
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(ctx.services.tokens.clone()))
                    .configure(|cfg| routes::config(cfg, &ctx.services)),
            ),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends `req` and returns the status plus the decoded JSON body.
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Decodes the `payload` of a success envelope.
pub fn payload<T: DeserializeOwned>(body: Value) -> T {
    let envelope: SuccessBody<T> =
        serde_json::from_value(body).expect("response is not a success envelope");
    envelope.payload
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({"name": "Gopher", "email": email, "password": PASSWORD}))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["payload"]["id"]
        .as_str()
        .expect("registered user has an id")
        .to_string()
}

pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> TokenPair {
    let req = test::TestRequest::post()
        .uri("/api/auth")
        .set_json(json!({"email": email, "password": PASSWORD}))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    payload(body)
}
