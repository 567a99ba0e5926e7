mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{bearer, init_app, login, payload, register, send, TestContext};
use taskit::models::{Project, ProjectCreated, Task, TaskCreated};

#[actix_rt::test]
async fn test_project_flow() {
    let ctx = TestContext::new();
    let app = init_app(&ctx).await;
    register(&app, "gopher@go.dev").await;
    register(&app, "ferris@rust-lang.org").await;
    let token = login(&app, "gopher@go.dev").await.access_token;
    let other = login(&app, "ferris@rust-lang.org").await.access_token;

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(&token))
        .set_json(json!({"title": " "}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required field");

    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Groceries"}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let project: ProjectCreated = payload(body);

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = send(&app, req).await;
    let projects: Vec<Project> = payload(body);
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Groceries");

    let uri = format!("/api/projects/{}", project.id);
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&other))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not have access to this project");

    let req = test::TestRequest::get()
        .uri("/api/projects/missing")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");

    // Tasks can be filed under the caller's own project only.
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .set_json(json!({"content": "Milk", "project_id": project.id}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let task: TaskCreated = payload(body);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = send(&app, req).await;
    let task: Task = payload(body);
    assert_eq!(task.project_id.as_deref(), Some(project.id.as_str()));

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&other))
        .set_json(json!({"content": "Sneaky", "project_id": project.id}))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
