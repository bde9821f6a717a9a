use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use studytrack::api::router;
use studytrack::db::students;
use studytrack::state::AppState;

async fn setup_app() -> (Router, SqlitePool) {
    // One connection only: a second pooled connection would get its own
    // empty :memory: database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    students::add_student(&pool, "Ada", "ada@example.com", "hash")
        .await
        .expect("Failed to add student");
    students::add_student(&pool, "Grace", "grace@example.com", "hash")
        .await
        .expect("Failed to add student");

    (router(AppState { db: pool.clone() }), pool)
}

fn request(method: &str, uri: &str, student_id: i64, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-student-id", student_id.to_string())
        .header("x-role", "student");
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

async fn create_assignment(app: &Router, student_id: i64, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(request("POST", "/assignments", student_id, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let (app, _pool) = setup_app().await;

    let created = create_assignment(
        &app,
        1,
        json!({
            "title": "Essay 1",
            "description": "On borrowing",
            "deadline": "2025-12-12"
        }),
    )
    .await;
    let id = created["id"].as_i64().expect("id missing");
    assert!(id > 0);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/assignments/{}", id), 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(response).await;
    assert_eq!(fetched["title"], "Essay 1");
    assert_eq!(fetched["description"], "On borrowing");
    assert_eq!(fetched["deadline"], "2025-12-12");
    assert_eq!(fetched["status"], "pending");
    assert_eq!(fetched["course_id"], Value::Null);
}

#[tokio::test]
async fn create_without_title_or_deadline_is_400() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/assignments",
            1,
            Some(json!({"description": "desc", "deadline": "2025-12-12"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/assignments",
            1,
            Some(json!({"title": "Essay 1"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_bad_date_is_400() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/assignments",
            1,
            Some(json!({"title": "Essay 1", "deadline": "12/31/2025"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid date format");
}

#[tokio::test]
async fn ownership_mismatch_is_403_and_does_not_mutate() {
    let (app, pool) = setup_app().await;

    let created = create_assignment(
        &app,
        1,
        json!({"title": "Essay 1", "deadline": "2025-12-12"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Student 2 can neither read, update, nor delete student 1's assignment,
    // role notwithstanding.
    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({"title": "Hijacked"}))),
        ("DELETE", None),
    ] {
        let response = app
            .clone()
            .oneshot(request(method, &format!("/assignments/{}", id), 2, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} should be 403", method);
    }

    let row = studytrack::db::assignments::get_assignment_by_id(&pool, id)
        .await
        .expect("Failed to fetch")
        .expect("Assignment should still exist");
    assert_eq!(row.title, "Essay 1");
}

#[tokio::test]
async fn list_is_scoped_to_requester() {
    let (app, _pool) = setup_app().await;

    create_assignment(&app, 1, json!({"title": "Essay 1", "deadline": "2025-12-12"})).await;
    create_assignment(&app, 1, json!({"title": "Essay 2", "deadline": "2025-12-13"})).await;

    let response = app
        .clone()
        .oneshot(request("GET", "/assignments/students/1", 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = json_body(response).await;
    assert_eq!(list.as_array().map(|a| a.len()), Some(2));

    let response = app
        .clone()
        .oneshot(request("GET", "/assignments/students/1", 2, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn put_with_invalid_date_is_400() {
    let (app, _pool) = setup_app().await;

    let created = create_assignment(
        &app,
        1,
        json!({"title": "Essay 1", "deadline": "2025-12-12"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/assignments/{}", id),
            1,
            Some(json!({"deadline": "2024-31-12"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid date format");
}

#[tokio::test]
async fn put_with_invalid_json_or_bad_course_id_is_400() {
    let (app, _pool) = setup_app().await;

    let created = create_assignment(
        &app,
        1,
        json!({"title": "Essay 1", "deadline": "2025-12-12"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/assignments/{}", id))
                .header("x-student-id", "1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/assignments/{}", id),
            1,
            Some(json!({"course_id": "first"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/assignments/{}", id),
            1,
            Some(json!({"status": "done"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_updates_status_and_clears_course() {
    let (app, pool) = setup_app().await;

    let course = studytrack::db::courses::add_course(
        &pool,
        1,
        "Test101",
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    )
    .await
    .expect("Failed to add course");

    let created = create_assignment(
        &app,
        1,
        json!({"title": "Essay 1", "deadline": "2025-12-12", "course_id": course.id}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["course_id"], json!(course.id));

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/assignments/{}", id),
            1,
            Some(json!({"status": "in-progress", "course_id": null})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response).await;
    assert_eq!(updated["status"], "in-progress");
    assert_eq!(updated["course_id"], Value::Null);
    assert_eq!(updated["title"], "Essay 1");
}

#[tokio::test]
async fn missing_and_unknown_resources() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/assignments/999", 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/assignments/999",
            1,
            Some(json!({"title": "Ghost"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request("DELETE", "/assignments/999", 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_200_then_404() {
    let (app, _pool) = setup_app().await;

    let created = create_assignment(
        &app,
        1,
        json!({"title": "Essay 1", "deadline": "2025-12-12"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/assignments/{}", id), 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/assignments/{}", id), 1, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_identity_header_is_401() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/assignments/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
