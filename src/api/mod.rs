mod auth_context;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;

use crate::db::assignments::AssignmentChanges;
use crate::db::{assignments, courses, students};
use crate::error::AppError;
use crate::models::*;
use crate::services::auth;
use crate::state::AppState;

pub use auth_context::AuthContext;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/students", post(signup))
        .route("/assignments", post(create_assignment))
        .route("/assignments/", post(create_assignment))
        .route(
            "/assignments/{id}",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .route("/assignments/students/{id}", get(list_assignments))
        .route("/courses", post(create_course))
        .route("/courses/", post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/courses/students/{id}", get(list_courses))
        .with_state(state)
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format".to_string()))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let hash = auth::hash_password(&req.password)?;
    let student = students::add_student(&state.db, &req.name, &req.email, &hash).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Student>, AppError> {
    let student = auth::try_login(&state.db, &req.email, &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(student))
}

async fn get_assignment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = assignments::get_assignment_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if assignment.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    Ok(Json(assignment))
}

async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    if student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    let list = assignments::get_assignments(&state.db, student_id).await?;
    Ok(Json(list))
}

async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<NewAssignmentRequest>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let title = req
        .title
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let deadline = req
        .deadline
        .ok_or_else(|| AppError::BadRequest("Deadline is required".to_string()))?;
    let deadline = parse_date(&deadline)?;

    let assignment = assignments::insert_assignment(
        &state.db,
        auth.student_id,
        req.course_id,
        &title,
        req.description.as_deref(),
        deadline,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn update_assignment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    body: Result<Json<UpdateAssignmentRequest>, JsonRejection>,
) -> Result<Json<Assignment>, AppError> {
    // Malformed JSON and wrongly-typed fields (a non-numeric course id, an
    // unknown status) all surface here as a rejection.
    let Json(req) = body.map_err(|rej| AppError::BadRequest(rej.body_text()))?;

    let current = assignments::get_assignment_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if current.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }

    let deadline = match req.deadline {
        Some(s) => Some(parse_date(&s)?),
        None => None,
    };

    let updated = assignments::update_assignment(
        &state.db,
        id,
        AssignmentChanges {
            title: req.title,
            description: req.description,
            deadline,
            course_id: req.course_id,
            status: req.status,
        },
    )
    .await?;
    Ok(Json(updated))
}

async fn delete_assignment(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let assignment = assignments::get_assignment_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if assignment.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    assignments::delete_assignment(&state.db, id).await?;
    Ok(StatusCode::OK)
}

async fn get_course(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = courses::get_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if course.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    Ok(Json(course))
}

async fn list_courses(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<Course>>, AppError> {
    if student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    let list = courses::get_all_courses(&state.db, student_id).await?;
    Ok(Json(list))
}

async fn create_course(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let start = parse_date(&req.start_date)?;
    let end = parse_date(&req.end_date)?;
    let course = courses::add_course(&state.db, auth.student_id, &req.name, start, end).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
    body: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<Course>, AppError> {
    let Json(req) = body.map_err(|rej| AppError::BadRequest(rej.body_text()))?;

    let current = courses::get_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if current.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }

    let start = match req.start_date {
        Some(s) => Some(parse_date(&s)?),
        None => None,
    };
    let end = match req.end_date {
        Some(s) => Some(parse_date(&s)?),
        None => None,
    };

    let updated = courses::update_course(&state.db, id, req.name.as_deref(), start, end).await?;
    Ok(Json(updated))
}

async fn delete_course(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let course = courses::get_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    if course.student_id != auth.student_id {
        return Err(AppError::Forbidden);
    }
    courses::delete_course(&state.db, id).await?;
    Ok(StatusCode::OK)
}
