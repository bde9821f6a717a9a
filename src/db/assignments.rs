use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::students;
use crate::error::AppError;
use crate::models::{Assignment, Status};

/// Field changes for a partial assignment update, with dates and status
/// already validated at the boundary. `course_id` carries explicit-clear
/// semantics: `Some(None)` detaches the assignment from its course.
#[derive(Debug, Default)]
pub struct AssignmentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub course_id: Option<Option<i64>>,
    pub status: Option<Status>,
}

pub async fn insert_assignment(
    db: &SqlitePool,
    student_id: i64,
    course_id: Option<i64>,
    title: &str,
    description: Option<&str>,
    deadline: NaiveDate,
) -> Result<Assignment, AppError> {
    if students::get_student_by_id(db, student_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "No student with id {}",
            student_id
        )));
    }
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let status = Status::Pending;
    let result = sqlx::query(
        "INSERT INTO assignments (student_id, course_id, title, description, deadline, status) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(student_id)
    .bind(course_id)
    .bind(title)
    .bind(description)
    .bind(deadline)
    .bind(status)
    .execute(db)
    .await?;

    Ok(Assignment {
        id: result.last_insert_rowid(),
        student_id,
        course_id,
        title: title.to_string(),
        description: description.map(|d| d.to_string()),
        deadline,
        status,
    })
}

pub async fn get_assignment_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, student_id, course_id, title, description, deadline, status FROM assignments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn get_assignments(
    db: &SqlitePool,
    student_id: i64,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, student_id, course_id, title, description, deadline, status FROM assignments WHERE student_id = ? ORDER BY deadline",
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}

pub async fn set_status(db: &SqlitePool, id: i64, status: Status) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE assignments SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Partial update: unset fields keep their current values.
pub async fn update_assignment(
    db: &SqlitePool,
    id: i64,
    changes: AssignmentChanges,
) -> Result<Assignment, AppError> {
    let mut current = get_assignment_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(title) = changes.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        current.title = title;
    }
    if let Some(description) = changes.description {
        current.description = Some(description);
    }
    if let Some(deadline) = changes.deadline {
        current.deadline = deadline;
    }
    if let Some(course_id) = changes.course_id {
        current.course_id = course_id;
    }
    if let Some(status) = changes.status {
        current.status = status;
    }

    sqlx::query(
        "UPDATE assignments SET course_id = ?, title = ?, description = ?, deadline = ?, status = ? WHERE id = ?",
    )
    .bind(current.course_id)
    .bind(&current.title)
    .bind(&current.description)
    .bind(current.deadline)
    .bind(current.status)
    .bind(id)
    .execute(db)
    .await?;

    Ok(current)
}

pub async fn delete_assignment(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
