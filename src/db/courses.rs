use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::students;
use crate::error::AppError;
use crate::models::Course;

pub async fn add_course(
    db: &SqlitePool,
    student_id: i64,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Course, AppError> {
    if students::get_student_by_id(db, student_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "No student with id {}",
            student_id
        )));
    }
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Course name is required".to_string()));
    }
    if end_date < start_date {
        return Err(AppError::BadRequest(
            "End date must not be before start date".to_string(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO courses (student_id, name, start_date, end_date) VALUES (?, ?, ?, ?)",
    )
    .bind(student_id)
    .bind(name)
    .bind(start_date)
    .bind(end_date)
    .execute(db)
    .await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        student_id,
        name: name.to_string(),
        start_date,
        end_date,
    })
}

pub async fn get_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, student_id, name, start_date, end_date FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn get_all_courses(
    db: &SqlitePool,
    student_id: i64,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, student_id, name, start_date, end_date FROM courses WHERE student_id = ? ORDER BY start_date",
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}

/// Partial update: unset fields keep their current values. Fails only when
/// the id is unknown or the merged dates would put the end before the start.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    name: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Course, AppError> {
    let mut current = get_course_by_id(db, id).await?.ok_or(AppError::NotFound)?;

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Course name is required".to_string()));
        }
        current.name = name.to_string();
    }
    if let Some(start_date) = start_date {
        current.start_date = start_date;
    }
    if let Some(end_date) = end_date {
        current.end_date = end_date;
    }
    if current.end_date < current.start_date {
        return Err(AppError::BadRequest(
            "End date must not be before start date".to_string(),
        ));
    }

    sqlx::query("UPDATE courses SET name = ?, start_date = ?, end_date = ? WHERE id = ?")
        .bind(&current.name)
        .bind(current.start_date)
        .bind(current.end_date)
        .bind(id)
        .execute(db)
        .await?;

    Ok(current)
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
