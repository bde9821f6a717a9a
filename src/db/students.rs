use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Student;

pub async fn add_student(
    db: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Student, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if get_student(db, email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "A student with email {} already exists",
            email
        )));
    }

    let result = sqlx::query("INSERT INTO students (name, email, password_hash) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(db)
        .await?;

    Ok(Student {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role: "student".to_string(),
    })
}

pub async fn get_student(db: &SqlitePool, email: &str) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, name, email, password_hash, role FROM students WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn get_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, name, email, password_hash, role FROM students WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update_student_name(
    db: &SqlitePool,
    id: i64,
    name: &str,
) -> Result<bool, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let result = sqlx::query("UPDATE students SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_student_email(
    db: &SqlitePool,
    id: i64,
    email: &str,
) -> Result<bool, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    // The email may already belong to someone else; surface that as a
    // conflict instead of a raw unique-constraint error.
    if let Some(existing) = get_student(db, email).await? {
        if existing.id != id {
            return Err(AppError::Conflict(format!(
                "A student with email {} already exists",
                email
            )));
        }
    }

    let result = sqlx::query("UPDATE students SET email = ? WHERE id = ?")
        .bind(email)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_password_hash(
    db: &SqlitePool,
    email: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT password_hash FROM students WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}
