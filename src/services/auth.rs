use sqlx::SqlitePool;
use tracing::warn;

use crate::db::students;
use crate::error::AppError;
use crate::models::Student;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|_| AppError::InternalServerError)
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Looks up the stored hash for the email and checks the password against it.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn try_login(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<Student>, AppError> {
    let Some(hash) = students::get_password_hash(db, email).await? else {
        return Ok(None);
    };

    if !verify_password(password, &hash) {
        warn!("failed login attempt for {}", email);
        return Ok(None);
    }

    Ok(students::get_student(db, email).await?)
}
