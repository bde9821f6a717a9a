use sqlx::SqlitePool;

use crate::db::{assignments, courses};
use crate::error::AppError;
use crate::models::{Assignment, Course};

/// Read-side wrapper used by the console interface.
pub struct DataFetcher {
    db: SqlitePool,
}

impl DataFetcher {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn courses(&self, student_id: i64) -> Result<Vec<Course>, AppError> {
        Ok(courses::get_all_courses(&self.db, student_id).await?)
    }

    pub async fn assignments(&self, student_id: i64) -> Result<Vec<Assignment>, AppError> {
        Ok(assignments::get_assignments(&self.db, student_id).await?)
    }
}
