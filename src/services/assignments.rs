use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::assignments;
use crate::error::AppError;
use crate::models::{Assignment, Status};

/// Write-side wrapper used by the console interface; each method is a single
/// DAO call.
pub struct AssignmentsModifier {
    db: SqlitePool,
}

impl AssignmentsModifier {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn add(
        &self,
        student_id: i64,
        course_id: Option<i64>,
        title: &str,
        description: Option<&str>,
        deadline: NaiveDate,
    ) -> Result<Assignment, AppError> {
        assignments::insert_assignment(&self.db, student_id, course_id, title, description, deadline)
            .await
    }

    pub async fn remove(&self, id: i64) -> Result<bool, AppError> {
        Ok(assignments::delete_assignment(&self.db, id).await?)
    }

    pub async fn set_status(&self, id: i64, status: Status) -> Result<bool, AppError> {
        Ok(assignments::set_status(&self.db, id, status).await?)
    }
}
