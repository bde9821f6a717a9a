use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Assignment progress state. Stored and serialized with the
/// lowercase-hyphenated spelling; anything else is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Overdue => "overdue",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "pending" => Some(Status::Pending),
            "in-progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            "overdue" => Some(Status::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub deadline: NaiveDate,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignmentRequest {
    pub course_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
}

/// Partial update. `course_id` distinguishes "leave unchanged" (field absent,
/// outer `None`) from "clear the link" (explicit JSON null, `Some(None)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub course_id: Option<Option<i64>>,
    pub status: Option<Status>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(de).map(Some)
}
