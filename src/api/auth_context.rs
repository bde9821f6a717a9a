use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Requester identity taken from the `X-Student-Id` / `X-Role` headers.
/// There is no session machinery; the headers are the whole contract, and
/// ownership checks compare `student_id` against the resource owner no
/// matter what the role says.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub student_id: i64,
    pub role: String,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let student_id = parts
            .headers
            .get("x-student-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or(AppError::Unauthorized)?;

        let role = parts
            .headers
            .get("x-role")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("student")
            .to_string();

        Ok(AuthContext { student_id, role })
    }
}
