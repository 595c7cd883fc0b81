pub mod ai;
pub mod assignment;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod fee;
pub mod grade;
pub mod health;
pub mod notification;
pub mod report;
pub mod school;
pub mod student;
pub mod teacher;
pub mod timetable;

use axum::body::Bytes;
use axum::extract::Multipart;
use crate::error::AppError;

/// Pulls the uploaded CSV out of a multipart body. The first `file` field
/// wins; anything else in the form is ignored.
pub(crate) async fn read_csv_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            return field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)));
        }
    }

    Err(AppError::Validation("Missing 'file' field in upload".into()))
}
