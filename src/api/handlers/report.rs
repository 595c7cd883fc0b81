use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct AttendanceReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn attendance_report(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<AttendanceReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ExportAttendanceReport)?;
    let tenant_id = user.tenant_scope()?;

    let records = state
        .attendance_repo
        .list_in_range(tenant_id, query.start_date.as_deref(), query.end_date.as_deref())
        .await?;

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["id", "student_id", "date", "status", "notes", "created_at"])
        .map_err(csv_error)?;
    for record in &records {
        writer
            .write_record(&[
                record.id.clone(),
                record.student_id.clone(),
                record.date.clone(),
                record.status.clone(),
                record.notes.clone().unwrap_or_default(),
                record.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    csv_response("attendance_report.csv", writer)
}

pub async fn grades_report(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ExportGradesReport)?;
    let tenant_id = user.tenant_scope()?;

    let grades = state.grade_repo.list(tenant_id, None, None).await?;
    let students = state.student_repo.list(tenant_id, None).await?;
    let assignments = state.assignment_repo.list(tenant_id, None).await?;

    let student_names: HashMap<&str, String> = students
        .iter()
        .map(|s| (s.id.as_str(), s.full_name()))
        .collect();
    let assignment_titles: HashMap<&str, &str> = assignments
        .iter()
        .map(|a| (a.id.as_str(), a.title.as_str()))
        .collect();

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["student_name", "assignment", "score", "feedback", "created_at"])
        .map_err(csv_error)?;
    for grade in &grades {
        writer
            .write_record(&[
                student_names
                    .get(grade.student_id.as_str())
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                assignment_titles
                    .get(grade.assignment_id.as_str())
                    .map(|title| title.to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
                grade.score.to_string(),
                grade.feedback.clone().unwrap_or_default(),
                grade.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    csv_response("grades_report.csv", writer)
}

pub async fn students_report(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ExportStudentsReport)?;
    let tenant_id = user.tenant_scope()?;

    let students = state.student_repo.list(tenant_id, None).await?;

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record([
            "id", "first_name", "last_name", "email", "grade", "date_of_birth",
            "parent_email", "is_active", "created_at",
        ])
        .map_err(csv_error)?;
    for student in &students {
        writer
            .write_record(&[
                student.id.clone(),
                student.first_name.clone(),
                student.last_name.clone(),
                student.email.clone(),
                student.grade.clone(),
                student.date_of_birth.clone(),
                student.parent_email.clone().unwrap_or_default(),
                student.is_active.to_string(),
                student.created_at.to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    csv_response("students_report.csv", writer)
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::InternalWithMsg(format!("CSV serialization failed: {}", e))
}

fn csv_response(
    filename: &str,
    writer: csv::Writer<Vec<u8>>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalWithMsg(format!("CSV flush failed: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| AppError::InternalWithMsg(format!("CSV encoding failed: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        body,
    ))
}
