use axum::{
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::StudentPayload;
use crate::api::dtos::responses::BulkImportResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::student::Student;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use csv::StringRecord;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
pub struct ListStudentsQuery {
    pub grade: Option<String>,
}

pub async fn create_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateStudent)?;
    let tenant_id = user.tenant_scope()?;

    let student = student_from_payload(tenant_id.to_string(), payload);
    let created = state.student_repo.create(&student).await?;

    info!("Student created: {}", created.id);

    Ok(Json(created))
}

pub async fn list_students(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListStudentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let students = state.student_repo.list(tenant_id, query.grade.as_deref()).await?;
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let student = state.student_repo.find_by_id(tenant_id, &student_id).await?
        .ok_or(AppError::NotFound("Student not found".into()))?;
    Ok(Json(student))
}

pub async fn update_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(student_id): Path<String>,
    Json(payload): Json<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::UpdateStudent)?;
    let tenant_id = user.tenant_scope()?;

    let mut student = student_from_payload(tenant_id.to_string(), payload);
    student.id = student_id;

    let updated = state.student_repo.update(&student).await?
        .ok_or(AppError::NotFound("Student not found".into()))?;
    Ok(Json(updated))
}

pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::DeleteStudent)?;
    let tenant_id = user.tenant_scope()?;

    if !state.student_repo.delete(tenant_id, &student_id).await? {
        return Err(AppError::NotFound("Student not found".into()));
    }

    info!("Student deleted: {}", student_id);

    Ok(Json(serde_json::json!({ "message": "Student deleted successfully" })))
}

const REQUIRED_COLUMNS: [&str; 5] = ["first_name", "last_name", "email", "grade", "date_of_birth"];

/// Rows import independently: a bad row lands in `errors` and is skipped,
/// every other row stands. Only a missing required column aborts the whole
/// request, before any insert.
pub async fn bulk_import_students(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ImportStudents)?;
    let tenant_id = user.tenant_scope()?.to_string();

    let data = super::read_csv_upload(multipart).await?;
    let mut reader = csv::Reader::from_reader(data.as_ref());

    let headers = reader
        .headers()
        .map_err(|e| AppError::Validation(format!("Failed to read CSV header: {}", e)))?
        .clone();

    if REQUIRED_COLUMNS.iter().any(|col| !headers.iter().any(|h| h == *col)) {
        return Err(AppError::Validation(format!(
            "CSV must contain columns: {}",
            REQUIRED_COLUMNS.join(", ")
        )));
    }

    let mut imported = 0;
    let mut errors = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let line = index + 2; // line 1 is the header

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("row {}: {}", line, e));
                continue;
            }
        };

        let payload = match parse_student_row(&headers, &row) {
            Ok(payload) => payload,
            Err(msg) => {
                errors.push(format!("row {}: {}", line, msg));
                continue;
            }
        };

        let student = student_from_payload(tenant_id.clone(), payload);
        match state.student_repo.create(&student).await {
            Ok(_) => imported += 1,
            Err(e) => {
                warn!("Bulk import insert failed on row {}: {:?}", line, e);
                errors.push(format!("row {}: insert failed", line));
            }
        }
    }

    info!("Bulk student import: {} inserted, {} errors", imported, errors.len());

    Ok(Json(BulkImportResponse { imported, errors }))
}

fn student_from_payload(tenant_id: String, payload: StudentPayload) -> Student {
    Student::new(
        tenant_id,
        payload.first_name,
        payload.last_name,
        payload.email,
        payload.grade,
        payload.date_of_birth,
        payload.parent_email,
    )
}

fn parse_student_row(headers: &StringRecord, row: &StringRecord) -> Result<StudentPayload, String> {
    let field = |name: &str| -> Option<String> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| row.get(i))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    };

    let required = |name: &str| field(name).ok_or_else(|| format!("missing {}", name));

    Ok(StudentPayload {
        first_name: required("first_name")?,
        last_name: required("last_name")?,
        email: required("email")?,
        grade: required("grade")?,
        date_of_birth: required("date_of_birth")?,
        parent_email: field("parent_email"),
    })
}
