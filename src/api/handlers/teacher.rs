use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::TeacherPayload;
use crate::api::dtos::responses::BulkImportResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::teacher::Teacher;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use csv::StringRecord;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_teacher(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<TeacherPayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateTeacher)?;
    let tenant_id = user.tenant_scope()?;

    let teacher = teacher_from_payload(tenant_id.to_string(), payload);
    let created = state.teacher_repo.create(&teacher).await?;

    info!("Teacher created: {}", created.id);

    Ok(Json(created))
}

pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let teachers = state.teacher_repo.list(tenant_id).await?;
    Ok(Json(teachers))
}

const REQUIRED_COLUMNS: [&str; 4] = ["first_name", "last_name", "email", "qualification"];

// Same partial-success policy as the student import.
pub async fn bulk_import_teachers(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ImportTeachers)?;
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
        let line = index + 2;

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("row {}: {}", line, e));
                continue;
            }
        };

        let payload = match parse_teacher_row(&headers, &row) {
            Ok(payload) => payload,
            Err(msg) => {
                errors.push(format!("row {}: {}", line, msg));
                continue;
            }
        };

        let teacher = teacher_from_payload(tenant_id.clone(), payload);
        match state.teacher_repo.create(&teacher).await {
            Ok(_) => imported += 1,
            Err(e) => {
                warn!("Bulk import insert failed on row {}: {:?}", line, e);
                errors.push(format!("row {}: insert failed", line));
            }
        }
    }

    info!("Bulk teacher import: {} inserted, {} errors", imported, errors.len());

    Ok(Json(BulkImportResponse { imported, errors }))
}

fn teacher_from_payload(tenant_id: String, payload: TeacherPayload) -> Teacher {
    Teacher::new(
        tenant_id,
        payload.first_name,
        payload.last_name,
        payload.email,
        payload.subjects,
        payload.qualification,
    )
}

fn parse_teacher_row(headers: &StringRecord, row: &StringRecord) -> Result<TeacherPayload, String> {
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

    // Subjects arrive semicolon-separated in a single column.
    let subjects = field("subjects")
        .map(|s| s.split(';').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    Ok(TeacherPayload {
        first_name: required("first_name")?,
        last_name: required("last_name")?,
        email: required("email")?,
        subjects,
        qualification: required("qualification")?,
    })
}
