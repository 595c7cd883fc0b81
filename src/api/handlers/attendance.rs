use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::AttendancePayload;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::attendance::Attendance;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListAttendanceQuery {
    pub student_id: Option<String>,
    pub date: Option<String>,
}

pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AttendancePayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::RecordAttendance)?;
    let tenant_id = user.tenant_scope()?;

    let attendance = Attendance::new(
        tenant_id.to_string(),
        payload.student_id,
        payload.date,
        payload.status,
        payload.notes,
    );
    let created = state.attendance_repo.create(&attendance).await?;
    Ok(Json(created))
}

pub async fn list_attendance(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let records = state
        .attendance_repo
        .list(tenant_id, query.student_id.as_deref(), query.date.as_deref())
        .await?;
    Ok(Json(records))
}
