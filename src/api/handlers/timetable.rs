use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::TimetablePayload;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::timetable::TimetableEntry;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListTimetableQuery {
    pub grade: Option<String>,
    pub day: Option<String>,
}

pub async fn create_timetable_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<TimetablePayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateTimetable)?;
    let tenant_id = user.tenant_scope()?;

    let entry = TimetableEntry::new(
        tenant_id.to_string(),
        payload.grade,
        payload.day,
        payload.period,
        payload.subject,
        payload.teacher_id,
        payload.start_time,
        payload.end_time,
    );
    let created = state.timetable_repo.create(&entry).await?;
    Ok(Json(created))
}

pub async fn list_timetable(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListTimetableQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let entries = state
        .timetable_repo
        .list(tenant_id, query.grade.as_deref(), query.day.as_deref())
        .await?;
    Ok(Json(entries))
}
