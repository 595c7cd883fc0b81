use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::GradePayload;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::grade::Grade;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ListGradesQuery {
    pub student_id: Option<String>,
    pub assignment_id: Option<String>,
}

pub async fn create_grade(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<GradePayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateGrade)?;
    let tenant_id = user.tenant_scope()?;

    let grade = Grade::new(
        tenant_id.to_string(),
        payload.assignment_id,
        payload.student_id,
        payload.score,
        payload.feedback,
    );
    let created = state.grade_repo.create(&grade).await?;
    Ok(Json(created))
}

pub async fn list_grades(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListGradesQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let grades = state
        .grade_repo
        .list(tenant_id, query.student_id.as_deref(), query.assignment_id.as_deref())
        .await?;
    Ok(Json(grades))
}
