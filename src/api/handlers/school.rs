use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateSchoolRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::school::School;
use crate::domain::models::user::Role;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_school(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateSchoolRequest>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateSchool)?;

    let school = School::new(
        payload.name,
        payload.address,
        payload.contact_email,
        payload.contact_phone,
    );
    let created = state.school_repo.create(&school).await?;

    info!("School created: {} (tenant {})", created.id, created.tenant_id);

    Ok(Json(created))
}

pub async fn list_schools(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;

    // The sole tenant-global read: super_admin sees every school.
    let schools = if user.role == Role::SuperAdmin {
        state.school_repo.list_all().await?
    } else {
        state.school_repo.list_by_tenant(user.tenant_scope()?).await?
    };

    Ok(Json(schools))
}
