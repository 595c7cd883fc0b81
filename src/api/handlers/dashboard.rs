use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::responses::DashboardStats;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::fee::FEE_STATUS_PENDING;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;

pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let today = Utc::now().date_naive().to_string();

    let stats = DashboardStats {
        total_students: state.student_repo.count_active(tenant_id).await?,
        total_teachers: state.teacher_repo.count_active(tenant_id).await?,
        total_assignments: state.assignment_repo.count(tenant_id).await?,
        present_today: state
            .attendance_repo
            .count_by_date_status(tenant_id, &today, "present")
            .await?,
        pending_fees: state.fee_repo.count_by_status(tenant_id, FEE_STATUS_PENDING).await?,
    };

    Ok(Json(stats))
}
