use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::FeePayload;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::fee::Fee;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct ListFeesQuery {
    pub student_id: Option<String>,
    pub status: Option<String>,
}

pub async fn create_fee(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<FeePayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateFee)?;
    let tenant_id = user.tenant_scope()?;

    let fee = Fee::new(
        tenant_id.to_string(),
        payload.student_id,
        payload.amount,
        payload.due_date,
        payload.description,
        payload.status,
    );
    let created = state.fee_repo.create(&fee).await?;
    Ok(Json(created))
}

pub async fn list_fees(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListFeesQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let fees = state
        .fee_repo
        .list(tenant_id, query.student_id.as_deref(), query.status.as_deref())
        .await?;
    Ok(Json(fees))
}

pub async fn pay_fee(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(fee_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::PayFee)?;
    let tenant_id = user.tenant_scope()?.to_string();

    let fee = state.fee_repo.find_by_id(&tenant_id, &fee_id).await?
        .ok_or(AppError::NotFound("Fee not found".into()))?;

    if !state.fee_repo.mark_paid(&tenant_id, &fee_id, Utc::now()).await? {
        return Err(AppError::NotFound("Fee not found".into()));
    }

    info!("Fee paid: {}", fee_id);

    // Tell every admin of the tenant; a failed push never rolls this back.
    let student_name = state
        .student_repo
        .find_by_id(&tenant_id, &fee.student_id)
        .await?
        .map(|s| s.full_name())
        .unwrap_or_else(|| "Student".to_string());
    let message = format!("${} payment received for {}", fee.amount, student_name);

    let users = state.user_repo.list_by_tenant(&tenant_id).await?;
    for admin in users.iter().filter(|u| u.role.is_admin()) {
        let _ = state
            .notification_service
            .notify("Fee Payment Received", &message, "fee", &admin.id, &tenant_id)
            .await;
    }

    Ok(Json(serde_json::json!({ "message": "Fee paid successfully" })))
}
