use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use crate::api::dtos::requests::AssignmentPayload;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::assignment::Assignment;
use crate::domain::models::user::Role;
use crate::domain::services::authorization::{require, Action};
use crate::error::AppError;
use crate::state::AppState;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct ListAssignmentsQuery {
    pub grade: Option<String>,
}

pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AssignmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::CreateAssignment)?;
    let tenant_id = user.tenant_scope()?.to_string();

    let assignment = Assignment::new(
        tenant_id.clone(),
        payload.title,
        payload.description,
        payload.due_date,
        payload.subject,
        payload.teacher_id,
        payload.grade,
        payload.max_score,
    );
    let created = state.assignment_repo.create(&assignment).await?;

    info!("Assignment created: {}", created.id);

    // Push a notification to every student account of the targeted grade.
    // Notification failures must not fail the creation.
    let message = format!(
        "New assignment '{}' for {}. Due: {}",
        created.title, created.subject, created.due_date
    );
    let students = state.student_repo.list(&tenant_id, Some(&created.grade)).await?;
    for student in &students {
        if let Ok(Some(account)) = state.user_repo.find_by_email(&student.email).await
            && account.role == Role::Student
        {
            let _ = state
                .notification_service
                .notify("New Assignment", &message, "assignment", &account.id, &tenant_id)
                .await;
        }
    }

    Ok(Json(created))
}

pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListAssignmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    require(user.role, Action::ViewTenantData)?;
    let tenant_id = user.tenant_scope()?;

    let assignments = state.assignment_repo.list(tenant_id, query.grade.as_deref()).await?;
    Ok(Json(assignments))
}
