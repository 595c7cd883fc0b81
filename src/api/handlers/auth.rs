use axum::{extract::State, response::IntoResponse, Json};
use crate::domain::models::auth::TokenResponse;
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use std::sync::Arc;
use argon2::{password_hash::{PasswordHash, PasswordHasher, SaltString}, Argon2, PasswordVerifier};
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub tenant_id: Option<String>,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.role != Role::SuperAdmin && payload.tenant_id.is_none() {
        return Err(AppError::Validation("tenant_id is required for this role".into()));
    }

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let user = User::new(
        payload.email,
        payload.full_name,
        payload.role,
        payload.tenant_id,
        password_hash,
    );
    let created = state.user_repo.create(&user).await?;

    info!("User registered: {}", created.id);

    Ok(Json(created))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let access_token = state.token_service.issue(&user.id)?;

    info!("User logged in: {}", user.id);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn me(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(user))
}
