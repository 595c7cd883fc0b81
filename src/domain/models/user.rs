use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    SchoolAdmin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::SchoolAdmin)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub tenant_id: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        full_name: String,
        role: Role,
        tenant_id: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            full_name,
            role,
            tenant_id,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Tenant the caller operates in. Only a super_admin may lack one, and a
    /// super_admin without a tenant cannot touch tenant-scoped resources.
    pub fn tenant_scope(&self) -> Result<&str, AppError> {
        self.tenant_id
            .as_deref()
            .ok_or_else(|| AppError::Validation("Account has no tenant context".into()))
    }
}
