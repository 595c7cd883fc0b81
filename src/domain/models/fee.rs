use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const FEE_STATUS_PENDING: &str = "pending";
pub const FEE_STATUS_PAID: &str = "paid";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Fee {
    pub id: String,
    pub tenant_id: String,
    pub student_id: String,
    pub amount: f64,
    pub due_date: String,
    pub description: String,
    pub status: String,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Fee {
    pub fn new(
        tenant_id: String,
        student_id: String,
        amount: f64,
        due_date: String,
        description: String,
        status: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            student_id,
            amount,
            due_date,
            description,
            status: status.unwrap_or_else(|| FEE_STATUS_PENDING.to_string()),
            paid_date: None,
            created_at: Utc::now(),
        }
    }
}
