use serde::Serialize;

#[derive(Serialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_assignments: i64,
    pub present_today: i64,
    pub pending_fees: i64,
}

#[derive(Serialize)]
pub struct BulkImportResponse {
    pub imported: usize,
    pub errors: Vec<String>,
}
