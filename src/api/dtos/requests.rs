use serde::Deserialize;

// Creation payloads deliberately carry no tenant field: the tenant is always
// stamped from the authenticated caller.

#[derive(Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
}

#[derive(Deserialize)]
pub struct StudentPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: String,
    pub date_of_birth: String,
    pub parent_email: Option<String>,
}

#[derive(Deserialize)]
pub struct TeacherPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subjects: Vec<String>,
    pub qualification: String,
}

#[derive(Deserialize)]
pub struct AssignmentPayload {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub subject: String,
    pub teacher_id: String,
    pub grade: String,
    pub max_score: f64,
}

#[derive(Deserialize)]
pub struct AttendancePayload {
    pub student_id: String,
    pub date: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct GradePayload {
    pub assignment_id: String,
    pub student_id: String,
    pub score: f64,
    pub feedback: Option<String>,
}

#[derive(Deserialize)]
pub struct TimetablePayload {
    pub grade: String,
    pub day: String,
    pub period: i64,
    pub subject: String,
    pub teacher_id: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Deserialize)]
pub struct FeePayload {
    pub student_id: String,
    pub amount: f64,
    pub due_date: String,
    pub description: String,
    pub status: Option<String>,
}
