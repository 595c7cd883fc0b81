use crate::domain::models::user::Role;
use crate::error::AppError;

/// Everything a request can be gated on. Adding a variant without touching
/// the matrix below leaves it denied for every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateSchool,
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
    ImportStudents,
    CreateTeacher,
    ImportTeachers,
    CreateAssignment,
    RecordAttendance,
    CreateGrade,
    CreateTimetable,
    CreateFee,
    PayFee,
    ExportAttendanceReport,
    ExportGradesReport,
    ExportStudentsReport,
    ViewTenantData,
}

/// Pure policy lookup. Anything not explicitly allowed is denied.
pub fn authorize(role: Role, action: Action) -> bool {
    use Action::*;
    use Role::*;

    match (role, action) {
        (_, ViewTenantData) => true,

        (SuperAdmin, CreateSchool) => true,

        (SuperAdmin | SchoolAdmin | Teacher, CreateStudent) => true,
        (SuperAdmin | SchoolAdmin | Teacher, UpdateStudent) => true,
        (SuperAdmin | SchoolAdmin, DeleteStudent) => true,
        (SuperAdmin | SchoolAdmin, ImportStudents) => true,

        (SuperAdmin | SchoolAdmin, CreateTeacher) => true,
        (SuperAdmin | SchoolAdmin, ImportTeachers) => true,

        (SuperAdmin | SchoolAdmin | Teacher, CreateAssignment) => true,
        (SuperAdmin | SchoolAdmin | Teacher, RecordAttendance) => true,
        (SuperAdmin | SchoolAdmin | Teacher, CreateGrade) => true,

        (SuperAdmin | SchoolAdmin, CreateTimetable) => true,
        (SuperAdmin | SchoolAdmin, CreateFee) => true,
        (SuperAdmin | SchoolAdmin, PayFee) => true,

        (SuperAdmin | SchoolAdmin | Teacher, ExportAttendanceReport) => true,
        (SuperAdmin | SchoolAdmin | Teacher, ExportGradesReport) => true,
        (SuperAdmin | SchoolAdmin, ExportStudentsReport) => true,

        _ => false,
    }
}

pub fn require(role: Role, action: Action) -> Result<(), AppError> {
    if authorize(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Not authorized".into()))
    }
}
