pub mod sqlite_assignment_repo;
pub mod sqlite_attendance_repo;
pub mod sqlite_fee_repo;
pub mod sqlite_grade_repo;
pub mod sqlite_notification_repo;
pub mod sqlite_school_repo;
pub mod sqlite_student_repo;
pub mod sqlite_teacher_repo;
pub mod sqlite_timetable_repo;
pub mod sqlite_user_repo;
