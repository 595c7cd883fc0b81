pub mod assignment;
pub mod attendance;
pub mod auth;
pub mod fee;
pub mod grade;
pub mod notification;
pub mod school;
pub mod student;
pub mod teacher;
pub mod timetable;
pub mod user;
