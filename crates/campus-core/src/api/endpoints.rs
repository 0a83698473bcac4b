//! Backend routes, relative to the API base URL.

use crate::models::EntityId;

pub const LOGIN: &str = "/Auth/login";
pub const SIGN_UP: &str = "/Auth/signup";
pub const CURRENT_USER: &str = "/Auth/current-user";

pub const YEARS: &str = "/Years/get-academic-years";
pub const DEPARTMENTS: &str = "/Department/getdepartments";
pub const CLASSES: &str = "/Classes/get-classes";
pub const SECTIONS: &str = "/Sections/get-sections";
pub const SUBJECTS: &str = "/Subjects/get-subjects";
pub const TEACHERS: &str = "/Teachers/teacher-list";
pub const EXAM_TYPES: &str = "/Exam/get-exam-types";
pub const EXAM_SLOTS: &str = "/Exam/get-exam-slots";
pub const DAYS: &str = "/WeeklyDays/get-days";
pub const SLOTS: &str = "/WeeklyDays/get-slots";

pub const STUDENTS: &str = "/Students/get-all";
pub const ENROLLMENTS: &str = "/Enrollments/get-enrollments";
pub const EXAM_SESSIONS: &str = "/Exam/get-exam-sessions";
pub const ATTENDANCE_SUMMARY: &str = "/Attendances/attendance-summary";
pub const ATTENDANCE_DETAILS: &str = "/Attendances/attendance-details";

pub const NEW_ENROLLMENT: &str = "/Enrollments/new-enrollment";
pub const ADD_ROUTINE: &str = "/ClassRoutines/add-routine";
pub const TAKE_ATTENDANCE: &str = "/Attendances/take-attendance";
pub const ADD_RESULT: &str = "/Results/add-result";
pub const ADD_EXAM: &str = "/Exam/add-exam";
pub const ADD_DEPARTMENT: &str = "/Department/adddepartment";
pub const ADD_STUDENT: &str = "/Students/add-student";
pub const ADD_TEACHER: &str = "/Teachers/add-teacher";

pub fn user_by_email(email: &str) -> String {
    format!("/Auth/getuser/{}", email)
}

pub fn teacher_by_user(user_id: &str) -> String {
    format!("/Teachers/GetByUserId/{}", user_id)
}

pub fn teacher_routine(teacher_id: EntityId, year_id: EntityId) -> String {
    format!("/ClassRoutines/teacher-routine/{}/{}", teacher_id, year_id)
}

pub fn result(exam_session_id: EntityId, enrollment_id: EntityId) -> String {
    format!("/Results/get-result/{}/{}", exam_session_id, enrollment_id)
}

pub fn update_attendance(record_id: EntityId, status: &str) -> String {
    format!("/Attendances/update-attendance/{}/{}", record_id, status)
}

pub fn update_department(department_id: EntityId) -> String {
    format!("/Department/update-department/{}", department_id)
}
