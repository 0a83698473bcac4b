//! Write payloads for the domain forms.

use crate::models::ids::{EntityId, UserId};
use crate::models::profile::UserProfile;
use crate::models::records::{AttendanceStatus, Enrollment};
use crate::validate::{
    check_contact, check_date, normalize_date, require_id, require_text, Validate,
    ValidationErrors,
};
use serde::{Deserialize, Serialize};

fn normalize_in_place(value: &mut String) {
    if let Some(iso) = normalize_date(value) {
        *value = iso;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: EntityId,
    pub year_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub admission_date: String,
    pub status: String,
}

impl NewEnrollment {
    pub const DEFAULT_STATUS: &'static str = "Active";

    /// Dates go out as `yyyy-mm-dd`.
    pub fn normalized(mut self) -> Self {
        normalize_in_place(&mut self.admission_date);
        self
    }
}

impl Validate for NewEnrollment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_id(&mut errors, "student_id", "Student", self.student_id);
        require_id(&mut errors, "year_id", "Academic year", self.year_id);
        require_id(&mut errors, "class_id", "Class", self.class_id);
        require_id(&mut errors, "section_id", "Section", self.section_id);
        check_date(&mut errors, "admission_date", "Admission date", &self.admission_date);
        require_text(&mut errors, "status", "Status", &self.status);
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewRoutine {
    pub year_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub subject_id: EntityId,
    pub teacher_id: EntityId,
    pub day_id: EntityId,
    pub slot_id: EntityId,
}

impl Validate for NewRoutine {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_id(&mut errors, "year_id", "Academic year", self.year_id);
        require_id(&mut errors, "class_id", "Class", self.class_id);
        require_id(&mut errors, "section_id", "Section", self.section_id);
        require_id(&mut errors, "subject_id", "Subject", self.subject_id);
        require_id(&mut errors, "teacher_id", "Teacher", self.teacher_id);
        require_id(&mut errors, "day_id", "Day", self.day_id);
        require_id(&mut errors, "slot_id", "Time slot", self.slot_id);
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub enrollment_id: EntityId,
    pub status: AttendanceStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    pub routine_id: EntityId,
    pub session_date: String,
    #[serde(rename = "attendanceInputs")]
    pub inputs: Vec<AttendanceInput>,
}

impl AttendanceSubmission {
    /// Every enrolled student starts out present.
    pub fn all_present(
        routine_id: EntityId,
        session_date: impl Into<String>,
        enrollments: &[Enrollment],
    ) -> Self {
        Self {
            routine_id,
            session_date: session_date.into(),
            inputs: enrollments
                .iter()
                .map(|e| AttendanceInput {
                    enrollment_id: e.enrollment_id,
                    status: AttendanceStatus::Present,
                })
                .collect(),
        }
    }

    /// Change one student's mark; returns false if they are not on the sheet.
    pub fn mark(&mut self, enrollment_id: EntityId, status: AttendanceStatus) -> bool {
        match self
            .inputs
            .iter_mut()
            .find(|i| i.enrollment_id == enrollment_id)
        {
            Some(input) => {
                input.status = status;
                true
            }
            None => false,
        }
    }

    pub fn normalized(mut self) -> Self {
        normalize_in_place(&mut self.session_date);
        self
    }
}

impl Validate for AttendanceSubmission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_id(&mut errors, "routine_id", "Routine", self.routine_id);
        check_date(&mut errors, "session_date", "Date", &self.session_date);
        if self.inputs.is_empty() {
            errors.add("attendanceInputs", "No students to record attendance for");
        }
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewResult {
    pub exam_session_id: EntityId,
    pub enrollment_id: EntityId,
    pub obtained_marks: f64,
}

impl NewResult {
    /// Validation that also knows the session's maximum.
    pub fn validate_against(&self, max_marks: Option<f64>) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(max) = max_marks {
            if self.obtained_marks > max {
                errors.add(
                    "obtained_marks",
                    format!("Obtained marks cannot exceed {}", max),
                );
            }
        }
        errors.into_result()
    }
}

impl Validate for NewResult {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_id(&mut errors, "exam_session_id", "Exam session", self.exam_session_id);
        require_id(&mut errors, "enrollment_id", "Enrollment", self.enrollment_id);
        if !self.obtained_marks.is_finite() || self.obtained_marks < 0.0 {
            errors.add("obtained_marks", "Please enter obtained marks");
        }
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExamSession {
    pub year_id: EntityId,
    pub exam_type_id: EntityId,
    pub subject_id: EntityId,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub exam_date: String,
    pub exam_slot_id: EntityId,
    pub max_marks: f64,
}

impl NewExamSession {
    pub fn normalized(mut self) -> Self {
        normalize_in_place(&mut self.exam_date);
        self
    }
}

impl Validate for NewExamSession {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_id(&mut errors, "year_id", "Academic year", self.year_id);
        require_id(&mut errors, "exam_type_id", "Exam type", self.exam_type_id);
        require_id(&mut errors, "subject_id", "Subject", self.subject_id);
        require_id(&mut errors, "class_id", "Class", self.class_id);
        require_id(&mut errors, "section_id", "Section", self.section_id);
        require_id(&mut errors, "exam_slot_id", "Exam slot", self.exam_slot_id);
        check_date(&mut errors, "exam_date", "Exam date", &self.exam_date);
        if !(self.max_marks >= 1.0) {
            errors.add("max_marks", "Maximum marks must be at least 1");
        }
        errors.into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentForm {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for DepartmentForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name", "Department name", &self.name);
        require_text(&mut errors, "code", "Department code", &self.code);
        errors.into_result()
    }
}

/// Student admission, filed against an account created by sign-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub admission_year: i32,
    pub address: String,
}

impl NewStudent {
    pub fn normalized(mut self) -> Self {
        normalize_in_place(&mut self.dob);
        self
    }
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "user_id", "User account", self.user_id.as_str());
        require_text(&mut errors, "first_name", "First name", &self.first_name);
        require_text(&mut errors, "last_name", "Last name", &self.last_name);
        check_date(&mut errors, "dob", "Date of birth", &self.dob);
        require_text(&mut errors, "gender", "Gender", &self.gender);
        if self.admission_year <= 0 {
            errors.add("admission_year", "Admission year is required");
        }
        require_text(&mut errors, "address", "Address", &self.address);
        errors.into_result()
    }
}

/// Teacher profile, filed against an account created by sign-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTeacher {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub teacher_code: String,
    pub contact: String,
    pub department_id: EntityId,
    #[serde(default)]
    pub photo: Option<String>,
}

impl NewTeacher {
    /// Prefill from the account found by email: the code is the email's
    /// local part and the full name splits at its first space.
    pub fn from_account(user: &UserProfile, email: &str) -> Self {
        let full_name = user.full_name.as_deref().unwrap_or("").trim();
        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (full_name.to_string(), String::new()),
        };
        let teacher_code = email.split('@').next().unwrap_or("").to_string();
        Self {
            user_id: user.id.clone().unwrap_or_else(|| UserId(String::new())),
            first_name,
            last_name,
            teacher_code,
            contact: String::new(),
            department_id: 0,
            photo: None,
        }
    }
}

impl Validate for NewTeacher {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "user_id", "User account", self.user_id.as_str());
        require_text(&mut errors, "first_name", "First name", &self.first_name);
        require_text(&mut errors, "last_name", "Last name", &self.last_name);
        require_text(&mut errors, "teacher_code", "Teacher code", &self.teacher_code);
        check_contact(&mut errors, "contact", &self.contact);
        require_id(&mut errors, "department_id", "Department", self.department_id);
        errors.into_result()
    }
}
