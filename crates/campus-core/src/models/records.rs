//! Records read back from the backend for the teacher and admin screens.

use crate::models::ids::EntityId;
use crate::models::reference::{EntityKind, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of a teacher's weekly routine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeacherRoutine {
    pub routine_id: EntityId,
    #[serde(default)]
    pub year_id: Option<EntityId>,
    pub class_id: EntityId,
    pub section_id: EntityId,
    pub subject_id: EntityId,
    #[serde(default)]
    pub day_id: Option<EntityId>,
    #[serde(default)]
    pub slot_id: Option<EntityId>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub day_name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl TeacherRoutine {
    pub fn describe(&self) -> String {
        format!(
            "{} {} - {} ({} {}-{})",
            self.class_name.as_deref().unwrap_or("?"),
            self.section_name.as_deref().unwrap_or("?"),
            self.subject_name.as_deref().unwrap_or("?"),
            self.day_name.as_deref().unwrap_or(""),
            self.start_time.as_deref().unwrap_or(""),
            self.end_time.as_deref().unwrap_or(""),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub enrollment_id: EntityId,
    #[serde(default)]
    pub student_id: Option<EntityId>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A scheduled exam for one subject in one section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamSession {
    #[serde(rename = "exam_session_id")]
    pub id: EntityId,
    #[serde(default)]
    pub exam_type_name: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub max_marks: Option<f64>,
}

impl Selectable for ExamSession {
    const KIND: EntityKind = EntityKind::ExamSession;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        let mut label = format!(
            "{} - {}",
            self.exam_type_name.as_deref().unwrap_or("Exam"),
            self.subject_name.as_deref().unwrap_or("Subject")
        );
        if let Some(date) = &self.exam_date {
            label.push_str(&format!(" ({})", date));
        }
        if let Some(max) = self.max_marks {
            label.push_str(&format!(" - Max: {}", max));
        }
        label
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub result_id: Option<EntityId>,
    pub exam_session_id: EntityId,
    pub enrollment_id: EntityId,
    pub obtained_marks: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        };
        f.write_str(s)
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("unknown attendance status: {}", other)),
        }
    }
}

/// Per-student totals for one routine's subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummaryRow {
    pub enrollment_id: EntityId,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub total_classes: u32,
    #[serde(default)]
    pub total_present: u32,
    #[serde(default)]
    pub total_absent: u32,
    #[serde(default)]
    pub attendance_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub record_id: EntityId,
    #[serde(default)]
    pub session_id: Option<EntityId>,
    #[serde(default)]
    pub session_date: Option<String>,
    pub status: AttendanceStatus,
}

/// One student's attendance history for a subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDetails {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub subject_id: Option<EntityId>,
    #[serde(default)]
    pub class_id: Option<EntityId>,
    #[serde(default)]
    pub section_id: Option<EntityId>,
    #[serde(rename = "studentSubjectAttendances", default)]
    pub entries: Vec<AttendanceEntry>,
}
