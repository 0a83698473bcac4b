//! Reference entities: read-only lookup data that feeds selection fields.

use crate::models::ids::{EntityId, UserId};
use serde::{Deserialize, Serialize};

/// The kinds of record a selection level can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Year,
    Department,
    Class,
    Section,
    Subject,
    Teacher,
    Student,
    ExamType,
    ExamSlot,
    ExamSession,
    Day,
    Slot,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Year,
        EntityKind::Department,
        EntityKind::Class,
        EntityKind::Section,
        EntityKind::Subject,
        EntityKind::Teacher,
        EntityKind::Student,
        EntityKind::ExamType,
        EntityKind::ExamSlot,
        EntityKind::ExamSession,
        EntityKind::Day,
        EntityKind::Slot,
    ];
}

/// A record that can be offered as an option in a selection level.
pub trait Selectable {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Text shown in the dropdown and matched by search.
    fn label(&self) -> String;

    /// This record's foreign key into an entity of kind `parent`.
    fn parent_id(&self, _parent: EntityKind) -> Option<EntityId> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcademicYear {
    #[serde(rename = "year_id")]
    pub id: EntityId,
    #[serde(rename = "year_lable", alias = "year_label", default)]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "department_id", alias = "id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    #[serde(rename = "class_id")]
    pub id: EntityId,
    #[serde(rename = "class_name", default)]
    pub name: String,
    #[serde(default)]
    pub department_id: Option<EntityId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section_id")]
    pub id: EntityId,
    #[serde(rename = "section_name", default)]
    pub name: String,
    pub class_id: EntityId,
    #[serde(default)]
    pub department_id: Option<EntityId>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "subject_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject_code: Option<String>,
    #[serde(default)]
    pub department_id: Option<EntityId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "teacher_id")]
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub teacher_code: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "student_id")]
    pub id: EntityId,
    #[serde(default)]
    pub student_number: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub section_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamType {
    #[serde(rename = "exam_type_id")]
    pub id: EntityId,
    #[serde(rename = "type_name", default)]
    pub name: String,
    #[serde(default)]
    pub weight_percentage: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamSlot {
    #[serde(rename = "exam_slot_id")]
    pub id: EntityId,
    #[serde(rename = "exam_slot_name", default)]
    pub name: String,
    #[serde(default)]
    pub exam_start_time: Option<String>,
    #[serde(default)]
    pub exam_end_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekDay {
    #[serde(rename = "day_id")]
    pub id: EntityId,
    #[serde(rename = "day_name", default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "slot_id")]
    pub id: EntityId,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl Selectable for AcademicYear {
    const KIND: EntityKind = EntityKind::Year;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

impl Selectable for Department {
    const KIND: EntityKind = EntityKind::Department;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for SchoolClass {
    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self, parent: EntityKind) -> Option<EntityId> {
        match parent {
            EntityKind::Department => self.department_id,
            _ => None,
        }
    }
}

impl Selectable for Section {
    const KIND: EntityKind = EntityKind::Section;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self, parent: EntityKind) -> Option<EntityId> {
        match parent {
            EntityKind::Class => Some(self.class_id),
            EntityKind::Department => self.department_id,
            _ => None,
        }
    }
}

impl Selectable for Subject {
    const KIND: EntityKind = EntityKind::Subject;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self, parent: EntityKind) -> Option<EntityId> {
        match parent {
            EntityKind::Department => self.department_id,
            _ => None,
        }
    }
}

impl Selectable for Teacher {
    const KIND: EntityKind = EntityKind::Teacher;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.full_name()
    }
}

impl Selectable for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> EntityId {
        self.id
    }

    // Search matches the student number as well as the name.
    fn label(&self) -> String {
        format!(
            "{} - {} {}",
            self.student_number, self.first_name, self.last_name
        )
    }
}

impl Selectable for ExamType {
    const KIND: EntityKind = EntityKind::ExamType;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for ExamSlot {
    const KIND: EntityKind = EntityKind::ExamSlot;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for WeekDay {
    const KIND: EntityKind = EntityKind::Day;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for Slot {
    const KIND: EntityKind = EntityKind::Slot;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}
