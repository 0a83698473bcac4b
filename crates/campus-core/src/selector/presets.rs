//! Selection chains used by the forms.
//!
//! Each submodule names its level indices so callers never count by hand.

use crate::error::Result;
use crate::models::{EntityId, EntityKind};
use crate::selector::chain::HierarchicalSelector;
use crate::selector::level::LevelSpec;

/// Department whose subjects are taught in every section.
pub const COMMON_DEPARTMENT_ID: EntityId = 5;

/// Student enrollment: sections narrow by both department and class.
pub mod enrollment {
    use super::*;

    pub const STUDENT: usize = 0;
    pub const YEAR: usize = 1;
    pub const DEPARTMENT: usize = 2;
    pub const CLASS: usize = 3;
    pub const SECTION: usize = 4;

    pub fn chain() -> Result<HierarchicalSelector> {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Student),
            LevelSpec::root(EntityKind::Year),
            LevelSpec::root(EntityKind::Department),
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section)
                .under(DEPARTMENT, EntityKind::Department)
                .under(CLASS, EntityKind::Class),
        ])
    }
}

/// Class routine entry.
pub mod routine {
    use super::*;

    pub const YEAR: usize = 0;
    pub const CLASS: usize = 1;
    pub const SECTION: usize = 2;
    pub const SUBJECT: usize = 3;
    pub const TEACHER: usize = 4;
    pub const DAY: usize = 5;
    pub const SLOT: usize = 6;

    pub fn chain() -> Result<HierarchicalSelector> {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Year),
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section).under(CLASS, EntityKind::Class),
            LevelSpec::root(EntityKind::Subject),
            LevelSpec::root(EntityKind::Teacher),
            LevelSpec::root(EntityKind::Day),
            LevelSpec::root(EntityKind::Slot),
        ])
    }
}

/// Exam session scheduling: subjects come from the section's department
/// or the common department.
pub mod exam {
    use super::*;

    pub const YEAR: usize = 0;
    pub const EXAM_TYPE: usize = 1;
    pub const CLASS: usize = 2;
    pub const SECTION: usize = 3;
    pub const SUBJECT: usize = 4;
    pub const EXAM_SLOT: usize = 5;

    pub fn chain() -> Result<HierarchicalSelector> {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Year),
            LevelSpec::root(EntityKind::ExamType),
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section).under(CLASS, EntityKind::Class),
            LevelSpec::root(EntityKind::Subject)
                .under(SECTION, EntityKind::Department)
                .sharing(COMMON_DEPARTMENT_ID),
            LevelSpec::root(EntityKind::ExamSlot),
        ])
    }
}

/// Result entry: class, section and subject are further limited by the
/// teacher's routine; exam sessions are fetched for the full selection.
pub mod result {
    use super::*;

    pub const YEAR: usize = 0;
    pub const CLASS: usize = 1;
    pub const SECTION: usize = 2;
    pub const SUBJECT: usize = 3;
    pub const EXAM_SESSION: usize = 4;

    pub fn chain() -> Result<HierarchicalSelector> {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Year),
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section).under(CLASS, EntityKind::Class),
            LevelSpec::root(EntityKind::Subject),
            LevelSpec::fetched(EntityKind::ExamSession),
        ])
    }
}

/// Attendance summary and sheet: the subject list is the whole catalogue.
pub mod attendance {
    use super::*;

    pub const YEAR: usize = 0;
    pub const CLASS: usize = 1;
    pub const SECTION: usize = 2;
    pub const SUBJECT: usize = 3;

    pub fn chain() -> Result<HierarchicalSelector> {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Year),
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section).under(CLASS, EntityKind::Class),
            LevelSpec::root(EntityKind::Subject),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, Subject};
    use crate::selector::level::Choice;

    fn sections() -> Vec<Section> {
        serde_json::from_value(serde_json::json!([
            { "section_id": 1, "section_name": "Nine-Sci", "class_id": 9, "department_id": 10 },
            { "section_id": 2, "section_name": "Nine-Arts", "class_id": 9, "department_id": 20 },
            { "section_id": 3, "section_name": "Ten-Sci", "class_id": 10, "department_id": 10 }
        ]))
        .unwrap()
    }

    fn subjects() -> Vec<Subject> {
        serde_json::from_value(serde_json::json!([
            { "subject_id": 100, "name": "Physics", "department_id": 10 },
            { "subject_id": 101, "name": "Civics", "department_id": 20 },
            { "subject_id": 102, "name": "Bangla", "department_id": COMMON_DEPARTMENT_ID }
        ]))
        .unwrap()
    }

    #[test]
    fn test_presets_build() {
        assert_eq!(enrollment::chain().unwrap().len(), 5);
        assert_eq!(routine::chain().unwrap().len(), 7);
        assert_eq!(exam::chain().unwrap().len(), 6);
        assert_eq!(result::chain().unwrap().len(), 5);
        assert_eq!(attendance::chain().unwrap().len(), 4);
    }

    #[test]
    fn test_enrollment_sections_need_department_and_class() {
        let mut s = enrollment::chain().unwrap();
        s.load_records(enrollment::SECTION, &sections()).unwrap();

        s.select_at_level(enrollment::DEPARTMENT, Some(10)).unwrap();
        assert!(s.options_for(enrollment::SECTION).unwrap().is_empty());

        s.select_at_level(enrollment::CLASS, Some(9)).unwrap();
        let ids: Vec<_> = s
            .options_for(enrollment::SECTION)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_exam_subjects_follow_section_department() {
        let mut s = exam::chain().unwrap();
        s.load(exam::CLASS, vec![Choice::new(9, "Nine"), Choice::new(10, "Ten")])
            .unwrap();
        s.load_records(exam::SECTION, &sections()).unwrap();
        s.load_records(exam::SUBJECT, &subjects()).unwrap();

        s.pick(exam::CLASS, 9).unwrap();
        assert!(s.options_for(exam::SUBJECT).unwrap().is_empty());

        s.pick(exam::SECTION, 2).unwrap();
        let labels: Vec<_> = s
            .options_for(exam::SUBJECT)
            .unwrap()
            .into_iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Civics", "Bangla"]);
    }
}
