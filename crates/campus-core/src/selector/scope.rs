//! Limit selections to what a teacher actually teaches.

use crate::error::Result;
use crate::models::{EntityId, TeacherRoutine};
use crate::selector::chain::HierarchicalSelector;
use std::collections::BTreeSet;

/// The class/section/subject combinations in a teacher's routine for one
/// academic year.
#[derive(Clone, Debug, Default)]
pub struct RoutineScope {
    entries: Vec<(EntityId, EntityId, EntityId)>,
}

/// Selector levels a [`RoutineScope`] applies to.
#[derive(Clone, Copy, Debug)]
pub struct ScopedLevels {
    pub class: usize,
    pub section: usize,
    pub subject: usize,
}

impl RoutineScope {
    pub fn new(routines: &[TeacherRoutine]) -> Self {
        Self {
            entries: routines
                .iter()
                .map(|r| (r.class_id, r.section_id, r.subject_id))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn class_ids(&self) -> BTreeSet<EntityId> {
        self.entries.iter().map(|(c, _, _)| *c).collect()
    }

    pub fn section_ids(&self, class_id: EntityId) -> BTreeSet<EntityId> {
        self.entries
            .iter()
            .filter(|(c, _, _)| *c == class_id)
            .map(|(_, s, _)| *s)
            .collect()
    }

    pub fn subject_ids(&self, class_id: EntityId, section_id: EntityId) -> BTreeSet<EntityId> {
        self.entries
            .iter()
            .filter(|(c, s, _)| *c == class_id && *s == section_id)
            .map(|(_, _, subject)| *subject)
            .collect()
    }

    /// Restrict the three levels under the selector's current choices.
    ///
    /// Call again after each pick; a level whose parent is unselected
    /// offers nothing.
    pub fn apply(&self, selector: &mut HierarchicalSelector, levels: ScopedLevels) -> Result<()> {
        selector.restrict(levels.class, self.class_ids())?;

        let sections = match selector.selected(levels.class) {
            Some(class_id) => self.section_ids(class_id),
            None => BTreeSet::new(),
        };
        selector.restrict(levels.section, sections)?;

        let subjects = match (selector.selected(levels.class), selector.selected(levels.section)) {
            (Some(class_id), Some(section_id)) => self.subject_ids(class_id, section_id),
            _ => BTreeSet::new(),
        };
        selector.restrict(levels.subject, subjects)
    }
}
