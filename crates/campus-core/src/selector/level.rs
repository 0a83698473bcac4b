//! One level of a selection chain.

use crate::models::{EntityId, EntityKind, Selectable};
use std::collections::HashSet;

/// An option as the selector sees it: id, label and foreign keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub id: EntityId,
    pub label: String,
    links: Vec<(EntityKind, EntityId)>,
}

impl Choice {
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_link(mut self, kind: EntityKind, id: EntityId) -> Self {
        self.links.retain(|(k, _)| *k != kind);
        self.links.push((kind, id));
        self
    }

    pub fn of<T: Selectable>(record: &T) -> Self {
        let links = EntityKind::ALL
            .iter()
            .filter_map(|&kind| record.parent_id(kind).map(|id| (kind, id)))
            .collect();
        Self {
            id: record.id(),
            label: record.label(),
            links,
        }
    }

    pub fn all<T: Selectable>(records: &[T]) -> Vec<Self> {
        records.iter().map(Self::of).collect()
    }

    /// Foreign key into an entity of `kind`.
    pub fn link(&self, kind: EntityKind) -> Option<EntityId> {
        self.links
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
    }

    pub fn matches_search(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        needle.is_empty() || self.label.to_lowercase().contains(&needle)
    }
}

/// How a level depends on a level above it.
///
/// An option is offered when its `key` link equals the parent's value for
/// `key`: the parent's selected id when the parent level holds `key`
/// records, otherwise the selected parent record's own `key` link.
#[derive(Clone, Debug, PartialEq)]
pub struct ParentLink {
    pub level: usize,
    pub key: EntityKind,
    /// Key values that match under every parent.
    pub shared: Vec<EntityId>,
}

/// Where a level's options come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// A reference list loaded once and filtered locally.
    Reference,
    /// Fetched per selection of the levels above; only valid for the
    /// selection it was fetched under.
    Fetched,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    pub kind: EntityKind,
    pub parents: Vec<ParentLink>,
    pub source: Source,
}

impl LevelSpec {
    pub fn root(kind: EntityKind) -> Self {
        Self {
            kind,
            parents: Vec::new(),
            source: Source::Reference,
        }
    }

    pub fn fetched(kind: EntityKind) -> Self {
        Self {
            source: Source::Fetched,
            ..Self::root(kind)
        }
    }

    /// Narrow by the selection at `level`, joined on `key`.
    #[must_use]
    pub fn under(mut self, level: usize, key: EntityKind) -> Self {
        self.parents.push(ParentLink {
            level,
            key,
            shared: Vec::new(),
        });
        self
    }

    /// Let `id` match the most recently added parent link regardless of the
    /// parent's value.
    #[must_use]
    pub fn sharing(mut self, id: EntityId) -> Self {
        if let Some(link) = self.parents.last_mut() {
            link.shared.push(id);
        }
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Level {
    pub spec: LevelSpec,
    pub records: Vec<Choice>,
    pub selected_id: Option<EntityId>,
    pub search_text: String,
    pub is_open: bool,
    pub request_token: u64,
    /// Ancestor selection the fetched records belong to.
    pub fetched_for: Option<Vec<Option<EntityId>>>,
    /// Ids the level is restricted to, if any.
    pub allowed: Option<HashSet<EntityId>>,
}

impl Level {
    pub fn new(spec: LevelSpec) -> Self {
        Self {
            spec,
            records: Vec::new(),
            selected_id: None,
            search_text: String::new(),
            is_open: false,
            request_token: 0,
            fetched_for: None,
            allowed: None,
        }
    }

    pub fn selected(&self) -> Option<&Choice> {
        let id = self.selected_id?;
        self.records.iter().find(|c| c.id == id)
    }

    pub fn is_allowed(&self, id: EntityId) -> bool {
        self.allowed.as_ref().map_or(true, |ids| ids.contains(&id))
    }

    pub fn reset(&mut self) {
        self.selected_id = None;
        self.search_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, Subject};

    #[test]
    fn test_choice_carries_every_foreign_key() {
        let section: Section = serde_json::from_value(serde_json::json!({
            "section_id": 6, "section_name": "B", "class_id": 2, "department_id": 20
        }))
        .unwrap();
        let choice = Choice::of(&section);
        assert_eq!(choice.id, 6);
        assert_eq!(choice.label, "B");
        assert_eq!(choice.link(EntityKind::Class), Some(2));
        assert_eq!(choice.link(EntityKind::Department), Some(20));
        assert_eq!(choice.link(EntityKind::Year), None);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let subject: Subject = serde_json::from_value(serde_json::json!({
            "subject_id": 3, "name": "Higher Mathematics"
        }))
        .unwrap();
        let choice = Choice::of(&subject);
        assert!(choice.matches_search("math"));
        assert!(choice.matches_search("HIGHER"));
        assert!(choice.matches_search(""));
        assert!(!choice.matches_search("physics"));
    }

    #[test]
    fn test_with_link_replaces() {
        let choice = Choice::new(1, "x")
            .with_link(EntityKind::Class, 2)
            .with_link(EntityKind::Class, 3);
        assert_eq!(choice.link(EntityKind::Class), Some(3));
    }
}
