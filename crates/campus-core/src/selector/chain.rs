//! The hierarchical selector.

use crate::error::{CoreError, Result};
use crate::models::{EntityId, EntityKind, Selectable};
use crate::selector::level::{Choice, Level, LevelSpec, ParentLink, Source};
use std::collections::HashSet;

/// Proof that a fetch for a level was started, and under which selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub level: usize,
    token: u64,
    ancestors: Vec<Option<EntityId>>,
}

/// A chain of dependent dropdowns.
///
/// Selecting at a level clears every level below it, so a level never
/// offers options that belong to a previous parent. Fetched results are
/// tagged with a per-level request token and dropped when a newer fetch was
/// started or the selection above changed in the meantime.
#[derive(Clone, Debug)]
pub struct HierarchicalSelector {
    levels: Vec<Level>,
}

impl HierarchicalSelector {
    /// Build a chain. A parent link must point at an earlier level.
    pub fn new(specs: impl IntoIterator<Item = LevelSpec>) -> Result<Self> {
        let mut levels = Vec::new();
        for (index, spec) in specs.into_iter().enumerate() {
            if let Some(bad) = spec.parents.iter().find(|p| p.level >= index) {
                return Err(CoreError::UnknownLevel(bad.level));
            }
            levels.push(Level::new(spec));
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn kind(&self, level: usize) -> Result<EntityKind> {
        Ok(self.level(level)?.spec.kind)
    }

    /// Index of the first level holding `kind`.
    pub fn level_of(&self, kind: EntityKind) -> Option<usize> {
        self.levels.iter().position(|l| l.spec.kind == kind)
    }

    /// Replace a level's full option list.
    pub fn load(&mut self, level: usize, choices: Vec<Choice>) -> Result<()> {
        let ancestors = self.ancestors(level)?;
        let target = self.level_mut(level)?;
        target.records = choices;
        if target.spec.source == Source::Fetched {
            target.fetched_for = Some(ancestors);
        }
        Ok(())
    }

    pub fn load_records<T: Selectable>(&mut self, level: usize, records: &[T]) -> Result<()> {
        self.load(level, Choice::all(records))
    }

    /// Set the selection at `level` and clear everything below it.
    ///
    /// Also closes every dropdown. Calling it again with the same value
    /// changes nothing.
    pub fn select_at_level(&mut self, level: usize, value: Option<EntityId>) -> Result<()> {
        let target = self.level_mut(level)?;
        let changed = target.selected_id != value;
        target.selected_id = value;

        for below in self.levels.iter_mut().skip(level + 1) {
            below.reset();
            if changed {
                below.request_token += 1;
                if below.spec.source == Source::Fetched {
                    below.records.clear();
                    below.fetched_for = None;
                }
            }
        }
        self.close_all();
        Ok(())
    }

    /// Choose an offered option: select it and show its label in the
    /// level's search box. Returns false if `id` is not currently offered.
    pub fn pick(&mut self, level: usize, id: EntityId) -> Result<bool> {
        let label = match self.options_for(level)?.into_iter().find(|c| c.id == id) {
            Some(choice) => choice.label.clone(),
            None => return Ok(false),
        };
        self.select_at_level(level, Some(id))?;
        self.level_mut(level)?.search_text = label;
        Ok(true)
    }

    pub fn selected(&self, level: usize) -> Option<EntityId> {
        self.levels.get(level).and_then(|l| l.selected_id)
    }

    pub fn selected_choice(&self, level: usize) -> Option<&Choice> {
        self.levels.get(level).and_then(Level::selected)
    }

    pub fn selections(&self) -> Vec<Option<EntityId>> {
        self.levels.iter().map(|l| l.selected_id).collect()
    }

    pub fn search_text(&self, level: usize) -> Option<&str> {
        self.levels.get(level).map(|l| l.search_text.as_str())
    }

    /// Typing into a level's search box opens its dropdown.
    pub fn set_search_text(&mut self, level: usize, text: impl Into<String>) -> Result<()> {
        self.level_mut(level)?.search_text = text.into();
        self.open(level)
    }

    /// The options a level offers under the current selection.
    ///
    /// Empty when any parent is unselected.
    pub fn options_for(&self, level: usize) -> Result<Vec<&Choice>> {
        let target = self.level(level)?;

        if target.spec.source == Source::Fetched
            && target.fetched_for.as_ref() != Some(&self.ancestors(level)?)
        {
            return Ok(Vec::new());
        }

        let mut keys = Vec::with_capacity(target.spec.parents.len());
        for link in &target.spec.parents {
            match self.parent_value(link) {
                Some(value) => keys.push((link, value)),
                None => return Ok(Vec::new()),
            }
        }

        Ok(target
            .records
            .iter()
            .filter(|c| target.is_allowed(c.id))
            .filter(|c| {
                keys.iter().all(|(link, value)| match c.link(link.key) {
                    Some(key) => key == *value || link.shared.contains(&key),
                    None => false,
                })
            })
            .collect())
    }

    /// [`options_for`](Self::options_for) restricted to labels containing
    /// `text`, ignoring case.
    pub fn filter_by_search(&self, level: usize, text: &str) -> Result<Vec<&Choice>> {
        Ok(self
            .options_for(level)?
            .into_iter()
            .filter(|c| c.matches_search(text))
            .collect())
    }

    /// Options filtered by the level's own search text.
    pub fn visible_options(&self, level: usize) -> Result<Vec<&Choice>> {
        let text = self.level(level)?.search_text.clone();
        self.filter_by_search(level, &text)
    }

    pub fn is_enabled(&self, level: usize) -> bool {
        self.options_for(level).map_or(false, |o| !o.is_empty())
    }

    /// Open one dropdown; any other open dropdown closes.
    pub fn open(&mut self, level: usize) -> Result<()> {
        self.level(level)?;
        for (index, l) in self.levels.iter_mut().enumerate() {
            l.is_open = index == level;
        }
        Ok(())
    }

    pub fn toggle(&mut self, level: usize) -> Result<()> {
        if self.level(level)?.is_open {
            self.close_all();
            Ok(())
        } else {
            self.open(level)
        }
    }

    /// Click-outside: close every dropdown.
    pub fn close_all(&mut self) {
        for l in &mut self.levels {
            l.is_open = false;
        }
    }

    pub fn is_open(&self, level: usize) -> bool {
        self.levels.get(level).map_or(false, |l| l.is_open)
    }

    pub fn open_level(&self) -> Option<usize> {
        self.levels.iter().position(|l| l.is_open)
    }

    /// Start a fetch for `level`. Any earlier ticket for it becomes stale.
    pub fn begin_fetch(&mut self, level: usize) -> Result<FetchTicket> {
        let ancestors = self.ancestors(level)?;
        let target = self.level_mut(level)?;
        target.request_token += 1;
        Ok(FetchTicket {
            level,
            token: target.request_token,
            ancestors,
        })
    }

    /// Apply fetched options if `ticket` is still current.
    ///
    /// Returns false, leaving the level untouched, when a newer fetch was
    /// started or the selection above changed since the ticket was issued.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, choices: Vec<Choice>) -> Result<bool> {
        let ancestors = self.ancestors(ticket.level)?;
        let target = self.level_mut(ticket.level)?;
        if ticket.token != target.request_token || ticket.ancestors != ancestors {
            tracing::debug!(
                "[selector] dropping stale {:?} options (ticket {}, current {})",
                target.spec.kind,
                ticket.token,
                target.request_token
            );
            return Ok(false);
        }
        target.records = choices;
        target.fetched_for = Some(ancestors);
        Ok(true)
    }

    /// Offer only `ids` at `level`. A selection outside them is cleared.
    pub fn restrict(&mut self, level: usize, ids: impl IntoIterator<Item = EntityId>) -> Result<()> {
        let allowed: HashSet<EntityId> = ids.into_iter().collect();
        let target = self.level_mut(level)?;
        let stale = target.selected_id.filter(|id| !allowed.contains(id));
        target.allowed = Some(allowed);
        if stale.is_some() {
            target.search_text.clear();
            self.select_at_level(level, None)?;
        }
        Ok(())
    }

    pub fn unrestrict(&mut self, level: usize) -> Result<()> {
        self.level_mut(level)?.allowed = None;
        Ok(())
    }

    fn parent_value(&self, link: &ParentLink) -> Option<EntityId> {
        let parent = self.levels.get(link.level)?;
        if parent.spec.kind == link.key {
            parent.selected_id
        } else {
            parent.selected()?.link(link.key)
        }
    }

    fn ancestors(&self, level: usize) -> Result<Vec<Option<EntityId>>> {
        self.level(level)?;
        Ok(self.levels[..level].iter().map(|l| l.selected_id).collect())
    }

    fn level(&self, level: usize) -> Result<&Level> {
        self.levels.get(level).ok_or(CoreError::UnknownLevel(level))
    }

    fn level_mut(&mut self, level: usize) -> Result<&mut Level> {
        self.levels.get_mut(level).ok_or(CoreError::UnknownLevel(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS: usize = 0;
    const SECTION: usize = 1;

    fn ids(options: Vec<&Choice>) -> Vec<EntityId> {
        options.into_iter().map(|c| c.id).collect()
    }

    /// Class -> Section, the two-level chain from the cascading-reset scenario.
    fn class_section() -> HierarchicalSelector {
        let mut s = HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Class),
            LevelSpec::root(EntityKind::Section).under(CLASS, EntityKind::Class),
        ])
        .unwrap();
        s.load(
            CLASS,
            vec![
                Choice::new(1, "Class 1").with_link(EntityKind::Department, 10),
                Choice::new(2, "Class 2").with_link(EntityKind::Department, 20),
            ],
        )
        .unwrap();
        s.load(
            SECTION,
            vec![
                Choice::new(5, "Section A").with_link(EntityKind::Class, 1),
                Choice::new(6, "Section B").with_link(EntityKind::Class, 2),
            ],
        )
        .unwrap();
        s
    }

    /// Department -> Class -> Section -> Subject (via the section's department).
    fn four_levels() -> HierarchicalSelector {
        let mut s = HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Department),
            LevelSpec::root(EntityKind::Class).under(0, EntityKind::Department),
            LevelSpec::root(EntityKind::Section).under(1, EntityKind::Class),
            LevelSpec::root(EntityKind::Subject)
                .under(2, EntityKind::Department)
                .sharing(5),
        ])
        .unwrap();
        s.load(0, vec![Choice::new(10, "Science"), Choice::new(20, "Arts"), Choice::new(5, "Common")])
            .unwrap();
        s.load(
            1,
            vec![
                Choice::new(1, "Nine").with_link(EntityKind::Department, 10),
                Choice::new(2, "Ten").with_link(EntityKind::Department, 20),
                Choice::new(3, "Eleven").with_link(EntityKind::Department, 10),
            ],
        )
        .unwrap();
        s.load(
            2,
            vec![
                Choice::new(5, "A")
                    .with_link(EntityKind::Class, 1)
                    .with_link(EntityKind::Department, 10),
                Choice::new(6, "B")
                    .with_link(EntityKind::Class, 2)
                    .with_link(EntityKind::Department, 20),
                Choice::new(7, "C")
                    .with_link(EntityKind::Class, 1)
                    .with_link(EntityKind::Department, 20),
            ],
        )
        .unwrap();
        s.load(
            3,
            vec![
                Choice::new(100, "Physics").with_link(EntityKind::Department, 10),
                Choice::new(101, "History").with_link(EntityKind::Department, 20),
                Choice::new(102, "English").with_link(EntityKind::Department, 5),
                Choice::new(103, "Unassigned"),
            ],
        )
        .unwrap();
        s
    }

    #[test]
    fn test_cascading_reset_scenario() {
        let mut s = class_section();
        s.select_at_level(CLASS, Some(2)).unwrap();
        assert_eq!(ids(s.options_for(SECTION).unwrap()), vec![6]);

        assert!(s.pick(SECTION, 6).unwrap());
        assert_eq!(s.selected(SECTION), Some(6));

        s.select_at_level(CLASS, Some(1)).unwrap();
        assert_eq!(ids(s.options_for(SECTION).unwrap()), vec![5]);
        assert_eq!(s.selected(SECTION), None);
        assert_eq!(s.search_text(SECTION), Some(""));
    }

    #[test]
    fn test_select_clears_every_level_below() {
        let base = {
            let mut s = four_levels();
            s.pick(0, 10).unwrap();
            s.pick(1, 1).unwrap();
            s.pick(2, 5).unwrap();
            s.pick(3, 100).unwrap();
            s.set_search_text(3, "phy").unwrap();
            s
        };
        for k in 0..base.len() - 1 {
            let mut s = base.clone();
            s.select_at_level(k, Some(99)).unwrap();
            for j in k + 1..s.len() {
                assert_eq!(s.selected(j), None, "level {} after select at {}", j, k);
                assert_eq!(s.search_text(j), Some(""), "level {} after select at {}", j, k);
            }
            for j in 0..k {
                assert_eq!(s.selected(j), base.selected(j));
            }
        }
    }

    #[test]
    fn test_options_follow_parent_selection() {
        let mut s = four_levels();
        for dept in [10, 20, 5, 99] {
            s.select_at_level(0, Some(dept)).unwrap();
            for c in s.options_for(1).unwrap() {
                assert_eq!(c.link(EntityKind::Department), Some(dept));
            }
        }
        s.select_at_level(0, Some(10)).unwrap();
        assert_eq!(ids(s.options_for(1).unwrap()), vec![1, 3]);
        s.select_at_level(1, Some(1)).unwrap();
        for c in s.options_for(2).unwrap() {
            assert_eq!(c.link(EntityKind::Class), s.selected(1));
        }
    }

    #[test]
    fn test_subject_joins_on_section_department() {
        let mut s = four_levels();
        s.select_at_level(0, Some(10)).unwrap();
        s.select_at_level(1, Some(1)).unwrap();

        s.select_at_level(2, Some(7)).unwrap();
        assert_eq!(ids(s.options_for(3).unwrap()), vec![101, 102]);

        s.select_at_level(2, Some(5)).unwrap();
        assert_eq!(ids(s.options_for(3).unwrap()), vec![100, 102]);
    }

    #[test]
    fn test_unselected_parent_disables_child() {
        let s = class_section();
        assert!(s.options_for(SECTION).unwrap().is_empty());
        assert!(!s.is_enabled(SECTION));
        assert!(s.is_enabled(CLASS));
    }

    #[test]
    fn test_parent_without_children_gives_empty_list() {
        let mut s = class_section();
        s.select_at_level(CLASS, Some(1)).unwrap();
        assert!(s.is_enabled(SECTION));
        s.load(CLASS, vec![Choice::new(1, "Class 1"), Choice::new(3, "Class 3")]).unwrap();
        s.select_at_level(CLASS, Some(3)).unwrap();
        assert!(s.options_for(SECTION).unwrap().is_empty());
        assert!(!s.is_enabled(SECTION));
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut s = four_levels();
        s.pick(0, 10).unwrap();
        s.pick(1, 1).unwrap();
        s.open(2).unwrap();

        s.select_at_level(1, Some(3)).unwrap();
        let once = format!("{:?}", s);
        s.select_at_level(1, Some(3)).unwrap();
        assert_eq!(format!("{:?}", s), once);
    }

    #[test]
    fn test_filter_by_search_keeps_selection() {
        let mut s = four_levels();
        s.select_at_level(0, Some(10)).unwrap();
        s.select_at_level(1, Some(3)).unwrap();
        assert_eq!(ids(s.filter_by_search(1, "ELE").unwrap()), vec![3]);
        assert!(s.filter_by_search(1, "ten").unwrap().is_empty());
        assert_eq!(ids(s.filter_by_search(1, "").unwrap()), vec![1, 3]);
        assert_eq!(s.selected(1), Some(3));
    }

    #[test]
    fn test_pick_sets_label_and_rejects_unoffered() {
        let mut s = class_section();
        assert!(s.pick(CLASS, 2).unwrap());
        assert_eq!(s.search_text(CLASS), Some("Class 2"));
        assert!(!s.pick(SECTION, 5).unwrap());
        assert_eq!(s.selected(SECTION), None);
    }

    #[test]
    fn test_one_dropdown_open_at_a_time() {
        let mut s = class_section();
        s.open(CLASS).unwrap();
        s.open(SECTION).unwrap();
        assert!(!s.is_open(CLASS));
        assert_eq!(s.open_level(), Some(SECTION));

        s.toggle(SECTION).unwrap();
        assert_eq!(s.open_level(), None);

        s.set_search_text(CLASS, "2").unwrap();
        assert!(s.is_open(CLASS));
        s.select_at_level(CLASS, Some(2)).unwrap();
        assert_eq!(s.open_level(), None);
    }

    #[test]
    fn test_close_all() {
        let mut s = class_section();
        s.open(SECTION).unwrap();
        s.close_all();
        assert_eq!(s.open_level(), None);
    }

    #[test]
    fn test_unknown_level() {
        let mut s = class_section();
        assert!(matches!(s.select_at_level(7, None), Err(CoreError::UnknownLevel(7))));
        assert!(s.options_for(2).is_err());
        assert!(!s.is_enabled(2));
        assert!(matches!(
            HierarchicalSelector::new([LevelSpec::root(EntityKind::Class).under(0, EntityKind::Class)]),
            Err(CoreError::UnknownLevel(0))
        ));
    }

    fn fetched_chain() -> HierarchicalSelector {
        HierarchicalSelector::new([
            LevelSpec::root(EntityKind::Section),
            LevelSpec::fetched(EntityKind::Student),
        ])
        .unwrap()
    }

    #[test]
    fn test_stale_fetch_after_parent_change_is_dropped() {
        let mut s = fetched_chain();
        s.select_at_level(0, Some(5)).unwrap();
        let old = s.begin_fetch(1).unwrap();

        s.select_at_level(0, Some(6)).unwrap();
        let new = s.begin_fetch(1).unwrap();

        assert!(s.apply_fetch(&new, vec![Choice::new(61, "Rina")]).unwrap());
        assert!(!s.apply_fetch(&old, vec![Choice::new(51, "Karim")]).unwrap());
        assert_eq!(ids(s.options_for(1).unwrap()), vec![61]);
    }

    #[test]
    fn test_older_fetch_for_same_parent_is_dropped() {
        let mut s = fetched_chain();
        s.select_at_level(0, Some(5)).unwrap();
        let first = s.begin_fetch(1).unwrap();
        let second = s.begin_fetch(1).unwrap();

        assert!(s.apply_fetch(&second, vec![Choice::new(2, "second")]).unwrap());
        assert!(!s.apply_fetch(&first, vec![Choice::new(1, "first")]).unwrap());
        assert_eq!(ids(s.options_for(1).unwrap()), vec![2]);
    }

    #[test]
    fn test_fetched_options_vanish_when_parent_changes() {
        let mut s = fetched_chain();
        s.select_at_level(0, Some(5)).unwrap();
        let ticket = s.begin_fetch(1).unwrap();
        s.apply_fetch(&ticket, vec![Choice::new(51, "Karim")]).unwrap();
        assert!(s.is_enabled(1));

        s.select_at_level(0, Some(6)).unwrap();
        assert!(s.options_for(1).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_started_before_reselect_of_same_value_survives() {
        let mut s = fetched_chain();
        s.select_at_level(0, Some(5)).unwrap();
        let ticket = s.begin_fetch(1).unwrap();
        s.select_at_level(0, Some(5)).unwrap();
        assert!(s.apply_fetch(&ticket, vec![Choice::new(51, "Karim")]).unwrap());
    }

    #[test]
    fn test_restrict_limits_and_clears_selection() {
        let mut s = class_section();
        s.pick(CLASS, 2).unwrap();
        s.pick(SECTION, 6).unwrap();

        s.restrict(CLASS, [1]).unwrap();
        assert_eq!(ids(s.options_for(CLASS).unwrap()), vec![1]);
        assert_eq!(s.selected(CLASS), None);
        assert_eq!(s.search_text(CLASS), Some(""));
        assert_eq!(s.selected(SECTION), None);

        s.unrestrict(CLASS).unwrap();
        assert_eq!(ids(s.options_for(CLASS).unwrap()), vec![1, 2]);
    }
}
