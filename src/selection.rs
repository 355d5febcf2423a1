//! Selection State

use rustc_hash::FxHashMap;

use crate::lines::{CartLine, LineId};

/// Which cart lines the user currently intends to buy.
///
/// After [`SelectionState::reconcile`] the key set is exactly the id set of
/// the reconciled lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    flags: FxHashMap<LineId, bool>,
}

impl SelectionState {
    /// Brings the selection in line with a new set of lines.
    ///
    /// Lines seen for the first time start selected, lines already known keep
    /// their flag and entries for lines that are gone are dropped.
    pub fn reconcile(&mut self, lines: &[CartLine]) {
        let mut flags = FxHashMap::with_capacity_and_hasher(lines.len(), Default::default());

        for line in lines {
            let selected = self.flags.get(&line.id).copied().unwrap_or(true);
            flags.insert(line.id.clone(), selected);
        }

        self.flags = flags;
    }

    /// Whether the line is selected. Unknown lines are not.
    pub fn is_selected(&self, id: &LineId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Whether the line has an entry.
    pub fn contains(&self, id: &LineId) -> bool {
        self.flags.contains_key(id)
    }

    /// Flips the flag for a known line, returning the new value.
    pub fn toggle(&mut self, id: &LineId) -> Option<bool> {
        self.flags.get_mut(id).map(|selected| {
            *selected = !*selected;
            *selected
        })
    }

    /// Sets every entry to `selected`.
    pub fn set_all(&mut self, selected: bool) {
        self.flags.values_mut().for_each(|flag| *flag = selected);
    }

    /// Drops the entry for a line.
    pub fn remove(&mut self, id: &LineId) -> Option<bool> {
        self.flags.remove(id)
    }

    /// Number of selected entries.
    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|selected| **selected).count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates over the line ids with an entry.
    pub fn ids(&self) -> impl Iterator<Item = &LineId> {
        self.flags.keys()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rustc_hash::FxHashSet;

    use super::*;

    fn lines(ids: &[&str]) -> Vec<CartLine> {
        ids.iter()
            .map(|id| CartLine::new(*id, "$1", Timestamp::UNIX_EPOCH))
            .collect()
    }

    fn key_set(selection: &SelectionState) -> FxHashSet<String> {
        selection.ids().map(|id| id.as_str().to_string()).collect()
    }

    #[test]
    fn new_lines_start_selected() {
        let mut selection = SelectionState::default();

        selection.reconcile(&lines(&["a", "b"]));

        assert!(selection.is_selected(&"a".into()));
        assert!(selection.is_selected(&"b".into()));
        assert_eq!(selection.selected_count(), 2);
    }

    #[test]
    fn known_lines_keep_their_flag() {
        let mut selection = SelectionState::default();
        selection.reconcile(&lines(&["a", "b"]));
        selection.toggle(&"a".into());

        selection.reconcile(&lines(&["c", "a", "b"]));

        assert!(!selection.is_selected(&"a".into()));
        assert!(selection.is_selected(&"b".into()));
        assert!(selection.is_selected(&"c".into()));
    }

    #[test]
    fn key_set_matches_lines_after_every_reconcile() {
        let mut selection = SelectionState::default();

        for snapshot in [
            vec!["a", "b", "c"],
            vec!["b"],
            vec![],
            vec!["d", "e"],
            vec!["e", "a"],
        ] {
            selection.reconcile(&lines(&snapshot));

            let expected: FxHashSet<String> = snapshot.iter().map(ToString::to_string).collect();

            assert_eq!(key_set(&selection), expected, "snapshot {snapshot:?}");
        }
    }

    #[test]
    fn toggle_unknown_line_is_none() {
        let mut selection = SelectionState::default();
        selection.reconcile(&lines(&["a"]));

        assert_eq!(selection.toggle(&"zzz".into()), None);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn set_all_and_remove() {
        let mut selection = SelectionState::default();
        selection.reconcile(&lines(&["a", "b"]));

        selection.set_all(false);
        assert_eq!(selection.selected_count(), 0);

        assert_eq!(selection.remove(&"a".into()), Some(false));
        assert!(!selection.contains(&"a".into()));
        assert_eq!(selection.len(), 1);
    }
}
