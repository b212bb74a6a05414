use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// Set of currently expanded row ids. Several rows may be open at once and
/// ids compare by value.
#[derive(Debug, Clone)]
pub struct ExpansionTracker<Id: Eq + Hash> {
    expanded: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for ExpansionTracker<Id> {
    fn default() -> Self {
        Self { expanded: HashSet::new() }
    }
}

impl<Id: Eq + Hash + Clone> ExpansionTracker<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expanded<I: IntoIterator<Item = Id>>(ids: I) -> Self {
        Self { expanded: ids.into_iter().collect() }
    }

    /// Flip membership; returns whether `id` is expanded afterwards.
    pub fn toggle(&mut self, id: &Id) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn expand(&mut self, id: &Id) {
        self.expanded.insert(id.clone());
    }

    pub fn collapse(&mut self, id: &Id) {
        self.expanded.remove(id);
    }

    /// Replaces the whole set.
    pub fn expand_all<I: IntoIterator<Item = Id>>(&mut self, ids: I) {
        self.expanded = ids.into_iter().collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Accepts any borrowed form of the id, e.g. `&str` for `String` ids.
    pub fn is_expanded<Q>(&self, id: &Q) -> bool
    where
        Id: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.expanded.contains(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut t = ExpansionTracker::new();
        t.expand(&id("a"));
        let before = t.expanded_count();
        assert!(t.toggle(&id("b")));
        assert!(t.is_expanded(&id("b")));
        assert!(!t.toggle(&id("b")));
        assert!(!t.is_expanded(&id("b")));
        assert_eq!(t.expanded_count(), before);
    }

    #[test]
    fn expand_and_collapse_are_idempotent() {
        let mut t = ExpansionTracker::new();
        t.expand(&id("1"));
        t.expand(&id("1"));
        assert_eq!(t.expanded_count(), 1);
        t.collapse(&id("1"));
        t.collapse(&id("1"));
        t.collapse(&id("never"));
        assert_eq!(t.expanded_count(), 0);
    }

    #[test]
    fn many_rows_can_be_open() {
        let mut t = ExpansionTracker::new();
        t.toggle(&id("1"));
        t.toggle(&id("2"));
        t.toggle(&id("3"));
        assert_eq!(t.expanded_count(), 3);
        assert!(t.is_expanded(&id("2")));
    }

    #[test]
    fn expand_all_replaces_and_collapse_all_clears() {
        let mut t = ExpansionTracker::with_expanded([id("x")]);
        t.expand_all([id("1"), id("2"), id("2")]);
        assert!(!t.is_expanded(&id("x")));
        assert_eq!(t.expanded_count(), 2);
        t.collapse_all();
        assert_eq!(t.expanded_count(), 0);
    }

    #[test]
    fn lookup_by_borrowed_str() {
        let mut t = ExpansionTracker::new();
        t.expand(&id("42"));
        assert!(t.is_expanded("42"));
        assert!(!t.is_expanded("4"));
    }

    #[test]
    fn numeric_ids_compare_by_value() {
        let mut t: ExpansionTracker<u32> = ExpansionTracker::new();
        t.expand(&7);
        assert!(t.is_expanded(&7));
        assert!(!t.toggle(&7));
    }
}
