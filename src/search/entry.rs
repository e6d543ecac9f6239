// src/search/entry.rs
// =============================================================================
// Entries are the pages we have visited, linked back to the page we found
// them on. Together they form a tree rooted at the start page, and walking
// up that tree from any entry gives the click path to it.
//
// Instead of each entry holding a pointer to its parent, entries live in an
// arena (a growing Vec) and refer to their parent by index. That keeps
// ownership simple: the arena owns every entry, and any task can read
// the chain of parents while other tasks keep appending.
// =============================================================================

use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Index of an entry inside an [`EntryArena`]
pub type EntryId = usize;

/// What a child task needs to know about its parent: where to find it and
/// how deep it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef {
    pub id: EntryId,
    pub depth: usize,
}

/// A visited page. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub url: String,
    pub title: String,
    pub parent: Option<EntryId>,
    pub depth: usize,
}

impl Entry {
    // The depth is derived from the parent: 0 for the root, parent + 1 otherwise
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        parent: Option<ParentRef>,
    ) -> Self {
        Entry {
            url: url.into(),
            title: title.into(),
            parent: parent.map(|p| p.id),
            depth: parent.map_or(0, |p| p.depth + 1),
        }
    }
}

/// Append-only store of every entry created during a run
#[derive(Debug, Default)]
pub struct EntryArena {
    entries: RwLock<Vec<Entry>>,
}

impl EntryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entry and returns the handle its children will carry
    pub fn insert(&self, entry: Entry) -> ParentRef {
        let depth = entry.depth;
        let mut entries = self.write();
        entries.push(entry);
        ParentRef {
            id: entries.len() - 1,
            depth,
        }
    }

    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every entry, in insertion order
    pub fn snapshot(&self) -> Vec<Entry> {
        self.read().clone()
    }

    /// Titles from the root down to `entry`, joined like "A -> B -> C".
    ///
    /// `entry` itself doesn't have to be stored in the arena (the goal page
    /// never is), but its parent chain does.
    pub fn path(&self, entry: &Entry) -> String {
        let entries = self.read();

        let mut titles = vec![entry.title.as_str()];
        let mut next = entry.parent;
        while let Some(id) = next {
            match entries.get(id) {
                Some(parent) => {
                    titles.push(parent.title.as_str());
                    next = parent.parent;
                }
                None => break,
            }
        }

        titles.reverse();
        titles.join(" -> ")
    }

    // A panic in another task while holding the lock can't leave a
    // half-written entry behind (push is the only write), so poisoning
    // is safe to ignore.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_depth_zero() {
        let root = Entry::new("https://example.com/wiki/A", "A", None);
        assert_eq!(root.depth, 0);
        assert_eq!(root.parent, None);
    }

    #[test]
    fn test_child_depth_is_parent_plus_one() {
        let arena = EntryArena::new();
        let a = arena.insert(Entry::new("https://example.com/wiki/A", "A", None));
        let b = arena.insert(Entry::new("https://example.com/wiki/B", "B", Some(a)));
        let c = Entry::new("https://example.com/wiki/C", "C", Some(b));

        assert_eq!(b.depth, 1);
        assert_eq!(c.depth, 2);
        assert_eq!(c.parent, Some(b.id));
        assert_eq!(arena.get(b.id).map(|e| e.parent), Some(Some(a.id)));
    }

    #[test]
    fn test_path_lists_root_first() {
        let arena = EntryArena::new();
        let a = arena.insert(Entry::new("https://example.com/wiki/A", "A", None));
        let b = arena.insert(Entry::new("https://example.com/wiki/B", "B", Some(a)));
        let goal = Entry::new("https://example.com/wiki/C", "C", Some(b));

        let path = arena.path(&goal);
        assert_eq!(path, "A -> B -> C");
        assert_eq!(path.split(" -> ").count(), goal.depth + 1);
    }

    #[test]
    fn test_path_of_root_is_its_title() {
        let arena = EntryArena::new();
        let root = Entry::new("https://example.com/wiki/A", "A", None);
        assert_eq!(arena.path(&root), "A");
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let arena = EntryArena::new();
        let a = arena.insert(Entry::new("https://example.com/wiki/A", "A", None));
        arena.insert(Entry::new("https://example.com/wiki/B", "B", Some(a)));

        let titles: Vec<_> = arena.snapshot().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(arena.len(), 2);
    }
}
