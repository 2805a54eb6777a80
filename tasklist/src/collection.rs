//! The ordered to-do collection and its transitions.
//!
//! Every transition takes `&self` and returns a new collection; a snapshot
//! once handed out never changes. Positions are only meaningful against the
//! snapshot they were read from, so every index-taking transition treats an
//! out-of-range index as a no-op rather than an error.

use crate::types::{EditPolicy, FilterMode, TodoId, TodoItem};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Ordered sequence of todo items, shared between snapshots
///
/// Cloning is an `Arc` bump; transitions copy the item list once and leave
/// the original untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoCollection {
    items: Arc<[TodoItem]>,
}

impl TodoCollection {
    /// An empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// All items in display order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Current position of the item with `id`
    #[must_use]
    pub fn index_of(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Whether two handles point at the same snapshot
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Appends a new pending item titled with the trimmed `raw_text`
    ///
    /// Blank input returns the collection unchanged.
    #[must_use]
    pub fn add(&self, raw_text: &str, id: TodoId, now: DateTime<Utc>) -> Self {
        let title = raw_text.trim();
        if title.is_empty() {
            return self.clone();
        }

        let mut items = self.items.to_vec();
        items.push(TodoItem::new(id, title.to_string(), now));
        Self::from(items)
    }

    /// Flips `completed` on the item at `index`
    #[must_use]
    pub fn toggle_completed(&self, index: usize, now: DateTime<Utc>) -> Self {
        self.update(index, |item| item.toggle(now))
    }

    /// Puts the item at `index` into edit mode
    ///
    /// Under [`EditPolicy::Single`] every other item leaves edit mode.
    #[must_use]
    pub fn begin_edit(&self, index: usize, policy: EditPolicy) -> Self {
        if index >= self.len() {
            return self.clone();
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let mut item = item.clone();
                if position == index {
                    item.editing = true;
                } else if policy == EditPolicy::Single {
                    item.editing = false;
                }
                item
            })
            .collect::<Vec<_>>();
        Self::from(items)
    }

    /// Leaves edit mode on the item at `index`, retitling it with the
    /// trimmed `new_text`
    ///
    /// Blank text discards the edit: the title stays, edit mode still ends.
    #[must_use]
    pub fn commit_edit(&self, index: usize, new_text: &str) -> Self {
        let title = new_text.trim();
        self.update(index, |item| {
            if !title.is_empty() {
                title.clone_into(&mut item.title);
            }
            item.editing = false;
        })
    }

    /// Leaves edit mode on the item at `index` without touching its title
    #[must_use]
    pub fn cancel_edit(&self, index: usize) -> Self {
        self.update(index, |item| item.editing = false)
    }

    /// Removes the item at `index`; later items move down one position
    #[must_use]
    pub fn delete(&self, index: usize) -> Self {
        if index >= self.len() {
            return self.clone();
        }

        let mut items = self.items.to_vec();
        items.remove(index);
        Self::from(items)
    }

    /// Items shown under `filter`, each paired with its index in the full
    /// collection
    ///
    /// Transitions are keyed by that full-collection index, never by the
    /// position within the filtered list.
    #[must_use]
    pub fn visible_items(&self, filter: FilterMode) -> Vec<(usize, &TodoItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item))
            .collect()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Number of items not yet completed
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Positions of items currently in edit mode
    #[must_use]
    pub fn editing_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.editing.then_some(index))
            .collect()
    }

    fn update(&self, index: usize, f: impl FnOnce(&mut TodoItem)) -> Self {
        if index >= self.len() {
            return self.clone();
        }

        let mut items = self.items.to_vec();
        f(&mut items[index]);
        Self::from(items)
    }
}

impl From<Vec<TodoItem>> for TodoCollection {
    fn from(items: Vec<TodoItem>) -> Self {
        Self {
            items: items.into(),
        }
    }
}
