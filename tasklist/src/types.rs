//! Domain types for the to-do list.
//!
//! A to-do list is an ordered collection of items that can be added,
//! completed, edited in place and deleted, viewed through one of three
//! filters.

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a todo item
///
/// Assigned once at creation and never reused, unlike positions which shift
/// whenever an earlier item is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    /// Stable identifier
    pub id: TodoId,
    /// What the task is; never blank
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
    /// Whether the item is currently shown as an edit field
    pub editing: bool,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// When the item was last marked completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a pending, non-editing item
    ///
    /// The caller is responsible for passing an already trimmed, non-empty title.
    #[must_use]
    pub const fn new(id: TodoId, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed: false,
            editing: false,
            created_at,
            completed_at: None,
        }
    }

    /// Flips completion, stamping or clearing `completed_at`
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
    }

    /// Current position in the Viewing/Editing state machine
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        if self.editing {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    /// Status label shown next to the title
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

/// Display mode of one item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Title shown as text
    #[default]
    Viewing,
    /// Title shown in an edit field
    Editing,
}

/// Whether more than one item may be in edit mode at a time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Beginning an edit ends every other edit
    #[default]
    Single,
    /// Edits are independent; several items may be editing at once
    Multiple,
}

impl FromStr for EditPolicy {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            _ => Err(TodoError::InvalidArgument {
                what: "edit policy",
                value: s.to_string(),
                expected: "single, multiple",
            }),
        }
    }
}

/// Which items the list shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every item
    #[default]
    All,
    /// Only completed items
    Completed,
    /// Only items not yet completed
    Remaining,
}

impl FilterMode {
    /// Every filter, in the order the options are displayed
    pub const ALL: [Self; 3] = [Self::All, Self::Completed, Self::Remaining];

    /// Whether `item` is shown under this filter
    #[must_use]
    pub const fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Completed => item.completed,
            Self::Remaining => !item.completed,
        }
    }

    /// Lowercase name, as carried by filter option clicks
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Remaining => "remaining",
        }
    }

    /// Capitalized name for display
    #[must_use]
    pub fn label(self) -> String {
        capitalize(self.name())
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterMode {
    type Err = TodoError;

    /// Parses a filter name, ignoring case and surrounding whitespace.
    ///
    /// Anything else is a caller bug and is rejected rather than silently
    /// falling back to `All`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TodoError::InvalidArgument {
                what: "filter mode",
                value: s.to_string(),
                expected: "all, completed, remaining",
            })
    }
}

/// Upper-cases the first character, leaving the rest untouched
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use tasklist_core::environment::{Clock, IdGenerator};
    use tasklist_testing::{SequentialIdGenerator, test_clock};

    fn item(title: &str) -> TodoItem {
        let ids = SequentialIdGenerator::new();
        TodoItem::new(
            TodoId::from_uuid(ids.next_id()),
            title.to_string(),
            test_clock().now(),
        )
    }

    #[test]
    fn todo_item_new() {
        let item = item("Test todo");

        assert_eq!(item.title, "Test todo");
        assert!(!item.completed);
        assert!(!item.editing);
        assert_eq!(item.mode(), EditMode::Viewing);
        assert_eq!(item.completed_at, None);
        assert_eq!(item.status_label(), "Pending");
    }

    #[test]
    fn todo_item_toggle_stamps_and_clears() {
        let mut item = item("Test");
        let now = test_clock().now();

        item.toggle(now);
        assert!(item.completed);
        assert_eq!(item.completed_at, Some(now));
        assert_eq!(item.status_label(), "Completed");

        item.toggle(now);
        assert!(!item.completed);
        assert_eq!(item.completed_at, None);
    }

    #[test]
    fn todo_id_display() {
        let id = TodoId::from_uuid(SequentialIdGenerator::nth(7));
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000007");
    }

    #[test]
    fn filter_mode_parses_case_insensitively() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!(" Completed ".parse::<FilterMode>().unwrap(), FilterMode::Completed);
        assert_eq!("REMAINING".parse::<FilterMode>().unwrap(), FilterMode::Remaining);
    }

    #[test]
    fn filter_mode_rejects_unknown_values() {
        let err = "pending".parse::<FilterMode>().unwrap_err();
        assert!(matches!(
            err,
            TodoError::InvalidArgument { what: "filter mode", ref value, .. } if value == "pending"
        ));
        assert!("".parse::<FilterMode>().is_err());
    }

    #[test]
    fn filter_mode_labels() {
        let labels: Vec<_> = FilterMode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["All", "Completed", "Remaining"]);
        assert_eq!(FilterMode::default(), FilterMode::All);
    }

    #[test]
    fn filter_mode_matches() {
        let mut done = item("done");
        done.toggle(test_clock().now());
        let open = item("open");

        assert!(FilterMode::All.matches(&done) && FilterMode::All.matches(&open));
        assert!(FilterMode::Completed.matches(&done) && !FilterMode::Completed.matches(&open));
        assert!(!FilterMode::Remaining.matches(&done) && FilterMode::Remaining.matches(&open));
    }

    #[test]
    fn edit_policy_parses() {
        assert_eq!("single".parse::<EditPolicy>().unwrap(), EditPolicy::Single);
        assert_eq!("Multiple".parse::<EditPolicy>().unwrap(), EditPolicy::Multiple);
        assert!("both".parse::<EditPolicy>().is_err());
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("ällo"), "Ällo");
    }
}
