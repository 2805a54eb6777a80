//! Boundary with the presentation layer.
//!
//! [`ViewEvent`] is what a front end observes (keys, blur, clicks);
//! [`ViewEvent::into_action`] turns it into a [`TodoAction`]. [`ViewModel`]
//! is everything a front end needs to draw the list, derived from one
//! [`TodoState`] snapshot.

use crate::error::Result;
use crate::reducer::{ItemIntent, TodoAction, TodoState};
use crate::types::{EditMode, FilterMode, TodoId};
use serde::Serialize;

/// Keys the input fields react to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Submit / commit
    Enter,
    /// Abandon the edit
    Escape,
    /// Anything else; ignored
    Other,
}

/// Something the user did in the view
///
/// Row events carry the id of the row that was drawn, so a click still
/// reaches its item after earlier items have been deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// Key pressed in the new-task field
    NewTodoKey {
        /// Key pressed
        key: Key,
        /// Current field text
        text: String,
    },
    /// Completion checkbox clicked
    ToggleClicked {
        /// Item the row shows
        id: TodoId,
    },
    /// Title clicked to start editing
    TitleClicked {
        /// Item the row shows
        id: TodoId,
    },
    /// Key pressed in an item's edit field
    EditKey {
        /// Item the row shows
        id: TodoId,
        /// Key pressed
        key: Key,
        /// Current field text
        text: String,
    },
    /// An item's edit field lost focus
    EditBlurred {
        /// Item the row shows
        id: TodoId,
    },
    /// Delete control clicked
    DeleteClicked {
        /// Item the row shows
        id: TodoId,
    },
    /// Filter option clicked, carrying the option's title
    FilterClicked {
        /// Title of the option
        title: String,
    },
}

impl ViewEvent {
    /// The action this event triggers, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::TodoError::InvalidArgument`] when a filter click
    /// carries a title that names no filter.
    pub fn into_action(self) -> Result<Option<TodoAction>> {
        let for_item = |id, intent| Some(TodoAction::ForItem { id, intent });

        let action = match self {
            Self::NewTodoKey {
                key: Key::Enter,
                text,
            } => Some(TodoAction::SubmitNewTodo { text }),
            Self::EditKey {
                id,
                key: Key::Enter,
                text,
            } => for_item(id, ItemIntent::CommitEdit { text }),
            Self::EditKey {
                id,
                key: Key::Escape,
                ..
            }
            | Self::EditBlurred { id } => for_item(id, ItemIntent::CancelEdit),
            Self::NewTodoKey { .. } | Self::EditKey { .. } => None,
            Self::ToggleClicked { id } => for_item(id, ItemIntent::Toggle),
            Self::TitleClicked { id } => for_item(id, ItemIntent::BeginEdit),
            Self::DeleteClicked { id } => for_item(id, ItemIntent::Delete),
            Self::FilterClicked { title } => Some(TodoAction::ChangeFilter {
                mode: title.parse()?,
            }),
        };
        Ok(action)
    }
}

/// One selectable filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Filter this option selects
    pub mode: FilterMode,
    /// Capitalized display text
    pub label: String,
    /// Whether this is the active filter
    pub active: bool,
}

/// One row of the rendered list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VisibleItem {
    /// Position in the full collection, for ordering and display
    pub index: usize,
    /// Stable identifier; what row events carry
    pub id: TodoId,
    /// Task title
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
    /// Whether to draw an edit field instead of the title
    pub editing: bool,
    /// `Completed` or `Pending`
    pub status: &'static str,
}

/// Everything a front end draws, derived from one state snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Rows under the active filter, in display order
    pub items: Vec<VisibleItem>,
    /// Active filter
    pub filter: FilterMode,
    /// All filter options with their active flags
    pub filters: Vec<FilterOption>,
    /// Items in the full collection
    pub total: usize,
    /// Completed items in the full collection
    pub completed: usize,
    /// Pending items in the full collection
    pub remaining: usize,
}

impl ViewModel {
    /// Derives the view model for `state`
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        let items = state
            .visible_items()
            .into_iter()
            .map(|(index, item)| VisibleItem {
                index,
                id: item.id,
                title: item.title.clone(),
                completed: item.completed,
                editing: item.mode() == EditMode::Editing,
                status: item.status_label(),
            })
            .collect();

        let filters = FilterMode::ALL
            .into_iter()
            .map(|mode| FilterOption {
                mode,
                label: mode.label(),
                active: mode == state.filter,
            })
            .collect();

        Self {
            items,
            filter: state.filter,
            filters,
            total: state.count(),
            completed: state.completed_count(),
            remaining: state.remaining_count(),
        }
    }
}

impl From<&TodoState> for ViewModel {
    fn from(state: &TodoState) -> Self {
        Self::from_state(state)
    }
}
