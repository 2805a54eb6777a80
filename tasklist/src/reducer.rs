//! Reducer logic for the to-do list.
//!
//! Every view intent maps to one action. The reducer installs the snapshot
//! produced by the matching [`TodoCollection`] transition; intents that
//! would not change anything (blank text, stale index) are logged and
//! dropped.

use crate::collection::TodoCollection;
use crate::seed::SeedRecord;
use crate::types::{EditPolicy, FilterMode, TodoId, TodoItem};
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
};

/// State of the to-do list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// All items in display order
    pub todos: TodoCollection,
    /// Active filter
    pub filter: FilterMode,
}

impl TodoState {
    /// Creates an empty list showing every item
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.completed_count()
    }

    /// Returns the number of items not yet completed
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.todos.remaining_count()
    }

    /// Positions of items currently in edit mode
    #[must_use]
    pub fn editing_indices(&self) -> Vec<usize> {
        self.todos.editing_indices()
    }

    /// Returns the item at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.todos.get(index)
    }

    /// Re-resolves a stable id to its current position
    #[must_use]
    pub fn index_of(&self, id: TodoId) -> Option<usize> {
        self.todos.index_of(id)
    }

    /// Items shown under the active filter, with full-collection indices
    #[must_use]
    pub fn visible_items(&self) -> Vec<(usize, &TodoItem)> {
        self.todos.visible_items(self.filter)
    }
}

/// Actions representing view intents
///
/// Indices always refer to the full collection as of the current state,
/// never to a position in a filtered view. Views that keep rows on screen
/// across transitions send [`TodoAction::ForItem`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Add a task with the given (untrimmed) text
    SubmitNewTodo {
        /// Raw text from the input field
        text: String,
    },

    /// Flip completion of a task
    Toggle {
        /// Position of the task
        index: usize,
    },

    /// Show a task as an edit field
    BeginEdit {
        /// Position of the task
        index: usize,
    },

    /// Save the edit field's text and leave edit mode
    CommitEdit {
        /// Position of the task
        index: usize,
        /// Raw text from the edit field
        text: String,
    },

    /// Leave edit mode without saving
    CancelEdit {
        /// Position of the task
        index: usize,
    },

    /// Remove a task
    DeleteTodo {
        /// Position of the task
        index: usize,
    },

    /// Switch the active filter
    ChangeFilter {
        /// Filter to show
        mode: FilterMode,
    },

    /// Apply a row intent to the item with `id`, wherever it sits now
    ///
    /// An id that no longer names an item is ignored.
    ForItem {
        /// Item the row was drawn for
        id: TodoId,
        /// What to do to it
        intent: ItemIntent,
    },

    /// Append preloaded records
    LoadSeed {
        /// Records in display order
        records: Vec<SeedRecord>,
    },
}

/// Row-level intent, before it is resolved to a position
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemIntent {
    /// Flip completion
    Toggle,
    /// Show as an edit field
    BeginEdit,
    /// Save the edit field's text and leave edit mode
    CommitEdit {
        /// Raw text from the edit field
        text: String,
    },
    /// Leave edit mode without saving
    CancelEdit,
    /// Remove the item
    Delete,
}

impl ItemIntent {
    /// The position-keyed action for the item currently at `index`
    #[must_use]
    pub fn at(self, index: usize) -> TodoAction {
        match self {
            Self::Toggle => TodoAction::Toggle { index },
            Self::BeginEdit => TodoAction::BeginEdit { index },
            Self::CommitEdit { text } => TodoAction::CommitEdit { index, text },
            Self::CancelEdit => TodoAction::CancelEdit { index },
            Self::Delete => TodoAction::DeleteTodo { index },
        }
    }
}

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation and completion timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of stable item ids
    pub ids: Arc<dyn IdGenerator>,
    /// Whether several items may be edited at once
    pub edit_policy: EditPolicy,
}

impl TodoEnvironment {
    /// Creates an environment with the default single-edit policy
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            edit_policy: EditPolicy::default(),
        }
    }

    /// Replaces the edit policy
    #[must_use]
    pub fn with_edit_policy(mut self, edit_policy: EditPolicy) -> Self {
        self.edit_policy = edit_policy;
        self
    }

    fn next_id(&self) -> TodoId {
        TodoId::from_uuid(self.ids.next_id())
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("edit_policy", &self.edit_policy)
            .finish_non_exhaustive()
    }
}

/// Reducer for the to-do list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether `index` addresses an item; logs the stale ones
    fn in_range(state: &TodoState, index: usize, intent: &'static str) -> bool {
        let len = state.todos.len();
        if index < len {
            true
        } else {
            tracing::debug!(intent, index, len, "Ignoring intent: index out of range");
            false
        }
    }

    fn load_seed(state: &mut TodoState, records: Vec<SeedRecord>, env: &TodoEnvironment) {
        let now = env.clock.now();
        let mut todos = state.todos.clone();
        for record in records {
            if record.title.trim().is_empty() {
                tracing::warn!(title = %record.title, "Skipping seed record with blank title");
                continue;
            }
            todos = todos.add(&record.title, env.next_id(), now);
            if record.is_completed {
                todos = todos.toggle_completed(todos.len() - 1, now);
            }
        }
        tracing::info!(added = todos.len() - state.todos.len(), "Seed data applied");
        state.todos = todos;
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::SubmitNewTodo { text } => {
                if text.trim().is_empty() {
                    tracing::debug!("Ignoring blank new todo");
                } else {
                    state.todos = state.todos.add(&text, env.next_id(), env.clock.now());
                }
            },

            TodoAction::Toggle { index } => {
                if Self::in_range(state, index, "toggle") {
                    state.todos = state.todos.toggle_completed(index, env.clock.now());
                }
            },

            TodoAction::BeginEdit { index } => {
                if Self::in_range(state, index, "begin_edit") {
                    state.todos = state.todos.begin_edit(index, env.edit_policy);
                }
            },

            TodoAction::CommitEdit { index, text } => {
                if Self::in_range(state, index, "commit_edit") {
                    if text.trim().is_empty() {
                        tracing::debug!(index, "Blank edit discarded");
                    }
                    state.todos = state.todos.commit_edit(index, &text);
                }
            },

            TodoAction::CancelEdit { index } => {
                if Self::in_range(state, index, "cancel_edit") {
                    state.todos = state.todos.cancel_edit(index);
                }
            },

            TodoAction::DeleteTodo { index } => {
                if Self::in_range(state, index, "delete") {
                    state.todos = state.todos.delete(index);
                }
            },

            TodoAction::ChangeFilter { mode } => {
                state.filter = mode;
            },

            TodoAction::ForItem { id, intent } => {
                // Resolved under the same lock as the transition it becomes
                if let Some(index) = state.index_of(id) {
                    return self.reduce(state, intent.at(index), env);
                }
                tracing::debug!(%id, "Ignoring intent: item no longer exists");
            },

            TodoAction::LoadSeed { records } => Self::load_seed(state, records, env),
        }

        // Pure state machine - no side effects
        SmallVec::new()
    }
}
