//! In-memory to-do list built on the tasklist reducer architecture.
//!
//! The list supports adding a task, toggling completion, filtering by
//! status, editing a title in place and deleting. It demonstrates:
//!
//! - Pure snapshot transitions over an ordered collection ([`TodoCollection`])
//! - A reducer that maps view intents onto those transitions ([`TodoReducer`])
//! - Row intents keyed by stable ids ([`TodoId`]), positions kept for ordering
//! - A view boundary that turns key presses and clicks into actions ([`ViewEvent`])
//! - Optional seed data loaded once at start-up ([`seed`])
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist::{Config, FilterMode, TodoAction, ViewModel};
//!
//! # async fn example() -> Result<(), tasklist::TodoError> {
//! let store = tasklist::open(&Config::default()).await?;
//!
//! store.send(TodoAction::SubmitNewTodo { text: "Buy milk".into() }).await?;
//! store.send(TodoAction::SubmitNewTodo { text: "Walk dog".into() }).await?;
//! store.send(TodoAction::Toggle { index: 0 }).await?;
//! store.send(TodoAction::ChangeFilter { mode: FilterMode::Remaining }).await?;
//!
//! let view = tasklist::view_model(&store).await;
//! assert_eq!(view.items.len(), 1);
//! assert_eq!(view.items[0].index, 1);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod collection;
pub mod config;
pub mod error;
pub mod reducer;
pub mod seed;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{TodoStore, dispatch, open, open_with, view_model};
pub use collection::TodoCollection;
pub use config::Config;
pub use error::TodoError;
pub use reducer::{ItemIntent, TodoAction, TodoEnvironment, TodoReducer, TodoState};
pub use seed::SeedRecord;
pub use types::{EditMode, EditPolicy, FilterMode, TodoId, TodoItem};
pub use view::{FilterOption, Key, ViewEvent, ViewModel, VisibleItem};
