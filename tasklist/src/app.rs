//! Wiring: building a store from configuration and driving it from view events.

use crate::config::Config;
use crate::error::Result;
use crate::reducer::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
use crate::seed;
use crate::view::{ViewEvent, ViewModel};
use std::sync::Arc;
use tasklist_core::environment::{SystemClock, UuidGenerator};
use tasklist_runtime::Store;

/// The store a front end holds on to
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Builds a store with production dependencies
///
/// # Errors
///
/// Fails if seeding is enabled and the seed cannot be read or parsed.
pub async fn open(config: &Config) -> Result<TodoStore> {
    let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
        .with_edit_policy(config.edit_policy);
    open_with(config, env).await
}

/// Builds a store with the given environment, preloading seed data when
/// `config` asks for it
///
/// # Errors
///
/// Fails if seeding is enabled and the seed cannot be read or parsed.
pub async fn open_with(config: &Config, env: TodoEnvironment) -> Result<TodoStore> {
    let records = seed::load(config)?;
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    if !records.is_empty() {
        store.send(TodoAction::LoadSeed { records }).await?;
    }

    let items = store.state(TodoState::count).await;
    tracing::info!(
        items,
        edit_policy = ?config.edit_policy,
        "Todo store ready"
    );
    Ok(store)
}

/// Forwards a view event to the store
///
/// Events that map to no action (plain typing) are dropped. Row events
/// reach their item by id, so a row clicked after earlier rows were deleted
/// still hits the item it showed; a row whose item is gone does nothing.
///
/// # Errors
///
/// Returns [`crate::TodoError::InvalidArgument`] for a filter click naming no
/// filter, and [`crate::TodoError::Store`] if the store has shut down.
pub async fn dispatch(store: &TodoStore, event: ViewEvent) -> Result<()> {
    if let Some(action) = event.into_action()? {
        store.send(action).await?;
    }
    Ok(())
}

/// Derives what the view should currently draw
pub async fn view_model(store: &TodoStore) -> ViewModel {
    store.state(ViewModel::from_state).await
}
