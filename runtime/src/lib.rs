//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Version channel**: Notifies observers after every reduced action
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tasklist_core::{SmallVec, effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;
pub use store::Store;

/// Store module - the runtime coordinator
pub mod store {
    use super::{
        Arc, AtomicBool, Effect, Ordering, PhantomData, Reducer, RwLock, SmallVec, StoreError,
        VecDeque, watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; every action takes the write lock for the
    ///    duration of one reducer call)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap and yields a handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        /// Bumped once per reduced action so observers know when to re-read state.
        version: Arc<watch::Sender<u64>>,
        _action: PhantomData<fn() -> A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                version: Arc::clone(&self.version),
                _action: PhantomData,
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (version, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                version: Arc::new(version),
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the write lock, then executes the returned
        /// effects. Actions fed back by `Effect::Future` are queued and reduced
        /// in order before this call returns, so by the time `send` resolves
        /// the whole cascade has settled.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic will propagate to the caller.
        /// Reducers should be pure functions that do not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let mut pending = VecDeque::from([action]);
            while let Some(action) = pending.pop_front() {
                tracing::debug!("Processing action");
                metrics::counter!("store.actions.total").increment(1);

                let effects = self.reduce(action).await;
                self.execute_effects(effects, &mut pending).await;
            }

            tracing::debug!("Action processing completed");
            Ok(())
        }

        async fn reduce(&self, action: A) -> SmallVec<[Effect<A>; 4]> {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let effects = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };
            drop(state);

            self.version.send_modify(|version| *version += 1);
            effects
        }

        /// Execute effects in order. Actions produced by futures are appended
        /// to `pending` and reduced after the current effects finish.
        async fn execute_effects(
            &self,
            effects: SmallVec<[Effect<A>; 4]>,
            pending: &mut VecDeque<A>,
        ) {
            for effect in effects {
                match effect {
                    Effect::None => {
                        tracing::trace!("Executing Effect::None (no-op)");
                        metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                    },
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, queueing it");
                            pending.push_back(action);
                        }
                    },
                }
            }
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone out the whole current state
        pub async fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state(S::clone).await
        }

        /// Number of actions reduced so far
        #[must_use]
        pub fn version(&self) -> u64 {
            *self.version.borrow()
        }

        /// Subscribe to the version counter
        ///
        /// The receiver is marked changed after every reduced action, which is
        /// the signal for a view to re-derive what it renders.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.version.subscribe()
        }

        /// Stop accepting new actions
        ///
        /// Actions already inside `send` run to completion.
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shut down");
                metrics::counter!("store.shutdown.completed").increment(1);
            }
        }

        /// Whether `shutdown` has been called on this store or any clone of it
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use tasklist_core::smallvec;

    #[derive(Clone, Debug, Default)]
    struct TallyState {
        total: i64,
        log: Vec<&'static str>,
    }

    #[derive(Clone, Debug)]
    enum TallyAction {
        Add(i64),
        AddTwiceLater(i64),
        Steps,
        Note(&'static str),
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = TallyState;
        type Action = TallyAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut TallyState,
            action: TallyAction,
            _env: &(),
        ) -> SmallVec<[Effect<TallyAction>; 4]> {
            match action {
                TallyAction::Add(n) => {
                    state.total += n;
                    smallvec![Effect::None]
                },
                TallyAction::AddTwiceLater(n) => smallvec![
                    Effect::future(async move { Some(TallyAction::Add(n)) }),
                    Effect::future(async move { Some(TallyAction::Add(n)) }),
                ],
                TallyAction::Steps => smallvec![
                    Effect::future(async { Some(TallyAction::Note("first")) }),
                    Effect::None,
                    Effect::future(async { None }),
                    Effect::future(async { Some(TallyAction::Note("second")) }),
                ],
                TallyAction::Note(note) => {
                    state.log.push(note);
                    SmallVec::new()
                },
            }
        }
    }

    fn tally_store() -> Store<TallyState, TallyAction, (), TallyReducer> {
        Store::new(TallyState::default(), TallyReducer, ())
    }

    #[tokio::test]
    async fn test_send_updates_state() {
        let store = tally_store();

        store.send(TallyAction::Add(3)).await.unwrap();
        store.send(TallyAction::Add(-1)).await.unwrap();

        assert_eq!(store.state(|s| s.total).await, 2);
    }

    #[tokio::test]
    async fn test_future_feedback_settles_before_send_returns() {
        let store = tally_store();

        store.send(TallyAction::AddTwiceLater(5)).await.unwrap();

        assert_eq!(store.state(|s| s.total).await, 10);
        // The original action plus two fed-back actions
        assert_eq!(store.version(), 3);
    }

    #[tokio::test]
    async fn test_effects_run_in_order() {
        let store = tally_store();

        store.send(TallyAction::Steps).await.unwrap();

        assert_eq!(store.snapshot().await.log, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() {
        let store = tally_store();
        let handle = store.clone();

        store.shutdown();

        assert!(handle.is_shutting_down());
        assert_eq!(
            handle.send(TallyAction::Add(1)).await,
            Err(StoreError::ShutdownInProgress)
        );
        assert_eq!(store.state(|s| s.total).await, 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_every_reduction() {
        let store = tally_store();
        let mut rx = store.subscribe();

        store.send(TallyAction::Add(1)).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_sends_are_serialized() {
        let store = tally_store();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.send(TallyAction::Add(1)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.state(|s| s.total).await, 10);
        assert_eq!(store.version(), 10);
    }
}
