//! The store: owns the state, serialises actions through the reducer and
//! executes the effects the reducer describes.
//!
//! Every `send` takes the state's write lock for the whole reduction, so one
//! action always runs to completion before the next one is looked at.

use crate::effect::Effect;
use crate::reducer::Reducer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Error types for the store
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store was shut down and no longer accepts actions.
        ///
        /// Delayed actions that fire after shutdown hit this and are dropped.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Callback invoked with the new state after every reduction.
pub type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Decrements the pending-effect counter when a delayed task ends, however it ends.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runtime for a single reducer.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(BoardState::default(), BoardReducer::new(), env);
/// store.subscribe(Arc::new(|state: &BoardState| render(state))).await;
/// store.send(BoardAction::ResetFilters).await?;
/// let count = store.state(|s| s.repository.events().len()).await;
/// ```
pub struct Store<R>
where
    R: Reducer,
{
    state: Arc<RwLock<R::State>>,
    reducer: Arc<R>,
    environment: Arc<R::Environment>,
    observers: Arc<RwLock<Vec<Observer<R::State>>>>,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
}

impl<R> Store<R>
where
    R: Reducer + Send + Sync + 'static,
    R::State: Send + Sync + 'static,
    R::Action: Send + 'static,
    R::Environment: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            observers: Arc::new(RwLock::new(Vec::new())),
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Register an observer. It is called immediately with the current state
    /// and then after every reduction, while the state lock is still held.
    pub async fn subscribe(&self, observer: Observer<R::State>) {
        let state = self.state.read().await;
        observer(&state);
        self.observers.write().await.push(observer);
    }

    /// Run `action` through the reducer, notify observers, then execute the
    /// returned effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store has been shut down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: R::Action) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("Processing action");

        let effects = {
            let mut state = self.state.write().await;

            let effects = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer.reduce(&mut state, action, &self.environment)
            };
            tracing::trace!("Reducer completed, returned {} effects", effects.len());

            for observer in self.observers.read().await.iter() {
                observer(&state);
            }

            effects
        };

        for effect in effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    /// Read current state via a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Re-run every observer against the current state without an action.
    ///
    /// Used when derived values change with time alone.
    pub async fn notify(&self) {
        let state = self.state.read().await;
        for observer in self.observers.read().await.iter() {
            observer(&state);
        }
    }

    /// Stop accepting actions. Delays already scheduled will be dropped when
    /// they fire.
    pub fn shutdown(&self) {
        tracing::info!("Store shutting down");
        self.shutdown.store(true, Ordering::Release);
    }

    /// Number of delayed effects that have not fired yet
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::SeqCst)
    }

    fn execute_effect(&self, effect: Effect<R::Action>) {
        match effect {
            Effect::None => {},
            Effect::Batch(effects) => {
                tracing::trace!("Executing Effect::Batch with {} effects", effects.len());
                for effect in effects {
                    self.execute_effect(effect);
                }
            },
            Effect::Delay { duration, action } => {
                tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let guard = PendingGuard(Arc::clone(&self.pending_effects));
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    tokio::time::sleep(duration).await;
                    tracing::trace!("Effect::Delay completed, sending action");

                    if let Err(error) = store.send(*action).await {
                        tracing::trace!(%error, "Delayed action dropped");
                    }
                });
            },
        }
    }
}

impl<R> Clone for Store<R>
where
    R: Reducer,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            observers: Arc::clone(&self.observers),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
        }
    }
}
