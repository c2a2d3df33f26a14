//! The application shell: a store plus a renderer.
//!
//! An observer on the store rebuilds the page view and its markup after
//! every reduction, so callers only ever read the latest [`Screen`].

use crate::interaction::Interaction;
use crate::reducer::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
use crate::render::{HtmlRenderer, RenderedPage, Renderer};
use crate::repository::Repository;
use crate::view::{DisplayContext, PageView};
use event_board_core::store::{Store, StoreError};
use std::sync::{Arc, Mutex, PoisonError};

/// The latest render
#[derive(Clone, Debug)]
pub struct Screen {
    /// View-models
    pub view: PageView,
    /// Markup produced from them
    pub markup: RenderedPage,
}

/// A running event board
#[derive(Clone)]
pub struct BoardApp {
    store: Store<BoardReducer>,
    screen: Arc<Mutex<Option<Screen>>>,
}

impl BoardApp {
    /// Start a board over `repository`, rendering HTML
    pub async fn new(repository: Repository, env: BoardEnvironment) -> Self {
        Self::with_renderer(repository, env, Arc::new(HtmlRenderer::new())).await
    }

    /// Start a board over `repository` with a custom renderer
    pub async fn with_renderer(repository: Repository, env: BoardEnvironment, renderer: Arc<dyn Renderer>) -> Self {
        let display = DisplayContext {
            offset: env.offset(),
            locale: env.config.locale(),
        };
        let clock = Arc::clone(&env.clock);
        let store = Store::new(BoardState::with_repository(repository), BoardReducer::new(), env);
        let screen = Arc::new(Mutex::new(None));

        let target = Arc::clone(&screen);
        store
            .subscribe(Arc::new(move |state: &BoardState| {
                let view = PageView::build(state, clock.now(), &display);
                let markup = renderer.render(&view);
                tracing::trace!(events = view.events.cards.len(), "Page rendered");
                *target.lock().unwrap_or_else(PoisonError::into_inner) = Some(Screen { view, markup });
            }))
            .await;

        Self { store, screen }
    }

    /// Forward a page interaction
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store has been shut down.
    pub async fn dispatch(&self, interaction: Interaction) -> Result<(), StoreError> {
        match interaction.into_action() {
            Some(action) => self.store.send(action).await,
            None => Ok(()),
        }
    }

    /// Send an action directly
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store has been shut down.
    pub async fn send(&self, action: BoardAction) -> Result<(), StoreError> {
        self.store.send(action).await
    }

    /// Re-render without an action, e.g. on a timer so events flip to passed
    pub async fn refresh(&self) {
        self.store.notify().await;
    }

    /// Latest render
    #[must_use]
    pub fn screen(&self) -> Option<Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Latest page view
    #[must_use]
    pub fn page(&self) -> Option<PageView> {
        self.screen().map(|screen| screen.view)
    }

    /// Read the state
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&BoardState) -> T,
    {
        self.store.state(f).await
    }

    /// Delayed alert dismissals not yet fired
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.store.pending_effects()
    }

    /// Stop accepting interactions
    pub fn shutdown(&self) {
        self.store.shutdown();
    }
}
