//! # Event Board Core
//!
//! The small functional core the event board is built on.
//!
//! - **State**: everything the page knows (collections plus UI session)
//! - **Action**: every input to a reducer, commands from the UI and the
//!   internal events a command turns into
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of deferred work, executed by the [`store::Store`]
//! - **Environment**: injected dependencies such as the [`environment::Clock`]
//!
//! Reducers never sleep, never read the wall clock directly and never render.
//! The store runs them one action at a time and hands the resulting state to
//! its observers, which is where rendering happens.
//!
//! ## Example
//!
//! ```ignore
//! impl Reducer for BoardReducer {
//!     type State = BoardState;
//!     type Action = BoardAction;
//!     type Environment = BoardEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BoardState,
//!         action: BoardAction,
//!         env: &BoardEnvironment,
//!     ) -> SmallVec<[Effect<BoardAction>; 4]> {
//!         // Validation and state changes go here
//!         SmallVec::new()
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Store runtime: runs reducers and executes their effects
pub mod store;

/// Reducer module - the trait every feature's business logic implements
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// Effects returned from a single reduction.
    ///
    /// Almost every action yields zero or one effect, so the inline capacity
    /// keeps the common path allocation free.
    pub type Effects<Action> = SmallVec<[Effect<Action>; 4]>;

    /// Business logic as a function of state, action and environment.
    ///
    /// Implementations validate the action, mutate `state` in place and
    /// describe any deferred work as [`Effect`]s. A rejected action must leave
    /// the domain data untouched.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect module - descriptions of work the store performs after a reduction
pub mod effect {
    use std::time::Duration;

    /// A side effect to be executed by the store.
    ///
    /// Effects are values. Returning one from a reducer does nothing until the
    /// [`Store`](crate::store::Store) executes it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Several effects, executed in order
        Batch(Vec<Effect<Action>>),

        /// Feed `action` back into the store once `duration` has elapsed.
        ///
        /// Fire-and-forget: there is no way to cancel a pending delay, so the
        /// delayed action has to tolerate the state having moved on.
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },
    }

    impl<Action> Effect<Action> {
        /// Schedule `action` after `duration`
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Self {
            Self::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Whether this effect (or any nested one) is a delay
        #[must_use]
        pub fn is_delay(&self) -> bool {
            match self {
                Self::None => false,
                Self::Batch(effects) => effects.iter().any(Self::is_delay),
                Self::Delay { .. } => true,
            }
        }
    }
}

/// Environment module - dependency injection traits
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts "now" so time-dependent rules stay testable
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
