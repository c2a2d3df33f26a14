//! Reducer for the event board.
//!
//! Every interaction arrives as a command. The reducer checks the command's
//! preconditions in order, turns it into an event action on success (or
//! `ValidationFailed` on the first violated precondition) and applies that.
//! Rejections never touch the repository.
//!
//! Each applied event raises an alert, and each alert comes with a delayed
//! `DismissAlert` effect.

use crate::alerts::{AlertCenter, AlertId, AlertKind};
use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::filter::{EventFilter, FilterForm};
use crate::forms::{EventForm, RegistrationForm, UserForm, validate_identity};
use crate::repository::Repository;
use crate::session::{FormKind, Modal, UiSession};
use crate::types::{Event, EventFields, EventId, Registration, User};
use chrono::{DateTime, FixedOffset, Utc};
use event_board_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Effects, reducer::Reducer, smallvec,
};
use std::sync::Arc;

// ============================================================================
// State
// ============================================================================

/// Everything the page knows
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    /// Events, users and registrations
    pub repository: Repository,
    /// Filters, modal and pending form reset
    pub session: UiSession,
    /// Notifications on screen
    pub alerts: AlertCenter,
    /// The most recent rejection, cleared by the next accepted mutation
    pub last_error: Option<BoardError>,
}

impl BoardState {
    /// Empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board over an existing repository, with a fresh UI session
    #[must_use]
    pub fn with_repository(repository: Repository) -> Self {
        Self {
            repository,
            ..Self::default()
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Commands from the page and the events they turn into
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardAction {
    // Commands
    /// Submit the create-event form
    CreateEvent {
        /// Raw form values
        form: EventForm,
    },
    /// Submit the create-user form
    CreateUser {
        /// Raw form values
        form: UserForm,
    },
    /// Any filter control changed
    ChangeFilters {
        /// Raw control values
        form: FilterForm,
    },
    /// Clear every filter
    ResetFilters,
    /// Show an event's details, optionally offering the registration form
    OpenDetail {
        /// Event to show
        event_id: EventId,
        /// Whether the registration sub-form was requested
        with_registration: bool,
    },
    /// Open the edit form of an event
    OpenEdit {
        /// Event to edit
        event_id: EventId,
    },
    /// Submit the registration sub-form of the open detail modal
    SubmitRegistration {
        /// Raw form values
        form: RegistrationForm,
    },
    /// Submit the open edit form
    SubmitEdit {
        /// Raw form values
        form: EventForm,
    },
    /// Close button, backdrop click or cancel
    CloseModal,
    /// Remove an alert (manual close or expiry)
    DismissAlert {
        /// Alert to remove
        alert_id: AlertId,
    },

    // Events
    /// An event was validated and added
    EventCreated {
        /// The new event
        event: Event,
    },
    /// A user was validated and added
    UserCreated {
        /// The new user
        user: User,
    },
    /// A registration was validated and added
    RegistrationRecorded {
        /// The new registration
        registration: Registration,
        /// Name typed on the form, for the welcome message
        name: String,
    },
    /// An event's fields were validated and replaced
    EventEdited {
        /// Event changed
        event_id: EventId,
        /// Its new fields
        fields: EventFields,
    },
    /// A command was rejected
    ValidationFailed {
        /// First violated precondition
        error: BoardError,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Dependencies of the board reducer
#[derive(Clone)]
pub struct BoardEnvironment {
    /// Source of "now" for passed checks and timestamps
    pub clock: Arc<dyn Clock>,
    /// Board configuration
    pub config: BoardConfig,
}

impl BoardEnvironment {
    /// Creates a new `BoardEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: BoardConfig) -> Self {
        Self { clock, config }
    }

    /// Current time
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Offset form values and day bounds are read in
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.config.offset()
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the event board
#[derive(Clone, Debug, Default)]
pub struct BoardReducer;

impl BoardReducer {
    /// Creates a new `BoardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_create_event(form: &EventForm, env: &BoardEnvironment) -> BoardResult<Event> {
        let fields = form.parse(env.offset())?;
        let creator = match form.creator_email.trim() {
            "" => env.config.default_creator_email.as_str(),
            email => email,
        };
        Ok(Event::new(fields, Some(creator)))
    }

    fn validate_create_user(repository: &Repository, form: &UserForm) -> BoardResult<User> {
        validate_identity(&form.name, &form.email)?;
        if repository.find_user_by_email(&form.email).is_some() {
            return Err(BoardError::EmailTaken);
        }
        Ok(User::new(&form.name, &form.email))
    }

    fn validate_open_edit(repository: &Repository, event_id: EventId, now: DateTime<Utc>) -> BoardResult<()> {
        let event = repository
            .event(event_id)
            .ok_or_else(|| BoardError::EventNotFound(event_id.to_string()))?;
        if event.is_passed(now) {
            return Err(BoardError::EditLocked);
        }
        Ok(())
    }

    fn validate_registration(
        repository: &Repository,
        event_id: EventId,
        form: &RegistrationForm,
        now: DateTime<Utc>,
    ) -> BoardResult<Registration> {
        validate_identity(&form.name, &form.email)?;

        let event = repository
            .event(event_id)
            .ok_or_else(|| BoardError::EventNotFound(event_id.to_string()))?;
        let availability = repository.availability(event, now);
        if availability.is_passed {
            return Err(BoardError::RegistrationClosed);
        }
        if availability.is_full {
            return Err(BoardError::EventFull);
        }

        let user = repository
            .find_user_by_email(&form.email)
            .ok_or(BoardError::UnknownUser)?;
        if repository.is_user_registered(event_id, user.id()) {
            return Err(BoardError::AlreadyRegistered);
        }

        Ok(Registration::new(event_id, user.id(), now))
    }

    fn validate_edit(
        repository: &Repository,
        event_id: EventId,
        form: &EventForm,
        env: &BoardEnvironment,
    ) -> BoardResult<EventFields> {
        let event = repository
            .event(event_id)
            .ok_or_else(|| BoardError::EventNotFound(event_id.to_string()))?;
        if event.is_passed(env.now()) {
            return Err(BoardError::EditLocked);
        }

        let fields = form.parse(env.offset())?;
        let registered = repository.registration_count(event_id);
        if usize::try_from(fields.capacity).unwrap_or(usize::MAX) < registered {
            return Err(BoardError::CapacityBelowRegistrations { registered });
        }
        Ok(fields)
    }

    /// Applies an event action to state and returns the alert it raised
    fn apply_event(state: &mut BoardState, action: BoardAction, now: DateTime<Utc>) -> Option<AlertId> {
        let (kind, message) = match action {
            BoardAction::EventCreated { event } => {
                tracing::info!(event_id = %event.id(), title = %event.title, "Event created");
                let message = format!("Event \"{}\" created.", event.title);
                state.repository.insert(event);
                state.session.form_reset = Some(FormKind::Event);
                state.last_error = None;
                (AlertKind::Success, message)
            }
            BoardAction::UserCreated { user } => {
                tracing::info!(user_id = %user.id(), email = %user.email, "User created");
                let message = format!("User \"{}\" registered.", user.name);
                state.repository.insert(user);
                state.session.form_reset = Some(FormKind::User);
                state.last_error = None;
                (AlertKind::Success, message)
            }
            BoardAction::RegistrationRecorded { registration, name } => {
                tracing::info!(
                    event_id = %registration.event_id,
                    user_id = %registration.user_id,
                    "Registration recorded"
                );
                state.repository.insert(registration);
                state.session.close_modal();
                state.last_error = None;
                (AlertKind::Success, format!("Registration confirmed! Welcome {name}."))
            }
            BoardAction::EventEdited { event_id, fields } => {
                if let Some(event) = state.repository.event_mut(event_id) {
                    event.apply(fields);
                    tracing::info!(%event_id, "Event edited");
                }
                state.session.close_modal();
                state.last_error = None;
                (AlertKind::Success, "Event updated.".to_string())
            }
            BoardAction::ValidationFailed { error } => {
                tracing::warn!(%error, "Interaction rejected");
                let message = error.to_string();
                state.last_error = Some(error);
                (AlertKind::Error, message)
            }
            // Commands are not applied to state
            BoardAction::CreateEvent { .. }
            | BoardAction::CreateUser { .. }
            | BoardAction::ChangeFilters { .. }
            | BoardAction::ResetFilters
            | BoardAction::OpenDetail { .. }
            | BoardAction::OpenEdit { .. }
            | BoardAction::SubmitRegistration { .. }
            | BoardAction::SubmitEdit { .. }
            | BoardAction::CloseModal
            | BoardAction::DismissAlert { .. } => return None,
        };
        Some(state.alerts.push(kind, message, now))
    }

    /// Raise an alert outside the event flow
    fn notify(
        state: &mut BoardState,
        kind: AlertKind,
        message: &str,
        env: &BoardEnvironment,
    ) -> Effects<BoardAction> {
        let alert_id = state.alerts.push(kind, message, env.now());
        Self::expire(alert_id, env)
    }

    /// Apply `event` and schedule the expiry of its alert
    fn commit(state: &mut BoardState, event: BoardAction, env: &BoardEnvironment) -> Effects<BoardAction> {
        match Self::apply_event(state, event, env.now()) {
            Some(alert_id) => Self::expire(alert_id, env),
            None => SmallVec::new(),
        }
    }

    fn reject(state: &mut BoardState, error: BoardError, env: &BoardEnvironment) -> Effects<BoardAction> {
        Self::commit(state, BoardAction::ValidationFailed { error }, env)
    }

    fn settle<T>(
        state: &mut BoardState,
        result: BoardResult<T>,
        to_event: impl FnOnce(T) -> BoardAction,
        env: &BoardEnvironment,
    ) -> Effects<BoardAction> {
        match result {
            Ok(value) => Self::commit(state, to_event(value), env),
            Err(error) => Self::reject(state, error, env),
        }
    }

    fn expire(alert_id: AlertId, env: &BoardEnvironment) -> Effects<BoardAction> {
        smallvec![Effect::delay(
            env.config.alert_ttl(),
            BoardAction::DismissAlert { alert_id }
        )]
    }
}

impl Reducer for BoardReducer {
    type State = BoardState;
    type Action = BoardAction;
    type Environment = BoardEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per interaction
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        state.session.form_reset = None;

        match action {
            // ========== Commands ==========
            BoardAction::CreateEvent { form } => {
                let result = Self::validate_create_event(&form, env);
                Self::settle(state, result, |event| BoardAction::EventCreated { event }, env)
            }

            BoardAction::CreateUser { form } => {
                let result = Self::validate_create_user(&state.repository, &form);
                Self::settle(state, result, |user| BoardAction::UserCreated { user }, env)
            }

            BoardAction::ChangeFilters { form } => {
                state.session.filters = EventFilter::from_form(&form);
                tracing::debug!(filters = ?state.session.filters, "Filters changed");
                SmallVec::new()
            }

            BoardAction::ResetFilters => {
                state.session.filters = EventFilter::all();
                Self::notify(state, AlertKind::Info, "Filters cleared.", env)
            }

            BoardAction::OpenDetail {
                event_id,
                with_registration,
            } => {
                let Some(event) = state.repository.event(event_id) else {
                    return Self::reject(state, BoardError::EventNotFound(event_id.to_string()), env);
                };
                let availability = state.repository.availability(event, env.now());
                let registration_form = with_registration && !availability.is_passed && !availability.is_full;
                state.session.modal = Modal::Detail {
                    event_id,
                    registration_form,
                };
                if with_registration && !registration_form {
                    let error = if availability.is_passed {
                        BoardError::RegistrationClosed
                    } else {
                        BoardError::EventFull
                    };
                    return Self::reject(state, error, env);
                }
                SmallVec::new()
            }

            BoardAction::OpenEdit { event_id } => {
                if state.session.modal.is_open() {
                    tracing::debug!(%event_id, modal = ?state.session.modal, "Edit ignored while the modal is open");
                    return SmallVec::new();
                }
                if let Err(error) = Self::validate_open_edit(&state.repository, event_id, env.now()) {
                    return Self::reject(state, error, env);
                }
                state.session.modal = Modal::Edit { event_id };
                SmallVec::new()
            }

            BoardAction::SubmitRegistration { form } => {
                let Some(event_id) = state.session.modal.registering() else {
                    tracing::debug!("Registration submitted without an open registration form");
                    return SmallVec::new();
                };
                let result = Self::validate_registration(&state.repository, event_id, &form, env.now());
                let name = form.name.trim().to_string();
                Self::settle(
                    state,
                    result,
                    |registration| BoardAction::RegistrationRecorded { registration, name },
                    env,
                )
            }

            BoardAction::SubmitEdit { form } => {
                let Some(event_id) = state.session.modal.editing() else {
                    tracing::debug!("Edit submitted without an active edit");
                    return SmallVec::new();
                };
                let result = Self::validate_edit(&state.repository, event_id, &form, env);
                Self::settle(state, result, |fields| BoardAction::EventEdited { event_id, fields }, env)
            }

            BoardAction::CloseModal => {
                state.session.close_modal();
                SmallVec::new()
            }

            BoardAction::DismissAlert { alert_id } => {
                if !state.alerts.dismiss(alert_id) {
                    tracing::trace!(%alert_id, "Alert already dismissed");
                }
                SmallVec::new()
            }

            // ========== Events ==========
            BoardAction::EventCreated { .. }
            | BoardAction::UserCreated { .. }
            | BoardAction::RegistrationRecorded { .. }
            | BoardAction::EventEdited { .. }
            | BoardAction::ValidationFailed { .. } => Self::commit(state, action, env),
        }
    }
}
