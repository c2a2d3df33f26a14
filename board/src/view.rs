//! View-models: what the renderer needs, computed from the state.
//!
//! Everything derived from the clock (passed, full, seats left) is
//! recomputed on every build. Text is carried raw; escaping belongs to the
//! renderer.

use crate::alerts::Alert;
use crate::calendar::{datetime_local_value, to_local};
use crate::filter::EventFilter;
use crate::reducer::BoardState;
use crate::repository::Repository;
use crate::session::{FormKind, Modal};
use crate::types::{Category, Event, EventId};
use chrono::{DateTime, FixedOffset, Locale, Utc};
use serde::Serialize;

/// How dates are shown
#[derive(Clone, Copy, Debug)]
pub struct DisplayContext {
    /// Wall-clock offset
    pub offset: FixedOffset,
    /// Locale of day and month names
    pub locale: Locale,
}

impl DisplayContext {
    /// Long human date, e.g. `Saturday 1 March 2025, 18:30`
    #[must_use]
    pub fn format_date(&self, instant: DateTime<Utc>) -> String {
        to_local(instant, self.offset)
            .format_localized("%A %-d %B %Y, %H:%M", self.locale)
            .to_string()
    }
}

/// `"{n} event"`, plural above one
#[must_use]
pub fn count_label(count: usize) -> String {
    format!("{count} event{}", if count > 1 { "s" } else { "" })
}

/// `"{s} seat left / {capacity}"`, plural above one
#[must_use]
pub fn seats_label(seats_left: i64, capacity: u32) -> String {
    format!("{seats_left} seat{} left / {capacity}", if seats_left > 1 { "s" } else { "" })
}

/// One card of the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventCard {
    /// Event id, carried on the card's buttons
    pub id: EventId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Place
    pub place: String,
    /// Category
    pub category: Category,
    /// Category label
    pub category_label: String,
    /// Human date
    pub date_label: String,
    /// Capacity
    pub capacity: u32,
    /// Registrations so far
    pub registered: usize,
    /// Capacity minus registrations
    pub seats_left: i64,
    /// Seat label
    pub seats_label: String,
    /// No seats left
    pub is_full: bool,
    /// Already started
    pub is_passed: bool,
    /// Whether the Edit button is shown
    pub can_edit: bool,
    /// Whether the Register button is enabled
    pub can_register: bool,
}

impl EventCard {
    /// Card for `event` as of `now`
    #[must_use]
    pub fn build(event: &Event, repository: &Repository, now: DateTime<Utc>, display: &DisplayContext) -> Self {
        let availability = repository.availability(event, now);
        Self {
            id: event.id(),
            title: event.title.clone(),
            description: event.description.clone(),
            place: event.place.clone(),
            category: event.category,
            category_label: event.category.label().to_string(),
            date_label: display.format_date(event.date),
            capacity: event.capacity,
            registered: availability.registered,
            seats_left: availability.seats_left,
            seats_label: seats_label(availability.seats_left, event.capacity),
            is_full: availability.is_full,
            is_passed: availability.is_passed,
            can_edit: !availability.is_passed,
            can_register: !availability.is_passed && !availability.is_full,
        }
    }
}

/// The catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventListView {
    /// `"3 events"`
    pub count_label: String,
    /// Shown instead of cards when nothing matches
    pub empty_message: Option<String>,
    /// Visible events, in insertion order
    pub cards: Vec<EventCard>,
}

impl EventListView {
    /// Catalog of the events passing `filter`
    #[must_use]
    pub fn build(
        repository: &Repository,
        filter: &EventFilter,
        now: DateTime<Utc>,
        display: &DisplayContext,
    ) -> Self {
        let cards: Vec<EventCard> = filter
            .apply(repository.events(), display.offset)
            .into_iter()
            .map(|event| EventCard::build(event, repository, now, display))
            .collect();
        Self {
            count_label: count_label(cards.len()),
            empty_message: cards.is_empty().then(|| "No events found.".to_string()),
            cards,
        }
    }
}

/// One registered person
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registrant {
    /// User name
    pub name: String,
    /// User email
    pub email: String,
}

/// The detail modal
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventDetailView {
    /// Same figures as the card
    pub card: EventCard,
    /// Who registered, in registration order
    pub registrants: Vec<Registrant>,
    /// Whether the registration sub-form is shown
    pub registration_form: bool,
}

impl EventDetailView {
    /// Detail of `event`. Registrations whose user is gone are skipped.
    #[must_use]
    pub fn build(
        event: &Event,
        repository: &Repository,
        registration_form: bool,
        now: DateTime<Utc>,
        display: &DisplayContext,
    ) -> Self {
        let registrants = repository
            .registrations_for_event(event.id())
            .filter_map(|registration| repository.user(registration.user_id))
            .map(|user| Registrant {
                name: user.name.clone(),
                email: user.email.clone(),
            })
            .collect();
        Self {
            card: EventCard::build(event, repository, now, display),
            registrants,
            registration_form,
        }
    }
}

/// The edit modal, pre-filled with the current values
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditFormView {
    /// Event being edited
    pub event_id: EventId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// `datetime-local` value
    pub date_value: String,
    /// Place
    pub place: String,
    /// Selected category
    pub category: Category,
    /// Capacity
    pub capacity: u32,
    /// Lowest capacity the form will accept
    pub min_capacity: usize,
}

impl EditFormView {
    /// Pre-filled form for `event`
    #[must_use]
    pub fn build(event: &Event, repository: &Repository, display: &DisplayContext) -> Self {
        Self {
            event_id: event.id(),
            title: event.title.clone(),
            description: event.description.clone(),
            date_value: datetime_local_value(event.date, display.offset),
            place: event.place.clone(),
            category: event.category,
            capacity: event.capacity,
            min_capacity: repository.registration_count(event.id()).max(1),
        }
    }
}

/// What the modal shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum ModalView {
    /// Hidden
    Closed,
    /// Event details
    Detail(EventDetailView),
    /// Edit form
    Edit(EditFormView),
}

impl ModalView {
    /// View of the modal state. A modal whose event is gone renders closed.
    #[must_use]
    pub fn build(modal: &Modal, repository: &Repository, now: DateTime<Utc>, display: &DisplayContext) -> Self {
        match *modal {
            Modal::Closed => Self::Closed,
            Modal::Detail {
                event_id,
                registration_form,
            } => repository.event(event_id).map_or(Self::Closed, |event| {
                Self::Detail(EventDetailView::build(event, repository, registration_form, now, display))
            }),
            Modal::Edit { event_id } => repository
                .event(event_id)
                .map_or(Self::Closed, |event| Self::Edit(EditFormView::build(event, repository, display))),
        }
    }
}

/// Everything on the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Catalog
    pub events: EventListView,
    /// Modal content
    pub modal: ModalView,
    /// `aria-hidden` of the modal element
    pub modal_hidden: bool,
    /// Alerts on screen
    pub alerts: Vec<Alert>,
    /// Active filter, to keep the controls in sync
    pub filters: EventFilter,
    /// Form the shell should clear
    pub form_reset: Option<FormKind>,
}

impl PageView {
    /// Build the whole page as of `now`
    #[must_use]
    pub fn build(state: &BoardState, now: DateTime<Utc>, display: &DisplayContext) -> Self {
        let modal = ModalView::build(&state.session.modal, &state.repository, now, display);
        Self {
            events: EventListView::build(&state.repository, &state.session.filters, now, display),
            modal_hidden: matches!(modal, ModalView::Closed),
            modal,
            alerts: state.alerts.active().to_vec(),
            filters: state.session.filters,
            form_reset: state.session.form_reset,
        }
    }
}
