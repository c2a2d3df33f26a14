//! In-memory store for the three collections.
//!
//! Collections are append-only and keep insertion order, which is also the
//! display order. Every read is a query over the live vectors, so a read right
//! after a write always sees it.

use crate::email::normalize_email;
use crate::types::{Event, EventId, Registration, RegistrationId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record kind the repository stores
pub trait Record: Sized {
    /// Identifier type for this record kind
    type Id: Copy + PartialEq + std::fmt::Debug;

    /// This record's id
    fn record_id(&self) -> Self::Id;

    /// The collection holding this record kind
    fn collection(repository: &Repository) -> &[Self];

    /// Mutable access to the collection holding this record kind
    fn collection_mut(repository: &mut Repository) -> &mut Vec<Self>;
}

impl Record for Event {
    type Id = EventId;

    fn record_id(&self) -> EventId {
        self.id()
    }

    fn collection(repository: &Repository) -> &[Self] {
        &repository.events
    }

    fn collection_mut(repository: &mut Repository) -> &mut Vec<Self> {
        &mut repository.events
    }
}

impl Record for User {
    type Id = UserId;

    fn record_id(&self) -> UserId {
        self.id()
    }

    fn collection(repository: &Repository) -> &[Self] {
        &repository.users
    }

    fn collection_mut(repository: &mut Repository) -> &mut Vec<Self> {
        &mut repository.users
    }
}

impl Record for Registration {
    type Id = RegistrationId;

    fn record_id(&self) -> RegistrationId {
        self.id()
    }

    fn collection(repository: &Repository) -> &[Self] {
        &repository.registrations
    }

    fn collection_mut(repository: &mut Repository) -> &mut Vec<Self> {
        &mut repository.registrations
    }
}

/// Seat accounting for one event at one moment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Registrations currently recorded
    pub registered: usize,
    /// `capacity - registered`
    pub seats_left: i64,
    /// `seats_left <= 0`
    pub is_full: bool,
    /// `date < now`
    pub is_passed: bool,
}

/// Events, users and registrations for one page session
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Repository {
    events: Vec<Event>,
    users: Vec<User>,
    registrations: Vec<Registration>,
}

impl Repository {
    /// Creates an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its collection
    pub fn insert<T: Record>(&mut self, record: T) {
        T::collection_mut(self).push(record);
    }

    /// Look a record up by id
    #[must_use]
    pub fn find<T: Record>(&self, id: T::Id) -> Option<&T> {
        T::collection(self).iter().find(|record| record.record_id() == id)
    }

    /// All events in insertion order
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All users in insertion order
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All registrations in insertion order
    #[must_use]
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Event by id
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.find(id)
    }

    /// Event by id, for in-place edits
    pub fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|event| event.id() == id)
    }

    /// User by id
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.find(id)
    }

    /// User owning `email`, compared after normalisation
    #[must_use]
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.iter().find(|user| user.email == email)
    }

    /// Registrations for one event, in the order they were made
    pub fn registrations_for_event(&self, event_id: EventId) -> impl Iterator<Item = &Registration> {
        self.registrations
            .iter()
            .filter(move |registration| registration.event_id == event_id)
    }

    /// How many registrations an event has
    #[must_use]
    pub fn registration_count(&self, event_id: EventId) -> usize {
        self.registrations_for_event(event_id).count()
    }

    /// Whether `user_id` already holds a registration for `event_id`
    #[must_use]
    pub fn is_user_registered(&self, event_id: EventId, user_id: UserId) -> bool {
        self.registrations_for_event(event_id)
            .any(|registration| registration.user_id == user_id)
    }

    /// Seats left, fullness and passed status, computed fresh against `now`
    #[must_use]
    pub fn availability(&self, event: &Event, now: DateTime<Utc>) -> Availability {
        let registered = self.registration_count(event.id());
        let seats_left = i64::from(event.capacity) - i64::try_from(registered).unwrap_or(i64::MAX);
        Availability {
            registered,
            seats_left,
            is_full: seats_left <= 0,
            is_passed: event.is_passed(now),
        }
    }
}
