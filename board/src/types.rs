//! Domain types for the event board.
//!
//! Three record kinds live on the board: [`Event`]s created by administrators,
//! [`User`]s created by attendees, and [`Registration`]s binding one user to
//! one event. Records refer to each other by id only.
//!
//! The constructors here are plain data factories: they assign a fresh id and
//! normalise text, but they never validate. Validation belongs to the reducer,
//! which runs it before anything is constructed.

use crate::email::normalize_email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Creator address stamped on events created without one
pub const DEFAULT_CREATOR_EMAIL: &str = "admin@pythagoras.local";

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

record_id! {
    /// Unique identifier for an event
    EventId
}

record_id! {
    /// Unique identifier for a user
    UserId
}

record_id! {
    /// Unique identifier for a registration
    RegistrationId
}

// ============================================================================
// Category
// ============================================================================

/// What kind of happening an event is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Talks, keynotes, panels
    Conference,
    /// Matches, runs, tournaments
    Sport,
    /// Hands-on sessions
    Workshop,
    /// Anything else
    Other,
}

impl Category {
    /// All categories, in the order the UI lists them
    pub const ALL: [Self; 4] = [Self::Conference, Self::Sport, Self::Workshop, Self::Other];

    /// Stable machine value, used in form options and CSS classes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conference => "conference",
            Self::Sport => "sport",
            Self::Workshop => "workshop",
            Self::Other => "other",
        }
    }

    /// Human label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Sport => "Sport",
            Self::Workshop => "Workshop",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a form value names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the English values and the French ones older forms still post.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conference" | "conférence" => Ok(Self::Conference),
            "sport" => Ok(Self::Sport),
            "workshop" | "atelier" => Ok(Self::Workshop),
            "other" | "autre" => Ok(Self::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// The editable part of an event, already parsed and validated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    /// Event title
    pub title: String,
    /// Free text description
    pub description: String,
    /// When it happens
    pub date: DateTime<Utc>,
    /// Where it happens
    pub place: String,
    /// Kind of event
    pub category: Category,
    /// Maximum number of registrations, at least 1
    pub capacity: u32,
}

/// A schedulable happening
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    /// Event title
    pub title: String,
    /// Free text description
    pub description: String,
    /// When it happens
    pub date: DateTime<Utc>,
    /// Where it happens
    pub place: String,
    /// Kind of event
    pub category: Category,
    /// Maximum number of registrations
    pub capacity: u32,
    /// Lower-cased address of whoever created the event
    pub creator_email: String,
}

impl Event {
    /// Creates an event with a fresh id.
    ///
    /// A missing or blank `creator_email` becomes [`DEFAULT_CREATOR_EMAIL`].
    #[must_use]
    pub fn new(fields: EventFields, creator_email: Option<&str>) -> Self {
        let creator_email = creator_email
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| DEFAULT_CREATOR_EMAIL.to_string());

        let mut event = Self {
            id: EventId::new(),
            title: String::new(),
            description: String::new(),
            date: fields.date,
            place: String::new(),
            category: fields.category,
            capacity: fields.capacity,
            creator_email,
        };
        event.apply(fields);
        event
    }

    /// The event's id; fixed for its whole life
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Overwrite every editable field
    pub fn apply(&mut self, fields: EventFields) {
        self.title = fields.title.trim().to_string();
        self.description = fields.description.trim().to_string();
        self.date = fields.date;
        self.place = fields.place.trim().to_string();
        self.category = fields.category;
        self.capacity = fields.capacity;
    }

    /// Whether the event started strictly before `now`.
    ///
    /// Never cached: callers pass the current time on every query.
    #[must_use]
    pub fn is_passed(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    /// Snapshot of the editable fields
    #[must_use]
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            place: self.place.clone(),
            category: self.category,
            capacity: self.capacity,
        }
    }
}

/// Someone who can register for events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    /// Display name
    pub name: String,
    /// Normalised institutional address, unique across users
    pub email: String,
}

impl User {
    /// Creates a user with a fresh id, trimming the name and normalising the email
    #[must_use]
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: UserId::new(),
            name: name.trim().to_string(),
            email: normalize_email(email),
        }
    }

    /// The user's id
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }
}

/// One user booked on one event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    id: RegistrationId,
    /// Event booked
    pub event_id: EventId,
    /// Who booked it
    pub user_id: UserId,
    /// When the booking was made
    pub timestamp: DateTime<Utc>,
}

impl Registration {
    /// Creates a registration with a fresh id
    #[must_use]
    pub fn new(event_id: EventId, user_id: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            user_id,
            timestamp,
        }
    }

    /// The registration's id
    #[must_use]
    pub const fn id(&self) -> RegistrationId {
        self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields() -> EventFields {
        EventFields {
            title: "  Rust meetup ".to_string(),
            description: " Talks ".to_string(),
            date: Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap(),
            place: " Room 101 ".to_string(),
            category: Category::Conference,
            capacity: 30,
        }
    }

    #[test]
    fn event_factory_trims_and_defaults_creator() {
        let event = Event::new(fields(), None);
        assert_eq!(event.title, "Rust meetup");
        assert_eq!(event.description, "Talks");
        assert_eq!(event.place, "Room 101");
        assert_eq!(event.creator_email, DEFAULT_CREATOR_EMAIL);

        let blank = Event::new(fields(), Some("   "));
        assert_eq!(blank.creator_email, DEFAULT_CREATOR_EMAIL);

        let owned = Event::new(fields(), Some(" Dean@Campus.EDU "));
        assert_eq!(owned.creator_email, "dean@campus.edu");
    }

    #[test]
    fn event_ids_are_unique() {
        assert_ne!(Event::new(fields(), None).id(), Event::new(fields(), None).id());
    }

    #[test]
    fn apply_keeps_id() {
        let mut event = Event::new(fields(), None);
        let id = event.id();
        let mut changed = fields();
        changed.title = "Renamed".to_string();
        changed.capacity = 50;
        event.apply(changed);
        assert_eq!(event.id(), id);
        assert_eq!(event.title, "Renamed");
        assert_eq!(event.capacity, 50);
    }

    #[test]
    fn is_passed_is_strict() {
        let event = Event::new(fields(), None);
        assert!(!event.is_passed(event.date));
        assert!(event.is_passed(event.date + chrono::Duration::milliseconds(1)));
        assert!(!event.is_passed(event.date - chrono::Duration::days(1)));
    }

    #[test]
    fn user_factory_normalises_email() {
        let user = User::new(" Ada ", "  Ada@Uni.EDU ");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@uni.edu");
    }

    #[test]
    fn category_parses_english_and_french_values() {
        assert_eq!("conference".parse::<Category>().unwrap(), Category::Conference);
        assert_eq!("Conférence".parse::<Category>().unwrap(), Category::Conference);
        assert_eq!("atelier".parse::<Category>().unwrap(), Category::Workshop);
        assert_eq!("autre".parse::<Category>().unwrap(), Category::Other);
        assert_eq!(" sport ".parse::<Category>().unwrap(), Category::Sport);
        assert!("concert".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn event_id_round_trips_through_text() {
        let id = EventId::new();
        assert_eq!(id.to_string().parse::<EventId>().unwrap(), id);
        assert!("not-an-id".parse::<EventId>().is_err());
    }
}
