//! Raw form payloads and their parsing.
//!
//! Inputs arrive as text exactly as the page posts them. Parsing turns them
//! into domain values or the first [`BoardError`] that applies.

use crate::calendar::parse_datetime_local;
use crate::email::is_valid_email;
use crate::error::{BoardError, BoardResult};
use crate::types::{Category, EventFields};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// The create-event and edit-event forms
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    /// Title input
    pub title: String,
    /// Description textarea
    pub description: String,
    /// `datetime-local` input
    pub date: String,
    /// Place input
    pub place: String,
    /// Category select value
    pub category: String,
    /// Capacity number input
    pub capacity: String,
    /// Creator address; empty means the configured default
    #[serde(default)]
    pub creator_email: String,
}

impl EventForm {
    /// Validate every field and build the event's editable fields.
    ///
    /// # Errors
    ///
    /// [`BoardError::MissingFields`] if any field is blank, the category is
    /// not one of the options or the capacity is not a positive integer.
    /// [`BoardError::InvalidDate`] if the date does not parse.
    pub fn parse(&self, offset: FixedOffset) -> BoardResult<EventFields> {
        let title = self.title.trim();
        let description = self.description.trim();
        let date = self.date.trim();
        let place = self.place.trim();

        if [title, description, date, place].iter().any(|field| field.is_empty()) {
            return Err(BoardError::MissingFields);
        }
        let category: Category = self.category.parse().map_err(|_| BoardError::MissingFields)?;
        let capacity = self
            .capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|capacity| *capacity >= 1)
            .ok_or(BoardError::MissingFields)?;
        let date = parse_datetime_local(date, offset).ok_or(BoardError::InvalidDate)?;

        Ok(EventFields {
            title: title.to_string(),
            description: description.to_string(),
            date,
            place: place.to_string(),
            category,
            capacity,
        })
    }
}

/// The create-user form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    /// Full name
    pub name: String,
    /// Institutional email
    pub email: String,
}

/// The registration sub-form of the detail modal
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Full name
    pub name: String,
    /// Email of an existing user
    pub email: String,
}

/// Check a `(name, email)` pair: both present, email institutional.
///
/// # Errors
///
/// [`BoardError::MissingIdentity`] or [`BoardError::InvalidEmail`].
pub fn validate_identity(name: &str, email: &str) -> BoardResult<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(BoardError::MissingIdentity);
    }
    if !is_valid_email(email.trim()) {
        return Err(BoardError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn form() -> EventForm {
        EventForm {
            title: "  Rust meetup ".to_string(),
            description: "Ownership for everyone".to_string(),
            date: "2025-06-01T18:00".to_string(),
            place: "Room B12".to_string(),
            category: "conférence".to_string(),
            capacity: "30".to_string(),
            creator_email: String::new(),
        }
    }

    #[test]
    fn parses_a_complete_form() {
        let fields = form().parse(utc()).unwrap();
        assert_eq!(fields.title, "Rust meetup");
        assert_eq!(fields.category, Category::Conference);
        assert_eq!(fields.capacity, 30);
        assert_eq!(fields.date, Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn blank_or_bad_fields_are_missing() {
        let blank_place = EventForm {
            place: "   ".to_string(),
            ..form()
        };
        assert_eq!(blank_place.parse(utc()), Err(BoardError::MissingFields));

        for capacity in ["0", "-3", "many", ""] {
            let bad = EventForm {
                capacity: capacity.to_string(),
                ..form()
            };
            assert_eq!(bad.parse(utc()), Err(BoardError::MissingFields), "capacity {capacity:?}");
        }

        let bad_category = EventForm {
            category: "concert".to_string(),
            ..form()
        };
        assert_eq!(bad_category.parse(utc()), Err(BoardError::MissingFields));
    }

    #[test]
    fn unparseable_date_is_invalid() {
        let bad = EventForm {
            date: "next friday".to_string(),
            ..form()
        };
        assert_eq!(bad.parse(utc()), Err(BoardError::InvalidDate));
    }

    #[test]
    fn date_past_the_calendar_limit_is_invalid() {
        let last_minute = EventForm {
            date: "+262142-12-31T23:59".to_string(),
            ..form()
        };
        let west = FixedOffset::west_opt(3600).unwrap();
        assert_eq!(last_minute.parse(west), Err(BoardError::InvalidDate));
        assert!(last_minute.parse(utc()).is_ok());
    }

    #[test]
    fn identity_checks_run_in_order() {
        assert_eq!(validate_identity("", "a@b.edu"), Err(BoardError::MissingIdentity));
        assert_eq!(validate_identity("Ada", " "), Err(BoardError::MissingIdentity));
        assert_eq!(validate_identity("Ada", "ada@gmail.com"), Err(BoardError::InvalidEmail));
        assert_eq!(validate_identity("Ada", " Ada@Univ.Edu "), Ok(()));
    }
}
