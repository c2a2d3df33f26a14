//! Rejections the board reports to the user.
//!
//! Every precondition of every workflow step has its own variant. The first
//! one that fails aborts the step before anything is mutated, and its
//! `Display` text becomes the error alert.

use thiserror::Error;

/// Why an interaction was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A required event field is empty, the category is unknown or the
    /// capacity is not a positive integer
    #[error("Please fill in every field correctly.")]
    MissingFields,

    /// The date field is present but not a date
    #[error("Invalid date.")]
    InvalidDate,

    /// Name or email left empty on a user or registration form
    #[error("Please provide a name and an email.")]
    MissingIdentity,

    /// Email is malformed or not on an institutional domain
    #[error("Invalid email. Use an institutional address (e.g. name@institution.edu).")]
    InvalidEmail,

    /// Another user already owns this email
    #[error("A user with this email already exists.")]
    EmailTaken,

    /// No event with this id; usually a stale reference from old markup
    #[error("Event not found.")]
    EventNotFound(String),

    /// Registration attempted after the event started
    #[error("Registration is closed: this event has already taken place.")]
    RegistrationClosed,

    /// Edit attempted after the event started
    #[error("A past event cannot be edited.")]
    EditLocked,

    /// Every seat is taken
    #[error("This event is full.")]
    EventFull,

    /// Registration with an email no user owns
    #[error("No user found with this email. Create an account first, then register.")]
    UnknownUser,

    /// The user already holds a seat at this event
    #[error("You are already registered for this event.")]
    AlreadyRegistered,

    /// New capacity would evict existing registrations
    #[error("Capacity too low: {registered} people are already registered.")]
    CapacityBelowRegistrations {
        /// Current registration count
        registered: usize,
    },
}

/// Result alias for board validation
pub type BoardResult<T> = Result<T, BoardError>;
