//! Transient UI state: active filter, modal and pending form reset.
//!
//! The modal is an explicit state machine. Every close goes through
//! [`UiSession::close_modal`], so no edit target outlives the modal.

use crate::filter::EventFilter;
use crate::types::EventId;
use serde::{Deserialize, Serialize};

/// What the modal currently shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Modal {
    /// Nothing; the catalog is being browsed
    #[default]
    Closed,
    /// An event's details, optionally with the registration sub-form
    Detail {
        /// Event shown
        event_id: EventId,
        /// Whether the registration sub-form is offered
        registration_form: bool,
    },
    /// The edit form of one event
    Edit {
        /// Event being edited
        event_id: EventId,
    },
}

impl Modal {
    /// Whether the modal is visible
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// `aria-hidden` of the modal element
    #[must_use]
    pub const fn aria_hidden(&self) -> bool {
        !self.is_open()
    }

    /// The event currently being edited, if any
    #[must_use]
    pub const fn editing(&self) -> Option<EventId> {
        match self {
            Self::Edit { event_id } => Some(*event_id),
            _ => None,
        }
    }

    /// The event whose registration sub-form is open, if any
    #[must_use]
    pub const fn registering(&self) -> Option<EventId> {
        match self {
            Self::Detail {
                event_id,
                registration_form: true,
            } => Some(*event_id),
            _ => None,
        }
    }
}

/// Which top-level form the shell should clear
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// The create-event form
    Event,
    /// The create-user form
    User,
}

/// UI state for one page session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSession {
    /// Active catalog filter
    pub filters: EventFilter,
    /// Modal state
    pub modal: Modal,
    /// Form to clear after the latest interaction
    pub form_reset: Option<FormKind>,
}

impl UiSession {
    /// Close the modal from whatever state it is in
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_modal_is_hidden_and_idle() {
        let modal = Modal::default();
        assert!(modal.aria_hidden());
        assert_eq!(modal.editing(), None);
        assert_eq!(modal.registering(), None);
    }

    #[test]
    fn close_clears_the_edit_target() {
        let event_id = EventId::new();
        let mut session = UiSession {
            modal: Modal::Edit { event_id },
            ..UiSession::default()
        };
        assert_eq!(session.modal.editing(), Some(event_id));
        assert!(!session.modal.aria_hidden());

        session.close_modal();
        assert_eq!(session.modal, Modal::Closed);
        assert_eq!(session.modal.editing(), None);
    }

    #[test]
    fn registration_only_from_detail_with_form() {
        let event_id = EventId::new();
        let plain = Modal::Detail {
            event_id,
            registration_form: false,
        };
        let with_form = Modal::Detail {
            event_id,
            registration_form: true,
        };
        assert_eq!(plain.registering(), None);
        assert_eq!(with_form.registering(), Some(event_id));
    }
}
