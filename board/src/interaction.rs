//! Delegated UI input.
//!
//! The shell listens once on the page root and forwards what happened as an
//! [`Interaction`], reading ids straight from `data-*` attributes. Ids are
//! therefore untrusted text; one that does not parse surfaces as an
//! "event not found" alert.

use crate::alerts::AlertId;
use crate::error::BoardError;
use crate::filter::FilterForm;
use crate::forms::{EventForm, RegistrationForm, UserForm};
use crate::reducer::BoardAction;
use crate::types::EventId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Card button, from its `data-action` attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    /// Open the detail modal
    Detail,
    /// Open the detail modal with the registration form
    Register,
    /// Open the edit form
    Edit,
}

impl FromStr for ButtonAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detail" => Ok(Self::Detail),
            "register" => Ok(Self::Register),
            "edit" => Ok(Self::Edit),
            other => Err(other.to_string()),
        }
    }
}

/// Something the user did on the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// Create-event form submitted
    SubmitEventForm(EventForm),
    /// Create-user form submitted
    SubmitUserForm(UserForm),
    /// Registration sub-form submitted
    SubmitRegistrationForm(RegistrationForm),
    /// Edit form submitted
    SubmitEditForm(EventForm),
    /// A filter control changed
    FiltersChanged(FilterForm),
    /// Reset-filters button
    ResetFilters,
    /// A card button
    Button {
        /// `data-action`
        action: String,
        /// `data-event-id`
        event_id: String,
    },
    /// Modal close button
    CloseButton,
    /// Click on the modal backdrop
    BackdropClick,
    /// Cancel button of the edit form
    CancelEdit,
    /// Close button of an alert
    DismissAlert {
        /// `data-alert-id`
        alert_id: String,
    },
}

impl Interaction {
    /// The reducer action for this interaction, or `None` if there is nothing to do
    #[must_use]
    pub fn into_action(self) -> Option<BoardAction> {
        let action = match self {
            Self::SubmitEventForm(form) => BoardAction::CreateEvent { form },
            Self::SubmitUserForm(form) => BoardAction::CreateUser { form },
            Self::SubmitRegistrationForm(form) => BoardAction::SubmitRegistration { form },
            Self::SubmitEditForm(form) => BoardAction::SubmitEdit { form },
            Self::FiltersChanged(form) => BoardAction::ChangeFilters { form },
            Self::ResetFilters => BoardAction::ResetFilters,
            Self::CloseButton | Self::BackdropClick | Self::CancelEdit => BoardAction::CloseModal,
            Self::Button { action, event_id } => {
                let button = match action.parse::<ButtonAction>() {
                    Ok(button) => button,
                    Err(unknown) => {
                        tracing::debug!(action = %unknown, "Ignoring unknown button action");
                        return None;
                    }
                };
                let Ok(event_id) = event_id.parse::<EventId>() else {
                    return Some(BoardAction::ValidationFailed {
                        error: BoardError::EventNotFound(event_id),
                    });
                };
                match button {
                    ButtonAction::Detail => BoardAction::OpenDetail {
                        event_id,
                        with_registration: false,
                    },
                    ButtonAction::Register => BoardAction::OpenDetail {
                        event_id,
                        with_registration: true,
                    },
                    ButtonAction::Edit => BoardAction::OpenEdit { event_id },
                }
            }
            Self::DismissAlert { alert_id } => match alert_id.parse::<AlertId>() {
                Ok(alert_id) => BoardAction::DismissAlert { alert_id },
                Err(error) => {
                    tracing::debug!(%alert_id, %error, "Ignoring malformed alert id");
                    return None;
                }
            },
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(action: &str, event_id: &str) -> Interaction {
        Interaction::Button {
            action: action.to_string(),
            event_id: event_id.to_string(),
        }
    }

    #[test]
    fn card_buttons_open_the_modal() {
        let event_id = EventId::new();
        let raw = event_id.to_string();
        assert_eq!(
            button("detail", &raw).into_action(),
            Some(BoardAction::OpenDetail {
                event_id,
                with_registration: false
            })
        );
        assert_eq!(
            button("register", &raw).into_action(),
            Some(BoardAction::OpenDetail {
                event_id,
                with_registration: true
            })
        );
        assert_eq!(button("edit", &raw).into_action(), Some(BoardAction::OpenEdit { event_id }));
    }

    #[test]
    fn stale_ids_become_not_found() {
        assert_eq!(
            button("detail", "evt-42").into_action(),
            Some(BoardAction::ValidationFailed {
                error: BoardError::EventNotFound("evt-42".to_string())
            })
        );
    }

    #[test]
    fn unknown_buttons_and_alert_ids_are_ignored() {
        assert_eq!(button("delete", &EventId::new().to_string()).into_action(), None);
        assert_eq!(
            Interaction::DismissAlert {
                alert_id: "x".to_string()
            }
            .into_action(),
            None
        );
    }

    #[test]
    fn every_close_path_closes_the_modal() {
        for interaction in [Interaction::CloseButton, Interaction::BackdropClick, Interaction::CancelEdit] {
            assert_eq!(interaction.into_action(), Some(BoardAction::CloseModal));
        }
    }

    #[test]
    fn interactions_deserialize_from_json() {
        let interaction: Interaction = serde_json::from_str(
            r#"{"type":"button","action":"register","event_id":"not-a-uuid"}"#,
        )
        .unwrap_or(Interaction::ResetFilters);
        assert_eq!(
            interaction,
            Interaction::Button {
                action: "register".to_string(),
                event_id: "not-a-uuid".to_string()
            }
        );

        let dismiss: Interaction =
            serde_json::from_str(r#"{"type":"dismiss_alert","alert_id":"3"}"#).unwrap_or(Interaction::ResetFilters);
        assert!(matches!(
            dismiss.into_action(),
            Some(BoardAction::DismissAlert { .. })
        ));
    }
}
