//! Transient notifications.
//!
//! Alerts are pushed by the reducer and removed either by the user or by a
//! delayed `DismissAlert` the reducer schedules alongside each push. The two
//! paths race freely, so removal of an id that is already gone is a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an alert
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Something was done
    Success,
    /// Something was refused
    Error,
    /// Neutral
    Info,
}

impl AlertKind {
    /// CSS-friendly name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Identifier of one alert, unique for the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlertId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A message on screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Identifier used for dismissal
    pub id: AlertId,
    /// Severity
    pub kind: AlertKind,
    /// Text shown to the user
    pub message: String,
    /// When it appeared
    pub raised_at: DateTime<Utc>,
}

/// The alerts currently shown, oldest first
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AlertCenter {
    next_id: u64,
    alerts: Vec<Alert>,
}

impl AlertCenter {
    /// Show a new alert and return its id
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>, now: DateTime<Utc>) -> AlertId {
        let id = AlertId(self.next_id);
        self.next_id += 1;
        self.alerts.push(Alert {
            id,
            kind,
            message: message.into(),
            raised_at: now,
        });
        id
    }

    /// Remove an alert. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: AlertId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Alerts on screen, oldest first
    #[must_use]
    pub fn active(&self) -> &[Alert] {
        &self.alerts
    }

    /// Most recent alert, if any
    #[must_use]
    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut center = AlertCenter::default();
        let now = Utc::now();
        let first = center.push(AlertKind::Info, "one", now);
        let second = center.push(AlertKind::Error, "two", now);
        assert!(first < second);
        assert_eq!(center.active().len(), 2);
        assert_eq!(center.latest().map(|a| a.message.as_str()), Some("two"));
    }

    #[test]
    fn dismiss_twice_is_harmless() {
        let mut center = AlertCenter::default();
        let id = center.push(AlertKind::Success, "saved", Utc::now());
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.active().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_dismissal() {
        let mut center = AlertCenter::default();
        let now = Utc::now();
        let first = center.push(AlertKind::Info, "a", now);
        center.dismiss(first);
        let second = center.push(AlertKind::Info, "b", now);
        assert_ne!(first, second);
    }
}
