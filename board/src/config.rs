//! Configuration for the event board.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::DEFAULT_CREATOR_EMAIL;
use chrono::{FixedOffset, Locale, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Locales the date formatter knows by name
const SUPPORTED_LOCALES: [(&str, Locale); 4] = [
    ("fr_FR", Locale::fr_FR),
    ("en_US", Locale::en_US),
    ("en_GB", Locale::en_GB),
    ("de_DE", Locale::de_DE),
];

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Creator stamped on events created without one
    pub default_creator_email: String,
    /// How long an alert stays before it dismisses itself, in milliseconds
    pub alert_ttl_ms: u64,
    /// Offset of the page's wall clock from UTC, in minutes
    pub utc_offset_minutes: i32,
    /// Locale for human-readable dates (`fr_FR`, `en_US`, `en_GB`, `de_DE`)
    pub date_locale: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_creator_email: DEFAULT_CREATOR_EMAIL.to_string(),
            alert_ttl_ms: 5000,
            utc_offset_minutes: 0,
            date_locale: "fr_FR".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or malformed values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_creator_email: env::var("BOARD_DEFAULT_CREATOR_EMAIL")
                .ok()
                .filter(|email| !email.trim().is_empty())
                .unwrap_or(defaults.default_creator_email),
            alert_ttl_ms: env::var("BOARD_ALERT_TTL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.alert_ttl_ms),
            utc_offset_minutes: env::var("BOARD_UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|minutes: &i32| minutes.abs() < 24 * 60)
                .unwrap_or(defaults.utc_offset_minutes),
            date_locale: env::var("BOARD_DATE_LOCALE").unwrap_or(defaults.date_locale),
        }
    }

    /// Alert lifetime
    #[must_use]
    pub const fn alert_ttl(&self) -> Duration {
        Duration::from_millis(self.alert_ttl_ms)
    }

    /// Wall-clock offset; UTC if the configured minutes are out of range
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }

    /// Locale for date formatting, `fr_FR` when the name is not supported
    #[must_use]
    pub fn locale(&self) -> Locale {
        SUPPORTED_LOCALES
            .iter()
            .find(|(name, _)| *name == self.date_locale)
            .map_or(Locale::fr_FR, |(_, locale)| *locale)
    }
}
