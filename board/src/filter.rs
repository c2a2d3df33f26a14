//! The catalog filter: category plus an optional date window.
//!
//! An unset axis is no constraint. The result is always a subsequence of the
//! repository's events in insertion order.

use crate::calendar::{end_of_day, parse_date, start_of_day};
use crate::types::{Category, Event};
use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw values of the filter controls, as the page posts them
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterForm {
    /// Selected category option; empty for "all"
    pub category: String,
    /// `YYYY-MM-DD` lower bound; empty for none
    pub date_min: String,
    /// `YYYY-MM-DD` upper bound; empty for none
    pub date_max: String,
}

/// Active catalog filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only this category
    pub category: Option<Category>,
    /// Nothing before the start of this day
    pub date_min: Option<NaiveDate>,
    /// Nothing after the end of this day
    pub date_max: Option<NaiveDate>,
}

impl EventFilter {
    /// The empty filter: every event is visible
    #[must_use]
    pub const fn all() -> Self {
        Self {
            category: None,
            date_min: None,
            date_max: None,
        }
    }

    /// Read the filter controls.
    ///
    /// Values that don't parse constrain nothing, the same as empty ones.
    #[must_use]
    pub fn from_form(form: &FilterForm) -> Self {
        let category = match form.category.trim() {
            "" => None,
            value => value
                .parse::<Category>()
                .inspect_err(|error| tracing::warn!(%error, "Ignoring category filter"))
                .ok(),
        };
        let date = |value: &str, axis: &str| {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            let parsed = parse_date(value);
            if parsed.is_none() {
                tracing::debug!(axis, value, "Ignoring unparseable date filter");
            }
            parsed
        };

        Self {
            category,
            date_min: date(&form.date_min, "date_min"),
            date_max: date(&form.date_max, "date_max"),
        }
    }

    /// Whether no axis is constrained
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.date_min.is_none() && self.date_max.is_none()
    }

    /// Whether `event` passes every set axis. Day bounds are taken in `offset`;
    /// a day with no UTC instant in `offset` constrains nothing.
    #[must_use]
    pub fn matches(&self, event: &Event, offset: FixedOffset) -> bool {
        if self.category.is_some_and(|category| event.category != category) {
            return false;
        }
        let start = self.date_min.and_then(|day| start_of_day(day, offset));
        if start.is_some_and(|start| event.date < start) {
            return false;
        }
        let end = self.date_max.and_then(|day| end_of_day(day, offset));
        if end.is_some_and(|end| event.date > end) {
            return false;
        }
        true
    }

    /// The visible events, in their original order
    pub fn apply<'a>(&self, events: &'a [Event], offset: FixedOffset) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event, offset)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::EventFields;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn event(title: &str, category: Category, date: DateTime<Utc>) -> Event {
        Event::new(
            EventFields {
                title: title.to_string(),
                description: "d".to_string(),
                date,
                place: "p".to_string(),
                category,
                capacity: 10,
            },
            None,
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn catalog() -> Vec<Event> {
        vec![
            event("run", Category::Sport, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()),
            event("talk", Category::Conference, Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap()),
            event("match", Category::Sport, Utc.with_ymd_and_hms(2025, 3, 3, 23, 59, 59).unwrap()),
            event("lab", Category::Workshop, Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()),
        ]
    }

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn empty_filter_shows_everything_in_order() {
        let events = catalog();
        assert_eq!(titles(&EventFilter::all().apply(&events, utc())), ["run", "talk", "match", "lab"]);
    }

    #[test]
    fn category_filter_keeps_order() {
        let events = catalog();
        let filter = EventFilter {
            category: Some(Category::Sport),
            ..EventFilter::all()
        };
        assert_eq!(titles(&filter.apply(&events, utc())), ["run", "match"]);
    }

    #[test]
    fn date_min_starts_at_midnight() {
        let events = catalog();
        let filter = EventFilter {
            date_min: Some(day(2)),
            ..EventFilter::all()
        };
        assert_eq!(titles(&filter.apply(&events, utc())), ["talk", "match", "lab"]);
    }

    #[test]
    fn date_max_runs_to_end_of_day() {
        let events = catalog();
        let filter = EventFilter {
            date_max: Some(day(3)),
            ..EventFilter::all()
        };
        assert_eq!(titles(&filter.apply(&events, utc())), ["run", "talk", "match"]);

        let mut late = catalog();
        late.push(event(
            "last-ms",
            Category::Other,
            Utc.with_ymd_and_hms(2025, 3, 3, 23, 59, 59).unwrap() + Duration::milliseconds(999),
        ));
        late.push(event("next-day", Category::Other, Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap()));
        let visible = titles(&filter.apply(&late, utc()));
        assert!(visible.contains(&"last-ms".to_string()));
        assert!(!visible.contains(&"next-day".to_string()));
    }

    #[test]
    fn axes_combine_as_conjunction() {
        let events = catalog();
        let filter = EventFilter {
            category: Some(Category::Sport),
            date_min: Some(day(2)),
            date_max: Some(day(4)),
        };
        assert_eq!(titles(&filter.apply(&events, utc())), ["match"]);
    }

    #[test]
    fn day_bounds_follow_the_offset() {
        let events = catalog();
        // at UTC-7 the talk (00:00 UTC on the 2nd) is 17:00 on the 1st
        let filter = EventFilter {
            date_max: Some(day(1)),
            ..EventFilter::all()
        };
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(titles(&filter.apply(&events, offset)), ["run", "talk"]);
        // at UTC+9 the talk (00:00 UTC on the 2nd) is 09:00 on the 2nd
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(titles(&filter.apply(&events, offset)), ["run"]);
    }

    #[test]
    fn form_values_parse_leniently() {
        let filter = EventFilter::from_form(&FilterForm {
            category: "atelier".to_string(),
            date_min: "2025-03-01".to_string(),
            date_max: "soon".to_string(),
        });
        assert_eq!(filter.category, Some(Category::Workshop));
        assert_eq!(filter.date_min, Some(day(1)));
        assert_eq!(filter.date_max, None);

        assert!(EventFilter::from_form(&FilterForm::default()).is_empty());
        assert!(EventFilter::from_form(&FilterForm {
            category: "concert".to_string(),
            ..FilterForm::default()
        })
        .is_empty());
    }

    #[test]
    fn days_at_the_calendar_limits_never_hide_events() {
        let events = catalog();
        let filter = EventFilter::from_form(&FilterForm {
            date_min: "-262143-01-01".to_string(),
            date_max: "+262142-12-31".to_string(),
            ..FilterForm::default()
        });
        assert!(filter.date_min.is_some());
        assert!(filter.date_max.is_some());

        for offset in [
            utc(),
            FixedOffset::west_opt(3600).unwrap(),
            FixedOffset::east_opt(3600).unwrap(),
        ] {
            assert_eq!(titles(&filter.apply(&events, offset)), ["run", "talk", "match", "lab"]);
        }
    }
}
