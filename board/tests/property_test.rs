//! Property tests for seat accounting and the filter engine.
//!
//! Run with: `cargo test --test property_test`

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use event_board::calendar::{end_of_day, start_of_day};
use event_board::{Category, Event, EventFields, EventFilter, Registration, Repository, User};
use event_board_core::environment::Clock;
use event_board_testing::properties::instant_near;
use event_board_testing::test_clock;
use proptest::prelude::*;

fn anchor() -> DateTime<Utc> {
    test_clock().now()
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn event(category: Category, date: DateTime<Utc>, capacity: u32) -> Event {
    Event::new(
        EventFields {
            title: format!("{category} at {date}"),
            description: "generated".to_string(),
            date,
            place: "somewhere".to_string(),
            category,
            capacity,
        },
        None,
    )
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn catalog() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((category(), instant_near(anchor(), 30)), 0..25).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(category, date)| event(category, date, 10))
            .collect()
    })
}

fn day() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of(instant_near(anchor(), 30).prop_map(|instant| instant.date_naive()))
}

fn ids(events: &[&Event]) -> Vec<String> {
    events.iter().map(|event| event.id().to_string()).collect()
}

proptest! {
    #[test]
    fn seats_left_is_capacity_minus_registrations(
        (capacity, registered) in (1u32..40).prop_flat_map(|capacity| (Just(capacity), 0..=capacity)),
    ) {
        let mut repository = Repository::new();
        let target = event(Category::Sport, anchor() + chrono::Duration::days(1), capacity);
        for n in 0..registered {
            let user = User::new("u", &format!("u{n}@univ.edu"));
            repository.insert(Registration::new(target.id(), user.id(), anchor()));
            repository.insert(user);
        }
        repository.insert(target.clone());

        let availability = repository.availability(&target, anchor());
        prop_assert_eq!(availability.registered as u64, u64::from(registered));
        prop_assert_eq!(availability.seats_left, i64::from(capacity) - i64::from(registered));
        prop_assert_eq!(availability.is_full, availability.seats_left <= 0);
        prop_assert_eq!(availability.is_full, registered == capacity);
    }

    #[test]
    fn passed_is_strictly_before_now(date in instant_near(anchor(), 3), now in instant_near(anchor(), 3)) {
        let e = event(Category::Other, date, 1);
        prop_assert_eq!(e.is_passed(now), date < now);
    }

    #[test]
    fn category_filter_is_an_ordered_subset(events in catalog(), wanted in category()) {
        let filter = EventFilter { category: Some(wanted), ..EventFilter::all() };
        let visible = filter.apply(&events, utc());

        let expected: Vec<&Event> = events.iter().filter(|e| e.category == wanted).collect();
        prop_assert_eq!(ids(&visible), ids(&expected));
    }

    #[test]
    fn date_bounds_are_whole_days(events in catalog(), date_min in day(), date_max in day()) {
        let filter = EventFilter { category: None, date_min, date_max };
        let visible = filter.apply(&events, utc());

        for event in &events {
            let after_min = date_min.is_none_or(|d| event.date >= start_of_day(d, utc()).unwrap());
            let before_max = date_max.is_none_or(|d| event.date <= end_of_day(d, utc()).unwrap());
            let shown = visible.iter().any(|v| v.id() == event.id());
            prop_assert_eq!(shown, after_min && before_max);
        }
    }

    #[test]
    fn axes_combine_as_a_conjunction(
        events in catalog(),
        wanted in prop::option::of(category()),
        date_min in day(),
        date_max in day(),
    ) {
        let combined = EventFilter { category: wanted, date_min, date_max }.apply(&events, utc());
        let by_category = EventFilter { category: wanted, ..EventFilter::all() };
        let by_date = EventFilter { category: None, date_min, date_max };

        let expected: Vec<&Event> = events
            .iter()
            .filter(|e| by_category.matches(e, utc()) && by_date.matches(e, utc()))
            .collect();
        prop_assert_eq!(ids(&combined), ids(&expected));
    }

    #[test]
    fn empty_filter_shows_everything(events in catalog()) {
        let visible = EventFilter::all().apply(&events, utc());
        prop_assert_eq!(visible.len(), events.len());
    }
}
