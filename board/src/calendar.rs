//! Conversions between form text, the board's local offset and UTC.
//!
//! Browsers post `datetime-local` values (`YYYY-MM-DDTHH:MM`) and date inputs
//! (`YYYY-MM-DD`) without any zone. They are read in the configured offset and
//! stored as UTC. Dates near chrono's range limits may have no UTC instant in a
//! given offset, so the conversions return `Option`.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATETIME_LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Interpret a wall-clock time in `offset` as a UTC instant
#[must_use]
pub fn to_utc(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    naive
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        .map(|naive| naive.and_utc())
}

/// The wall-clock time of `instant` in `offset`
#[must_use]
pub fn to_local(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset)
}

/// Parse a `datetime-local` form value. Seconds are optional.
#[must_use]
pub fn parse_datetime_local(value: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| to_utc(naive, offset))
}

/// Parse a `YYYY-MM-DD` date input
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// 00:00:00.000 of `date` in `offset`
#[must_use]
pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    to_utc(date.and_time(NaiveTime::MIN), offset)
}

/// 23:59:59.999 of `date` in `offset`
#[must_use]
pub fn end_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| to_utc(naive, offset))
}

/// Render `instant` back into a `datetime-local` value for pre-filled forms
#[must_use]
pub fn datetime_local_value(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    to_local(instant, offset).format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn paris() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    #[test]
    fn datetime_local_is_read_in_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            parse_datetime_local("2025-03-01T18:30", utc),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap())
        );
        assert_eq!(
            parse_datetime_local("2025-03-01T18:30", paris()),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 17, 30, 0).unwrap())
        );
        assert!(parse_datetime_local("2025-03-01T18:30:15", utc).is_some());
        assert!(parse_datetime_local("tomorrow", utc).is_none());
        assert!(parse_datetime_local("", utc).is_none());
    }

    #[test]
    fn day_bounds_cover_the_whole_local_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(start_of_day(day, paris()), Utc.with_ymd_and_hms(2025, 2, 28, 23, 0, 0).single());
        assert_eq!(
            end_of_day(day, paris()),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 22, 59, 59).unwrap() + Duration::milliseconds(999))
        );
    }

    #[test]
    fn range_limits_have_no_instant() {
        let last = parse_date("+262142-12-31").unwrap();
        let first = parse_date("-262143-01-01").unwrap();
        let west = FixedOffset::west_opt(3600).unwrap();

        assert!(end_of_day(last, FixedOffset::east_opt(0).unwrap()).is_some());
        assert_eq!(end_of_day(last, west), None);
        assert_eq!(start_of_day(first, paris()), None);
        assert_eq!(parse_datetime_local("+262142-12-31T23:59", west), None);
    }

    #[test]
    fn prefill_value_round_trips() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 17, 30, 0).unwrap();
        let value = datetime_local_value(instant, paris());
        assert_eq!(value, "2025-03-01T18:30");
        assert_eq!(parse_datetime_local(&value, paris()), Some(instant));
    }

    #[test]
    fn date_inputs_parse_or_not() {
        assert_eq!(parse_date("2025-03-01"), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(parse_date("01/03/2025"), None);
        assert_eq!(parse_date(""), None);
    }
}
