use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::sources::token::TokenRecord;
use crate::utils::constants::{DATE_ONLY_LEN, END_OF_DAY_SUFFIX, REDACTED_TOKEN_NAME, SECONDS_PER_DAY};

#[derive(Debug, Error)]
pub enum DateParseError {
    #[error("token has no expiration date")]
    Missing,

    #[error("invalid expiration date '{value}': {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// whole days left, negative once expired
    pub days: i64,
    pub should_publish: bool,
}

/// Parse an expiration value. A date-only value expires at the end of that
/// day (`23:59:59Z`), not at midnight.
pub fn parse_expiration(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    if raw.is_empty() {
        return Err(DateParseError::Missing);
    }

    let timestamp = if raw.len() == DATE_ONLY_LEN {
        format!("{}{}", raw, END_OF_DAY_SUFFIX)
    } else {
        raw.to_owned()
    };

    DateTime::parse_from_rfc3339(&timestamp)
        .map(|expiration| expiration.with_timezone(&Utc))
        .map_err(|source| DateParseError::Invalid {
            value: raw.to_owned(),
            source,
        })
}

pub fn should_publish(name: &str) -> bool {
    name != REDACTED_TOKEN_NAME
}

/// Days from `now` until the token expires, truncated toward zero.
pub fn days_until_expiration(
    record: &TokenRecord,
    now: DateTime<Utc>,
) -> Result<Evaluation, DateParseError> {
    let raw = record.expires_at.as_deref().ok_or(DateParseError::Missing)?;
    let expiration = parse_expiration(raw)?;

    Ok(Evaluation {
        days: (expiration - now).num_seconds() / SECONDS_PER_DAY,
        should_publish: should_publish(&record.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(name: &str, expires_at: Option<&str>) -> TokenRecord {
        TokenRecord {
            id: 1,
            name: name.to_owned(),
            expires_at: expires_at.map(str::to_owned),
            username: "alice".to_owned(),
            ..Default::default()
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn date_only_expires_at_end_of_day() {
        let expiration = parse_expiration("2030-01-10").unwrap();
        assert_eq!(expiration, at(2030, 1, 10, 23, 59, 59));
    }

    #[test]
    fn full_timestamp_with_offset_is_normalized_to_utc() {
        let expiration = parse_expiration("2030-01-10T12:00:00+02:00").unwrap();
        assert_eq!(expiration, at(2030, 1, 10, 10, 0, 0));

        let expiration = parse_expiration("2030-01-10T12:00:00.000Z").unwrap();
        assert_eq!(expiration, at(2030, 1, 10, 12, 0, 0));
    }

    #[test]
    fn nine_days_left_at_start_of_month() {
        let evaluation =
            days_until_expiration(&record("deploy", Some("2030-01-10")), at(2030, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!(evaluation, Evaluation { days: 9, should_publish: true });
    }

    #[test]
    fn end_of_day_not_midnight_decides_the_count() {
        // with a midnight expiration this would be 0
        let evaluation =
            days_until_expiration(&record("deploy", Some("2030-01-02")), at(2030, 1, 1, 0, 0, 1)).unwrap();
        assert_eq!(evaluation.days, 1);
    }

    #[test]
    fn same_day_expiration_counts_as_zero() {
        let evaluation =
            days_until_expiration(&record("deploy", Some("2030-01-01")), at(2030, 1, 1, 12, 0, 0)).unwrap();
        assert_eq!(evaluation.days, 0);
    }

    #[test]
    fn expired_token_yields_negative_days() {
        let evaluation =
            days_until_expiration(&record("deploy", Some("2030-01-01")), at(2030, 1, 5, 0, 0, 0)).unwrap();
        assert_eq!(evaluation.days, -3);
    }

    #[test]
    fn days_never_increase_as_time_advances() {
        let token = record("deploy", Some("2030-01-10"));
        let start = at(2029, 12, 1, 0, 0, 0);
        let mut previous = i64::MAX;
        for hours in (0..24 * 60).step_by(7) {
            let days = days_until_expiration(&token, start + Duration::hours(hours)).unwrap().days;
            assert!(days <= previous, "days increased from {} to {}", previous, days);
            previous = days;
        }
        assert!(previous < 0);
    }

    #[test]
    fn redacted_name_is_not_published() {
        let evaluation =
            days_until_expiration(&record("Private Token", Some("2030-01-10")), at(2030, 1, 1, 0, 0, 0)).unwrap();
        assert!(!evaluation.should_publish);
        assert_eq!(evaluation.days, 9);

        assert!(should_publish("private token"));
        assert!(should_publish("Private Token (ci)"));
    }

    #[test]
    fn unparseable_expiration_is_reported() {
        let err = days_until_expiration(&record("deploy", Some("not-a-date")), at(2030, 1, 1, 0, 0, 0))
            .unwrap_err();
        assert!(matches!(err, DateParseError::Invalid { ref value, .. } if value == "not-a-date"));

        // ten characters but not a date
        let err = parse_expiration("2030/01/10").unwrap_err();
        assert!(matches!(err, DateParseError::Invalid { .. }));
    }

    #[test]
    fn missing_expiration_is_reported() {
        let now = at(2030, 1, 1, 0, 0, 0);
        assert!(matches!(
            days_until_expiration(&record("deploy", None), now),
            Err(DateParseError::Missing)
        ));
        assert!(matches!(
            days_until_expiration(&record("deploy", Some("")), now),
            Err(DateParseError::Missing)
        ));
    }
}
