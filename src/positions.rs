use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::error::EngineError;
use crate::types::{Body, Position};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Period substituted for bodies whose table period is zero. The sun's
/// apparent geocentric motion is the observer's own revolution.
pub const SOLAR_YEAR_DAYS: f64 = 365.25;

/// Day zero of the circular model, 2000-01-01T00:00:00 UTC.
pub fn reference_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Instant substituted for unparseable input.
pub fn fallback_instant() -> NaiveDateTime {
    reference_epoch()
}

/// (initial longitude in degrees, orbital period in days)
const ORBITAL_ELEMENTS: [(Body, f64, f64); 10] = [
    (Body::Sun, 0.0, 0.0),
    (Body::Moon, 45.0, 27.3),
    (Body::Mercury, 120.0, 88.0),
    (Body::Venus, 30.0, 224.7),
    (Body::Mars, 300.0, 687.0),
    (Body::Jupiter, 150.0, 4331.0),
    (Body::Saturn, 240.0, 10747.0),
    (Body::Uranus, 60.0, 30589.0),
    (Body::Neptune, 180.0, 59800.0),
    (Body::Pluto, 90.0, 90560.0),
];

fn elements(body: Body) -> (f64, f64) {
    ORBITAL_ELEMENTS
        .iter()
        .find(|(b, _, _)| *b == body)
        .map(|&(_, lon, period)| (lon, period))
        .unwrap_or((0.0, SOLAR_YEAR_DAYS))
}

pub fn normalize_angle(angle: f64) -> f64 {
    let n = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

pub fn initial_longitude(body: Body) -> f64 {
    elements(body).0
}

/// Period as listed in the orbital table, zero included.
pub fn table_period_days(body: Body) -> f64 {
    elements(body).1
}

/// Period actually used for motion.
pub fn orbital_period_days(body: Body) -> f64 {
    let period = table_period_days(body);
    if period > 0.0 {
        period
    } else {
        SOLAR_YEAR_DAYS
    }
}

pub fn degrees_per_day(body: Body) -> f64 {
    360.0 / orbital_period_days(body)
}

/// Converts a local wall-clock instant to UTC by adding the offset.
/// Overflow leaves the instant unshifted.
pub fn to_utc(instant: NaiveDateTime, timezone_offset_minutes: i32) -> NaiveDateTime {
    instant
        .checked_add_signed(Duration::minutes(i64::from(timezone_offset_minutes)))
        .unwrap_or(instant)
}

/// Fractional days from the reference epoch to `utc`.
pub fn days_elapsed(utc: NaiveDateTime) -> f64 {
    let delta = utc - reference_epoch();
    let secs = delta.num_seconds() as f64;
    let subsec = delta.subsec_nanos() as f64 / 1e9;
    (secs + subsec) / SECONDS_PER_DAY
}

pub fn longitude_at(body: Body, days_elapsed: f64) -> f64 {
    normalize_angle(initial_longitude(body) + days_elapsed * degrees_per_day(body))
}

/// Positions of `bodies` at a local instant, in request order.
pub fn positions_at(
    instant: NaiveDateTime,
    bodies: &[Body],
    timezone_offset_minutes: i32,
) -> Vec<Position> {
    let days = days_elapsed(to_utc(instant, timezone_offset_minutes));
    bodies
        .iter()
        .map(|&body| Position {
            body,
            longitude: longitude_at(body, days),
            latitude: 0.0,
            distance: 1.0,
        })
        .collect()
}

/// Strict instant parse returning the local wall time and, for RFC 3339
/// input, the offset it carried (minutes to add to reach UTC). Also accepts
/// `YYYY-MM-DDTHH:MM[:SS[.f]]`, `YYYY-MM-DD HH:MM:SS[.f]` and bare dates
/// (midnight), which carry no offset.
pub fn try_parse_instant_with_offset(
    text: &str,
) -> Result<(NaiveDateTime, Option<i32>), EngineError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        let offset = -dt.offset().local_minus_utc() / 60;
        return Ok((dt.naive_local(), Some(offset)));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok((dt, None));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| (dt, None))
        .ok_or_else(|| EngineError::InvalidInstant {
            input: text.to_string(),
        })
}

/// Local wall time of `text`; any RFC 3339 offset is discarded.
pub fn try_parse_instant(text: &str) -> Result<NaiveDateTime, EngineError> {
    try_parse_instant_with_offset(text).map(|(dt, _)| dt)
}

/// Lenient parse: unparseable text yields [`fallback_instant`] with no offset.
pub fn parse_instant_with_offset(text: &str) -> (NaiveDateTime, Option<i32>) {
    try_parse_instant_with_offset(text).unwrap_or_else(|e| {
        let fallback = fallback_instant();
        log::warn!("{e}, falling back to {fallback}");
        (fallback, None)
    })
}

pub fn parse_instant(text: &str) -> NaiveDateTime {
    parse_instant_with_offset(text).0
}
