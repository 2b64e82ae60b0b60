use chrono::{NaiveDate, NaiveDateTime};

use aspect_calendar::positions::*;
use aspect_calendar::types::Body;
use aspect_calendar::EngineError;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

// ── Orbital table ──

#[test]
fn test_positions_at_reference_epoch_match_table() {
    let expected = [
        (Body::Sun, 0.0),
        (Body::Moon, 45.0),
        (Body::Mercury, 120.0),
        (Body::Venus, 30.0),
        (Body::Mars, 300.0),
        (Body::Jupiter, 150.0),
        (Body::Saturn, 240.0),
        (Body::Uranus, 60.0),
        (Body::Neptune, 180.0),
        (Body::Pluto, 90.0),
    ];
    let positions = positions_at(reference_epoch(), &Body::ALL, 0);
    assert_eq!(positions.len(), 10);
    for (pos, &(body, lon)) in positions.iter().zip(expected.iter()) {
        assert_eq!(pos.body, body);
        assert_approx!(pos.longitude, lon, 1e-12);
    }
}

#[test]
fn test_reference_epoch_is_millennium_midnight() {
    assert_eq!(reference_epoch(), at(2000, 1, 1, 0, 0, 0));
    assert_eq!(days_elapsed(reference_epoch()), 0.0);
}

#[test]
fn test_days_elapsed_fractional() {
    assert_approx!(days_elapsed(at(2000, 1, 2, 12, 0, 0)), 1.5, 1e-12);
    assert_approx!(days_elapsed(at(1999, 12, 31, 18, 0, 0)), -0.25, 1e-12);
}

// ── Zero-period substitution ──

#[test]
fn test_sun_table_period_is_zero_and_substituted() {
    assert_eq!(table_period_days(Body::Sun), 0.0);
    assert_eq!(orbital_period_days(Body::Sun), SOLAR_YEAR_DAYS);
    assert_approx!(degrees_per_day(Body::Sun), 360.0 / 365.25, 1e-15);
    assert!(degrees_per_day(Body::Sun).is_finite());
}

#[test]
fn test_sun_advances_one_quadrant_per_quarter_year() {
    // 91.3125 days after the epoch
    let positions = positions_at(at(2000, 4, 1, 7, 30, 0), &[Body::Sun], 0);
    assert_approx!(positions[0].longitude, 90.0, 1e-9);
}

#[test]
fn test_other_periods_are_untouched() {
    for body in Body::ALL.into_iter().filter(|b| *b != Body::Sun) {
        assert!(table_period_days(body) > 0.0, "{body}");
        assert_eq!(orbital_period_days(body), table_period_days(body));
    }
}

// ── Circular motion ──

#[test]
fn test_moon_returns_after_one_period() {
    let lon = longitude_at(Body::Moon, 27.3);
    let diff = (lon - 45.0).abs();
    assert!(diff.min(360.0 - diff) < 1e-9, "moon at {lon}");
}

#[test]
fn test_mars_half_period_is_opposite() {
    assert_approx!(longitude_at(Body::Mars, 343.5), 120.0, 1e-9);
}

#[test]
fn test_longitude_normalized_for_all_instants() {
    let instants = [
        at(1900, 1, 1, 0, 0, 0),
        at(1969, 7, 20, 20, 17, 0),
        at(1999, 12, 31, 23, 59, 59),
        at(2026, 3, 21, 12, 0, 0),
        at(2100, 12, 31, 0, 0, 0),
        at(2500, 6, 15, 6, 0, 0),
    ];
    for instant in instants {
        for pos in positions_at(instant, &Body::ALL, 0) {
            assert!(
                (0.0..360.0).contains(&pos.longitude),
                "{} at {}: {}",
                pos.body, instant, pos.longitude
            );
        }
    }
}

#[test]
fn test_normalize_angle() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (360.0, 0.0),
        (361.0, 1.0),
        (-1.0, 359.0),
        (-450.0, 270.0),
        (725.0, 5.0),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_angle(input), expected, 1e-9);
    }
}

#[test]
fn test_normalize_angle_tiny_negative_stays_half_open() {
    let n = normalize_angle(-1e-20);
    assert!((0.0..360.0).contains(&n), "{n}");
}

#[test]
fn test_placeholders() {
    for pos in positions_at(at(2026, 1, 1, 0, 0, 0), &Body::ALL, 0) {
        assert_eq!(pos.latitude, 0.0);
        assert_eq!(pos.distance, 1.0);
    }
}

// ── Request handling ──

#[test]
fn test_request_order_preserved() {
    let bodies = [Body::Pluto, Body::Sun, Body::Mars, Body::Moon];
    let positions = positions_at(at(2026, 5, 1, 0, 0, 0), &bodies, 0);
    let returned: Vec<Body> = positions.iter().map(|p| p.body).collect();
    assert_eq!(returned, bodies);
}

#[test]
fn test_empty_body_set() {
    assert!(positions_at(at(2026, 5, 1, 0, 0, 0), &[], 0).is_empty());
}

#[test]
fn test_offset_shifts_to_utc() {
    let local = at(2026, 1, 15, 8, 0, 0);
    let shifted = positions_at(local, &[Body::Moon, Body::Mercury], 300);
    let utc = positions_at(at(2026, 1, 15, 13, 0, 0), &[Body::Moon, Body::Mercury], 0);
    for (a, b) in shifted.iter().zip(utc.iter()) {
        assert_approx!(a.longitude, b.longitude, 1e-9);
    }
}

#[test]
fn test_to_utc_negative_offset() {
    assert_eq!(to_utc(at(2026, 1, 1, 9, 0, 0), -540), at(2026, 1, 1, 0, 0, 0));
}

#[test]
fn test_to_utc_overflow_keeps_instant() {
    let max = NaiveDateTime::MAX;
    assert_eq!(to_utc(max, 600), max);
}

// ── Instant parsing ──

#[test]
fn test_parse_instant_formats() {
    assert_eq!(parse_instant("1990-01-01T12:00:00"), at(1990, 1, 1, 12, 0, 0));
    assert_eq!(parse_instant("1990-01-01 12:00:00"), at(1990, 1, 1, 12, 0, 0));
    assert_eq!(parse_instant("1990-01-01T12:30"), at(1990, 1, 1, 12, 30, 0));
    assert_eq!(parse_instant("2026-03-21"), at(2026, 3, 21, 0, 0, 0));
    assert_eq!(parse_instant("2026-03-21T12:00:00+09:00"), at(2026, 3, 21, 12, 0, 0));
}

#[test]
fn test_parse_instant_keeps_rfc3339_offset() {
    assert_eq!(
        parse_instant_with_offset("2026-03-21T12:00:00+09:00"),
        (at(2026, 3, 21, 12, 0, 0), Some(-540))
    );
    assert_eq!(
        parse_instant_with_offset("2026-03-21T07:00:00-05:00"),
        (at(2026, 3, 21, 7, 0, 0), Some(300))
    );
    assert_eq!(
        parse_instant_with_offset("2026-03-21T12:00:00Z"),
        (at(2026, 3, 21, 12, 0, 0), Some(0))
    );
    assert_eq!(
        parse_instant_with_offset("2026-03-21T12:00:00"),
        (at(2026, 3, 21, 12, 0, 0), None)
    );
    assert_eq!(parse_instant_with_offset("garbage"), (fallback_instant(), None));
}

#[test]
fn test_rfc3339_offset_names_same_moment() {
    let (tokyo, tokyo_offset) = parse_instant_with_offset("2026-03-21T12:00:00+09:00");
    let (utc, utc_offset) = parse_instant_with_offset("2026-03-21T03:00:00Z");
    assert_eq!(
        positions_at(tokyo, &Body::ALL, tokyo_offset.unwrap()),
        positions_at(utc, &Body::ALL, utc_offset.unwrap())
    );
}

#[test]
fn test_parse_instant_falls_back() {
    assert_eq!(parse_instant("not a date"), fallback_instant());
    assert_eq!(parse_instant(""), fallback_instant());
    assert_eq!(parse_instant("2026-02-30"), fallback_instant());
}

#[test]
fn test_try_parse_instant_reports_input() {
    match try_parse_instant("yesterday") {
        Err(EngineError::InvalidInstant { input }) => assert_eq!(input, "yesterday"),
        other => panic!("unexpected: {other:?}"),
    }
}
