use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::EngineError;
use crate::positions::parse_instant_with_offset;
use crate::types::{AspectSelection, Body};

/// Every caller-supplied parameter of a calendar computation.
///
/// Loadable from TOML:
///
/// ```toml
/// start = "2026-03-01"
/// end = "2026-03-31"
/// bodies = ["sun", "moon", "mars"]
/// natal_instant = "1990-01-01T12:00:00"
/// natal_bodies = ["sun", "moon"]
/// selected_angles = [0, 90, 180]
/// timezone = "Europe/Paris"
/// ```
///
/// A natal instant written with an RFC 3339 offset keeps that offset in
/// `natal_offset_minutes`, which takes precedence over `timezone` for the
/// natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bodies: Vec<Body>,
    /// Local wall time of birth.
    pub natal_instant: NaiveDateTime,
    pub natal_offset_minutes: Option<i32>,
    pub natal_bodies: Vec<Body>,
    pub selected_angles: Vec<u32>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CalendarRequestToml {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    bodies: Option<Vec<Body>>,
    natal_instant: Option<String>,
    natal_bodies: Option<Vec<Body>>,
    selected_angles: Option<Vec<u32>>,
    timezone: Option<String>,
}

impl Default for CalendarRequest {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap_or_default();
        let (natal_instant, natal_offset_minutes) =
            parse_instant_with_offset("1990-01-01T12:00:00");
        Self {
            start,
            end,
            bodies: vec![Body::Sun, Body::Moon],
            natal_instant,
            natal_offset_minutes,
            natal_bodies: vec![Body::Sun, Body::Moon],
            selected_angles: vec![0, 90, 180],
            timezone: None,
        }
    }
}

impl From<CalendarRequestToml> for CalendarRequest {
    fn from(raw: CalendarRequestToml) -> Self {
        let defaults = CalendarRequest::default();
        let (natal_instant, natal_offset_minutes) = match raw.natal_instant {
            Some(text) => parse_instant_with_offset(&text),
            None => (defaults.natal_instant, defaults.natal_offset_minutes),
        };
        Self {
            start: raw.start.unwrap_or(defaults.start),
            end: raw.end.unwrap_or(defaults.end),
            bodies: raw.bodies.unwrap_or(defaults.bodies),
            natal_instant,
            natal_offset_minutes,
            natal_bodies: raw.natal_bodies.unwrap_or(defaults.natal_bodies),
            selected_angles: raw.selected_angles.unwrap_or(defaults.selected_angles),
            timezone: raw.timezone.or(defaults.timezone),
        }
    }
}

impl CalendarRequest {
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let raw: CalendarRequestToml = toml::from_str(text)?;
        Ok(raw.into())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn selection(&self) -> AspectSelection {
        AspectSelection::from_angles(&self.selected_angles)
    }
}
