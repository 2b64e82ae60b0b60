use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::positions::{normalize_angle, positions_at};
use crate::types::{Body, Position};

/// Backend producing positions for an instant. Remote chart services
/// implement this; failures degrade to the local model through
/// [`positions_with_fallback`].
pub trait PositionSource {
    fn positions(
        &self,
        instant: NaiveDateTime,
        bodies: &[Body],
        timezone_offset_minutes: i32,
    ) -> Result<Vec<Position>, EngineError>;
}

/// The local circular-orbit model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSource;

impl PositionSource for ModelSource {
    fn positions(
        &self,
        instant: NaiveDateTime,
        bodies: &[Body],
        timezone_offset_minutes: i32,
    ) -> Result<Vec<Position>, EngineError> {
        Ok(positions_at(instant, bodies, timezone_offset_minutes))
    }
}

/// Request body sent to a remote chart service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRequest {
    pub date: String,
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl ChartRequest {
    pub fn new(instant: NaiveDateTime, latitude: f64, longitude: f64, timezone: &str) -> Self {
        Self {
            date: instant.format("%Y-%m-%d").to_string(),
            time: instant.format("%H:%M:%S").to_string(),
            latitude,
            longitude,
            timezone: timezone.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub positions: Vec<RemotePosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePosition {
    pub planet: String,
    pub longitude: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
}

impl ChartResponse {
    /// Converts to positions, dropping bodies outside the model.
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
            .into_iter()
            .filter_map(|p| match p.planet.parse::<Body>() {
                Ok(body) => Some(Position {
                    body,
                    longitude: normalize_angle(p.longitude),
                    latitude: p.latitude.unwrap_or(0.0),
                    distance: p.distance.unwrap_or(1.0),
                }),
                Err(_) => {
                    log::debug!("dropping unrecognized body {:?}", p.planet);
                    None
                }
            })
            .collect()
    }
}

pub fn decode_chart_response(json: &str) -> Result<Vec<Position>, EngineError> {
    let response: ChartResponse = serde_json::from_str(json)?;
    Ok(response.into_positions())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourcedPositions {
    pub positions: Vec<Position>,
    /// Set when the source failed and the local model was used instead.
    pub degraded: bool,
}

pub fn positions_with_fallback<S: PositionSource + ?Sized>(
    source: &S,
    instant: NaiveDateTime,
    bodies: &[Body],
    timezone_offset_minutes: i32,
) -> SourcedPositions {
    match source.positions(instant, bodies, timezone_offset_minutes) {
        Ok(positions) => SourcedPositions {
            positions,
            degraded: false,
        },
        Err(e) => {
            log::warn!("{e}, using local model for {instant}");
            SourcedPositions {
                positions: positions_at(instant, bodies, timezone_offset_minutes),
                degraded: true,
            }
        }
    }
}
