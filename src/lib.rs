pub mod aspects;
pub mod config;
pub mod error;
pub mod positions;
pub mod series;
pub mod source;
pub mod timezone;
pub mod types;

pub use aspects::{
    angular_separation, classify, classify_selected, filter_by_selection, natal_aspects,
    transit_aspects,
};

pub use config::CalendarRequest;

pub use error::EngineError;

pub use positions::{
    days_elapsed, degrees_per_day, fallback_instant, initial_longitude, longitude_at,
    normalize_angle, orbital_period_days, parse_instant, parse_instant_with_offset, positions_at,
    reference_epoch, table_period_days, to_utc, try_parse_instant, try_parse_instant_with_offset,
    SOLAR_YEAR_DAYS,
};

pub use series::{
    attach_natal_aspects, build_calendar, days_in_month, days_in_range, find_record, generate,
    generate_with_offset, generate_with_timezone, month_range, natal_positions,
};

pub use source::{
    decode_chart_response, positions_with_fallback, ChartRequest, ChartResponse, ModelSource,
    PositionSource, RemotePosition, SourcedPositions,
};

pub use timezone::{known_timezone_offset, timezone_offset_minutes, COMMON_TIMEZONES};

pub use types::{
    Aspect, AspectMatch, AspectSelection, AspectStyle, AspectType, Body, BodyStyle,
    EphemerisRecord, Position,
};
