use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::aspects::{natal_aspects, transit_aspects};
use crate::config::CalendarRequest;
use crate::error::EngineError;
use crate::positions::positions_at;
use crate::timezone::timezone_offset_minutes;
use crate::types::{AspectSelection, Body, EphemerisRecord, Position};

/// Calendar days in `[start, end]`, ascending. Empty when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), EngineError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or(EngineError::InvalidMonth { year, month })?;
    Ok((first, last))
}

fn transit_record(
    date: NaiveDate,
    bodies: &[Body],
    timezone_offset_minutes: i32,
) -> EphemerisRecord {
    let positions = positions_at(date.and_time(NaiveTime::MIN), bodies, timezone_offset_minutes);
    let transit_aspects = transit_aspects(&positions);
    EphemerisRecord {
        date,
        positions,
        transit_aspects,
        natal_aspects: Vec::new(),
    }
}

/// One record per day in `[start, end]`, evaluated at midnight with the
/// given offset. `natal_aspects` is left empty.
pub fn generate_with_offset(
    start: NaiveDate,
    end: NaiveDate,
    bodies: &[Body],
    timezone_offset_minutes: i32,
) -> Vec<EphemerisRecord> {
    let records: Vec<EphemerisRecord> = days_in_range(start, end)
        .map(|date| transit_record(date, bodies, timezone_offset_minutes))
        .collect();
    log::debug!(
        "generated {} records for {} bodies ({start}..={end})",
        records.len(),
        bodies.len()
    );
    records
}

/// Like [`generate_with_offset`], but resolves the named zone's offset at
/// each day's midnight. `None` means offset 0.
pub fn generate_with_timezone(
    start: NaiveDate,
    end: NaiveDate,
    bodies: &[Body],
    timezone: Option<&str>,
) -> Vec<EphemerisRecord> {
    days_in_range(start, end)
        .map(|date| {
            let midnight = date.and_time(NaiveTime::MIN);
            let offset = timezone
                .map(|tz| timezone_offset_minutes(tz, &midnight))
                .unwrap_or(0);
            transit_record(date, bodies, offset)
        })
        .collect()
}

pub fn generate(start: NaiveDate, end: NaiveDate, bodies: &[Body]) -> Vec<EphemerisRecord> {
    generate_with_offset(start, end, bodies, 0)
}

pub fn attach_natal_aspects(
    mut record: EphemerisRecord,
    natal: &[Position],
    selection: &AspectSelection,
) -> EphemerisRecord {
    record.natal_aspects = natal_aspects(natal, &record.positions, selection);
    record
}

/// Natal positions of a request. An offset carried by the natal instant
/// wins over the request's timezone, which is resolved at the natal instant.
pub fn natal_positions(request: &CalendarRequest) -> Vec<Position> {
    let offset = request
        .natal_offset_minutes
        .or_else(|| {
            request
                .timezone
                .as_deref()
                .map(|tz| timezone_offset_minutes(tz, &request.natal_instant))
        })
        .unwrap_or(0);
    positions_at(request.natal_instant, &request.natal_bodies, offset)
}

/// Full calendar computation: transit series with natal aspects attached.
pub fn build_calendar(request: &CalendarRequest) -> Vec<EphemerisRecord> {
    let natal = natal_positions(request);
    let selection = request.selection();

    generate_with_timezone(
        request.start,
        request.end,
        &request.bodies,
        request.timezone.as_deref(),
    )
    .into_iter()
    .map(|record| attach_natal_aspects(record, &natal, &selection))
    .collect()
}

/// Record for `date`. `records` must be sorted ascending by date, as
/// [`generate`] returns them.
pub fn find_record(records: &[EphemerisRecord], date: NaiveDate) -> Option<&EphemerisRecord> {
    records
        .binary_search_by_key(&date, |r| r.date)
        .ok()
        .map(|idx| &records[idx])
}

/// Number of records in a month view, for callers laying out a grid.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, EngineError> {
    let (first, last) = month_range(year, month)?;
    Ok(last.day() - first.day() + 1)
}
