use chrono::{Local, NaiveDateTime, Offset, TimeZone};

pub const COMMON_TIMEZONES: [&str; 8] = [
    "UTC",
    "America/New_York",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Paris",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Australia/Sydney",
];

/// Stand-in for a timezone database. Minutes to add to local time to reach
/// UTC, so zones east of Greenwich are negative. DST is not modelled.
const OFFSETS: [(&str, i32); 8] = [
    ("UTC", 0),
    ("America/New_York", 300),
    ("America/Los_Angeles", 480),
    ("Europe/London", 0),
    ("Europe/Paris", -60),
    ("Asia/Tokyo", -540),
    ("Asia/Shanghai", -480),
    ("Australia/Sydney", -600),
];

pub fn known_timezone_offset(name: &str) -> Option<i32> {
    OFFSETS
        .iter()
        .find(|(tz, _)| *tz == name)
        .map(|&(_, offset)| offset)
}

/// Host offset at `instant`, in the same sign convention as the table.
pub fn host_offset_minutes(instant: &NaiveDateTime) -> i32 {
    let east_secs = Local
        .offset_from_local_datetime(instant)
        .earliest()
        .map(|o| o.fix().local_minus_utc())
        .unwrap_or(0);
    -east_secs / 60
}

/// Offset for a timezone designator. Unknown names resolve to the host's
/// local offset.
pub fn timezone_offset_minutes(name: &str, instant: &NaiveDateTime) -> i32 {
    match known_timezone_offset(name) {
        Some(offset) => offset,
        None => {
            let offset = host_offset_minutes(instant);
            log::debug!("unknown timezone {name:?}, using host offset {offset}");
            offset
        }
    }
}
