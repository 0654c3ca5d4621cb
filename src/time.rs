//! Timetable cell parsing.
//!
//! Cells hold `H:MM` or `HH:MM` strings on a 24-hour clock, or nothing at all
//! when the train does not stop. Times before 04:00 are shifted past 24:00 so
//! a trip that runs over midnight keeps increasing along its row.

use crate::schema::{MINUTES_PER_DAY, NormalizedTime, SERVICE_DAY_START};

/// Error returned when a non-empty cell is not `integer:integer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Parse `H:MM` into minutes since midnight, without rollover.
///
/// ```
/// use timetable_scraper::time::parse_minutes;
///
/// assert_eq!(parse_minutes("8:05"), Ok(485));
/// assert_eq!(parse_minutes("23:59"), Ok(1439));
/// assert!(parse_minutes("8.05").is_err());
/// ```
pub fn parse_minutes(cell: &str) -> Result<u32, TimeError> {
    let (hour, minute) = cell
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected H:MM format"))?;
    if minute.contains(':') {
        return Err(TimeError::new("more than one colon"));
    }

    let hour = parse_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minute = parse_digits(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;

    hour.checked_mul(60)
        .and_then(|h| h.checked_add(minute))
        .ok_or_else(|| TimeError::new("time out of range"))
}

// `str::parse::<u32>` also takes a leading '+', which a timetable never has.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Move early-morning times onto the previous service day.
///
/// ```
/// use timetable_scraper::time::rollover;
///
/// assert_eq!(rollover(30), 1470);
/// assert_eq!(rollover(240), 240);
/// ```
pub fn rollover(minutes: u32) -> u32 {
    if minutes < SERVICE_DAY_START {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

/// Normalize one raw cell: empty is `None`, otherwise parsed and rolled over.
pub fn normalize(cell: &str) -> Result<NormalizedTime, TimeError> {
    if cell.is_empty() {
        return Ok(None);
    }
    parse_minutes(cell).map(rollover).map(Some)
}
