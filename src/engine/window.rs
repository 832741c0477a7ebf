use crate::error::SheetError;

use chrono::{NaiveTime, Timelike};

pub const CLOCK_FORMAT: &str = "%H:%M:%S";
const SHORT_CLOCK_FORMAT: &str = "%H:%M";

/// A closed time-of-day interval; both boundary instants belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parses both boundaries as strict `HH:MM:SS`. Ordering is not checked,
    /// so `start == end` describes a single instant.
    pub fn parse(start: &str, end: &str) -> Result<Self, SheetError> {
        Ok(Self::new(parse_clock_strict(start)?, parse_clock_strict(end)?))
    }

    /// Window for a user query: strict format and `start < end`.
    pub fn for_query(start: &str, end: &str) -> Result<Self, SheetError> {
        let window = Self::parse(start, end)?;

        if window.start >= window.end {
            return Err(SheetError::StartNotBeforeEnd {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(window)
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Lenient clock parsing for record times; `None` means the record is out of any window.
/// Missing seconds read as `:00`.
pub fn parse_clock(text: &str) -> Option<NaiveTime> {
    let text = text.trim();

    NaiveTime::parse_from_str(text, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(text, SHORT_CLOCK_FORMAT))
        .ok()
        .filter(|time| !is_leap_second(time))
}

pub fn parse_clock_strict(text: &str) -> Result<NaiveTime, SheetError> {
    let well_formed = text.len() == 8
        && text.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b':',
            _ => b.is_ascii_digit(),
        });

    well_formed
        .then(|| parse_clock(text))
        .flatten()
        .ok_or_else(|| SheetError::InvalidTimeFormat {
            value: text.to_string(),
        })
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

fn is_leap_second(time: &NaiveTime) -> bool {
    time.nanosecond() >= 1_000_000_000
}
