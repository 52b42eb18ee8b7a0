//! C1: Time & Domain Model — timestamp parsing, aircraft categorization and
//! size compatibility.

use crate::error::EngineError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Sentinel date used to encode a time-only (`HH:MM`) timestamp, matching the
/// `year = 1900` sentinel in `original_source/data_structures.py`.
fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid sentinel date")
}

/// A parsed point in time, in one of two input formats: a bare `HH:MM`
/// (encoded against the sentinel date) or a full `YYYY-MM-DDTHH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a timestamp in either `HH:MM` or `YYYY-MM-DDTHH:MM` form.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        if let Some((date_part, time_part)) = s.split_once('T') {
            let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map_err(|_| EngineError::InvalidTime(s.to_string()))?;
            let time = NaiveTime::parse_from_str(time_part, "%H:%M")
                .map_err(|_| EngineError::InvalidTime(s.to_string()))?;
            Ok(Timestamp(date.and_time(time)))
        } else {
            let time = NaiveTime::parse_from_str(s, "%H:%M")
                .map_err(|_| EngineError::InvalidTime(s.to_string()))?;
            Ok(Timestamp(sentinel_date().and_time(time)))
        }
    }

    pub fn is_time_only(&self) -> bool {
        self.0.date() == sentinel_date()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Format per §6: `HH:MM` for time-only, `YYYY-MM-DD HH:MM` otherwise.
    pub fn format_wall_clock(&self) -> String {
        if self.is_time_only() {
            self.0.format("%H:%M").to_string()
        } else {
            self.0.format("%Y-%m-%d %H:%M").to_string()
        }
    }
}

/// Minute-resolution timestamp codec shared by the greedy and CP allocators.
/// Implements the encoding documented in spec.md §4.2: minutes since a
/// per-engine reference epoch, with the reference being midnight of the
/// nominal day for time-only data.
#[derive(Debug, Clone, Copy)]
pub struct Epoch {
    reference_date: NaiveDate,
}

impl Epoch {
    /// Derive the reference epoch from the earliest of a set of timestamps.
    /// Mirrors `StandAllocationEngine._datetime_to_timestamp`'s reference
    /// date selection, including its fallback to `2000-01-01` when the
    /// earliest timestamp is itself a sentinel (time-only) value but a
    /// full-date timestamp is being encoded elsewhere in the scenario.
    pub fn from_earliest<I: IntoIterator<Item = Timestamp>>(times: I) -> Self {
        let earliest = times.into_iter().min();
        let reference_date = earliest
            .map(|t| t.date())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        Epoch { reference_date }
    }

    /// Encode a timestamp as minutes since the epoch.
    pub fn to_minutes(&self, ts: Timestamp) -> i64 {
        if ts.is_time_only() {
            (ts.naive().time().num_seconds_from_midnight() / 60) as i64
        } else {
            let ref_date = if self.reference_date == sentinel_date() {
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
            } else {
                self.reference_date
            };
            let day_part = (ts.date() - ref_date).num_days();
            day_part * 24 * 60 + (ts.naive().time().num_seconds_from_midnight() / 60) as i64
        }
    }

    /// Decode minutes-since-epoch back to wall-clock text, per §4.7's time
    /// decoding rule. `time_only` selects the rendering format for the whole
    /// scenario (mixed formats are undefined per spec.md §4.1).
    pub fn format_minutes(&self, minutes: i64, time_only: bool) -> String {
        if time_only {
            let m = minutes.rem_euclid(24 * 60);
            format!("{:02}:{:02}", m / 60, m % 60)
        } else {
            let ref_date = if self.reference_date == sentinel_date() {
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
            } else {
                self.reference_date
            };
            let days = minutes.div_euclid(24 * 60);
            let rem = minutes.rem_euclid(24 * 60);
            let date = ref_date + chrono::Duration::days(days);
            format!("{} {:02}:{:02}", date.format("%Y-%m-%d"), rem / 60, rem % 60)
        }
    }
}

use chrono::Timelike;

/// Aircraft size category, derived by substring matching on the aircraft
/// type designator (spec.md §4.1). Order of checks matters: the first list
/// matched wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AircraftCategory {
    Narrow,
    Wide,
    Super,
}

const NARROW_TYPES: &[&str] = &["A320", "B737", "E190", "CRJ", "A220", "B717", "A319"];
const WIDE_TYPES: &[&str] = &["B777", "B787", "A330", "A350", "B767", "B757"];
const SUPER_TYPES: &[&str] = &["A380", "B747", "AN225"];

/// Classify an aircraft type string into a size category. Unrecognized types
/// default to `Narrow` (documented fallback).
pub fn classify_aircraft(aircraft_type: &str) -> AircraftCategory {
    if NARROW_TYPES.iter().any(|t| aircraft_type.contains(t)) {
        AircraftCategory::Narrow
    } else if WIDE_TYPES.iter().any(|t| aircraft_type.contains(t)) {
        AircraftCategory::Wide
    } else if SUPER_TYPES.iter().any(|t| aircraft_type.contains(t)) {
        AircraftCategory::Super
    } else {
        AircraftCategory::Narrow
    }
}

/// Stand size limit, using the same three-tier scale as [`AircraftCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum SizeLimit {
    Narrow,
    Wide,
    Super,
}

/// Compatibility matrix (spec.md §4.1): narrow fits any stand, wide fits
/// wide/super, super fits only super.
pub fn is_compatible(aircraft: AircraftCategory, stand_limit: SizeLimit) -> bool {
    match aircraft {
        AircraftCategory::Narrow => true,
        AircraftCategory::Wide => matches!(stand_limit, SizeLimit::Wide | SizeLimit::Super),
        AircraftCategory::Super => matches!(stand_limit, SizeLimit::Super),
    }
}

/// Time-difference in minutes between two timestamps, adding 24h if `end` is
/// before `start` and both share the sentinel (time-only) date — spec.md
/// §4.5's overnight handling for the transfer-window predicate.
pub fn minutes_between(start: Timestamp, end: Timestamp) -> i64 {
    let mut end_naive = end.naive();
    if end_naive < start.naive() && start.is_time_only() && end.is_time_only() {
        end_naive += chrono::Duration::days(1);
    }
    (end_naive - start.naive()).num_seconds() / 60
}
