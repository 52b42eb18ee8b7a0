//! Core entity types (spec.md §3): Flight, Stand, Airline, Settings,
//! MaintenanceEntry, TransferWindow, FlightConnectionTracker and
//! FlightOperationUnit.

use std::collections::{HashMap, HashSet};

use crate::error::EngineError;
use crate::time::{minutes_between, AircraftCategory, Epoch, SizeLimit, Timestamp};

/// An arrival or departure operation. Immutable after construction except
/// for `criticality_score`, which is mutated exclusively by the criticality
/// scorer (C3).
#[derive(Debug, Clone)]
pub struct Flight {
    pub flight_id: String,
    pub flight_number: String,
    pub airline_code: String,
    pub aircraft_type: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_time: Timestamp,
    pub terminal: String,
    pub is_arrival: bool,
    pub link_id: Option<String>,
    pub is_critical_connection: bool,
    pub base_priority_score: i64,
    pub criticality_score: f64,
}

impl Flight {
    /// Construct a flight, parsing `scheduled_time` (`HH:MM` or
    /// `YYYY-MM-DDTHH:MM`). Returns [`EngineError::InvalidTime`] if the time
    /// string cannot be parsed (spec §7 item 3).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flight_id: impl Into<String>,
        flight_number: impl Into<String>,
        airline_code: impl Into<String>,
        aircraft_type: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        scheduled_time: &str,
        terminal: impl Into<String>,
        is_arrival: bool,
        link_id: Option<String>,
        base_priority_score: i64,
    ) -> Result<Self, EngineError> {
        Ok(Flight {
            flight_id: flight_id.into(),
            flight_number: flight_number.into(),
            airline_code: airline_code.into(),
            aircraft_type: aircraft_type.into(),
            origin: origin.into(),
            destination: destination.into(),
            scheduled_time: Timestamp::parse(scheduled_time)?,
            terminal: terminal.into(),
            is_arrival,
            link_id,
            is_critical_connection: false,
            base_priority_score,
            criticality_score: 0.0,
        })
    }

    pub fn aircraft_category(&self) -> AircraftCategory {
        crate::time::classify_aircraft(&self.aircraft_type)
    }
}

/// An aircraft parking position.
#[derive(Debug, Clone)]
pub struct Stand {
    pub stand_name: String,
    pub terminal: String,
    pub is_contact_stand: bool,
    pub size_limit: SizeLimit,
    /// Pluggable adjacency rules (rule kind -> stand names the rule
    /// concerns). The default adjacency check (see `candidates`) ignores the
    /// contents and always passes — only the presence of the map is part of
    /// the contract (spec.md §3, §9 open question).
    pub adjacency_rules: HashMap<String, HashSet<String>>,
}

/// Airline-level preferences.
#[derive(Debug, Clone)]
pub struct Airline {
    pub airline_code: String,
    pub airline_name: String,
    pub base_terminal: String,
    pub requires_contact_stand: bool,
    pub priority_tier: u32,
}

/// Per-category turnaround times, in minutes. `Default` is the required
/// fallback when a category-specific value is absent.
#[derive(Debug, Clone, Copy)]
pub struct TurnaroundTimes {
    pub default_minutes: i64,
    pub narrow_minutes: Option<i64>,
    pub wide_minutes: Option<i64>,
    pub super_minutes: Option<i64>,
}

impl Default for TurnaroundTimes {
    fn default() -> Self {
        TurnaroundTimes {
            default_minutes: 45,
            narrow_minutes: None,
            wide_minutes: None,
            super_minutes: None,
        }
    }
}

impl TurnaroundTimes {
    pub fn minutes_for(&self, category: AircraftCategory) -> i64 {
        match category {
            AircraftCategory::Narrow => self.narrow_minutes.unwrap_or(self.default_minutes),
            AircraftCategory::Wide => self.wide_minutes.unwrap_or(self.default_minutes),
            AircraftCategory::Super => self.super_minutes.unwrap_or(self.default_minutes),
        }
    }
}

/// Criticality scoring weights (spec.md §3, §4.3). Defaults match
/// `original_source/data_structures.py`'s `Settings.prioritization_weights`.
#[derive(Debug, Clone, Copy)]
pub struct PrioritizationWeights {
    pub aircraft_type_a380: f64,
    pub aircraft_type_b747: f64,
    pub aircraft_type_wide: f64,
    pub airline_tier: f64,
    pub requires_contact_stand: f64,
    pub critical_connection: f64,
    pub base_score: f64,
}

impl Default for PrioritizationWeights {
    fn default() -> Self {
        PrioritizationWeights {
            aircraft_type_a380: 10.0,
            aircraft_type_b747: 8.0,
            aircraft_type_wide: 5.0,
            airline_tier: 2.0,
            requires_contact_stand: 3.0,
            critical_connection: 5.0,
            base_score: 1.0,
        }
    }
}

/// Solver control knobs (spec.md §3).
#[derive(Debug, Clone, Copy)]
pub struct SolverParameters {
    pub use_solver: bool,
    pub solver_time_limit_seconds: u64,
    pub optimality_gap: f64,
    pub max_solutions: u32,
    pub force_solver: bool,
}

impl Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            use_solver: false,
            solver_time_limit_seconds: 30,
            optimality_gap: 0.05,
            max_solutions: 1,
            force_solver: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub gap_between_flights_minutes: i64,
    pub turnaround_times: TurnaroundTimes,
    pub prioritization_weights: PrioritizationWeights,
    pub solver_parameters: SolverParameters,
}

/// A stand maintenance window. `start_time`/`end_time` are stored as parsed,
/// unadjusted timestamps; overnight-crossing normalization happens when the
/// interval is encoded into minutes (see [`Epoch::to_interval_minutes`]).
#[derive(Debug, Clone)]
pub struct MaintenanceEntry {
    pub stand_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl MaintenanceEntry {
    pub fn new(
        stand_name: impl Into<String>,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self, EngineError> {
        Ok(MaintenanceEntry {
            stand_name: stand_name.into(),
            start_time: Timestamp::parse(start_time)?,
            end_time: Timestamp::parse(end_time)?,
        })
    }
}

impl Epoch {
    /// Encode an interval, normalizing an overnight crossing for time-only
    /// data (spec.md §3 MaintenanceEntry note, §4.2) and guaranteeing
    /// `end > start` (spec.md invariant 3).
    pub fn to_interval_minutes(&self, start: Timestamp, end: Timestamp) -> (i64, i64) {
        let a = self.to_minutes(start);
        let mut b = self.to_minutes(end);
        if b <= a {
            if start.is_time_only() && end.is_time_only() {
                b = a + 24 * 60;
            } else {
                b = a + 1;
            }
        }
        (a, b)
    }
}

/// A potential connection between an arrival and a departure.
#[derive(Debug, Clone, Copy)]
pub struct TransferWindow {
    pub min_transfer_minutes: i64,
    pub max_transfer_minutes: i64,
    pub is_critical: bool,
}

/// Tracks potential connecting flights and marks critical connections.
#[derive(Debug, Clone, Default)]
pub struct FlightConnectionTracker {
    connections: HashMap<(String, String), TransferWindow>,
}

impl FlightConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection between `flights[arrival_idx]` (an arrival) and
    /// `flights[departure_idx]` (a departure). If `window.is_critical`, both
    /// flights' `is_critical_connection` flag is set, matching
    /// `FlightConnectionTracker.add_connection` in `original_source`.
    pub fn add_connection(
        &mut self,
        flights: &mut [Flight],
        arrival_idx: usize,
        departure_idx: usize,
        window: TransferWindow,
    ) {
        assert!(flights[arrival_idx].is_arrival, "arrival_idx must be an arrival");
        assert!(!flights[departure_idx].is_arrival, "departure_idx must be a departure");
        let key = (
            flights[arrival_idx].flight_id.clone(),
            flights[departure_idx].flight_id.clone(),
        );
        if window.is_critical {
            flights[arrival_idx].is_critical_connection = true;
            flights[departure_idx].is_critical_connection = true;
        }
        self.connections.insert(key, window);
    }

    pub fn get_transfer_window(&self, arrival: &Flight, departure: &Flight) -> Option<&TransferWindow> {
        self.connections
            .get(&(arrival.flight_id.clone(), departure.flight_id.clone()))
    }

    /// True iff the transfer time between `arrival` and `departure` falls
    /// within the registered window (spec.md §4.5).
    pub fn is_valid_connection_time(&self, arrival: &Flight, departure: &Flight) -> bool {
        match self.get_transfer_window(arrival, departure) {
            Some(w) => {
                let diff = minutes_between(arrival.scheduled_time, departure.scheduled_time);
                w.min_transfer_minutes <= diff && diff <= w.max_transfer_minutes
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &TransferWindow)> {
        self.connections.iter()
    }
}

/// Either a single arrival/departure or a linked arrival->departure
/// turnaround pair, referenced by index into the engine's flight list.
#[derive(Debug, Clone, Copy)]
pub enum FlightOperationUnit {
    Single { flight_idx: usize },
    Linked {
        arrival_idx: usize,
        departure_idx: usize,
    },
}

impl FlightOperationUnit {
    pub fn earliest_time(&self, flights: &[Flight]) -> Timestamp {
        match *self {
            FlightOperationUnit::Single { flight_idx } => flights[flight_idx].scheduled_time,
            FlightOperationUnit::Linked { arrival_idx, .. } => flights[arrival_idx].scheduled_time,
        }
    }

    /// The arrival when present, else the departure — used as the sort key
    /// and criticality-score source (spec.md §4.4).
    pub fn primary_idx(&self) -> usize {
        match *self {
            FlightOperationUnit::Single { flight_idx } => flight_idx,
            FlightOperationUnit::Linked { arrival_idx, .. } => arrival_idx,
        }
    }

    pub fn airline_code<'a>(&self, flights: &'a [Flight]) -> &'a str {
        &flights[self.primary_idx()].airline_code
    }

    /// Compute `[start, end)` minutes for this unit (spec.md §4.6 step 1).
    pub fn occupancy_minutes(
        &self,
        flights: &[Flight],
        epoch: &Epoch,
        settings: &Settings,
    ) -> (i64, i64) {
        match *self {
            FlightOperationUnit::Linked {
                arrival_idx,
                departure_idx,
            } => epoch.to_interval_minutes(
                flights[arrival_idx].scheduled_time,
                flights[departure_idx].scheduled_time,
            ),
            FlightOperationUnit::Single { flight_idx } => {
                let flight = &flights[flight_idx];
                let turnaround = settings
                    .turnaround_times
                    .minutes_for(flight.aircraft_category());
                let t = epoch.to_minutes(flight.scheduled_time);
                if flight.is_arrival {
                    (t, t + turnaround)
                } else {
                    (t - turnaround, t)
                }
            }
        }
    }
}
