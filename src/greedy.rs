//! C6: Greedy Allocator — processes operation units in C4's order, assigning
//! each to the first available candidate stand (spec.md §4.6).

use std::collections::HashMap;

use crate::candidates::select_candidates;
use crate::collaborators::AiSupport;
use crate::domain::{Airline, Flight, FlightConnectionTracker, FlightOperationUnit, Settings, Stand};
use crate::occupancy::OccupancyIndex;
use crate::report::{reasons, AllocatedRecord, UnallocatedRecord};
use crate::time::Epoch;

/// Run the greedy allocator over `order`, mutating `occupancy` as stands are
/// claimed and `flight_terminals` as flights are placed (consumed by later
/// units' connection-proximity scoring).
#[allow(clippy::too_many_arguments)]
pub fn run_greedy(
    flights: &[Flight],
    stands: &[Stand],
    airlines: &HashMap<String, Airline>,
    settings: &Settings,
    epoch: &Epoch,
    tracker: &FlightConnectionTracker,
    order: &[FlightOperationUnit],
    occupancy: &mut OccupancyIndex,
    flight_terminals: &mut HashMap<String, String>,
    ai_support: &mut dyn AiSupport,
) -> (Vec<AllocatedRecord>, Vec<UnallocatedRecord>) {
    let gap = settings.gap_between_flights_minutes;
    let time_only = flights.first().map(|f| f.scheduled_time.is_time_only()).unwrap_or(true);

    let mut allocated = Vec::new();
    let mut unallocated = Vec::new();

    for unit in order {
        let (start, end) = unit.occupancy_minutes(flights, epoch, settings);
        let query_start = start - gap;
        let query_end = end + gap;

        let primary = &flights[unit.primary_idx()];
        let airline = airlines.get(&primary.airline_code);
        let candidates = select_candidates(stands, primary, airline, flights, tracker, flight_terminals);

        let reason = if matches!(unit, FlightOperationUnit::Linked { .. }) {
            reasons::NO_SUITABLE_STAND_LINKED_PAIR
        } else {
            reasons::NO_SUITABLE_STAND
        };

        if candidates.is_empty() {
            record_unallocated(unit, flights, reason, &mut unallocated, ai_support);
            continue;
        }

        let mut chosen: Option<&Stand> = None;
        for stand in &candidates {
            if !occupancy.has_overlap(&stand.stand_name, query_start, query_end) {
                chosen = Some(stand);
                break;
            }
        }

        match chosen {
            Some(stand) => {
                occupancy.insert_flight(&stand.stand_name, start, end);
                for flight in units_flights(unit, flights) {
                    flight_terminals.insert(flight.flight_id.clone(), stand.terminal.clone());
                    allocated.push(AllocatedRecord {
                        flight_id: flight.flight_id.clone(),
                        stand_name: stand.stand_name.clone(),
                        start_time: epoch.format_minutes(start, time_only),
                        end_time: epoch.format_minutes(end, time_only),
                    });
                }
            }
            None => {
                record_unallocated(unit, flights, reason, &mut unallocated, ai_support);
            }
        }
    }

    (allocated, unallocated)
}

fn units_flights<'a>(unit: &FlightOperationUnit, flights: &'a [Flight]) -> Vec<&'a Flight> {
    match *unit {
        FlightOperationUnit::Single { flight_idx } => vec![&flights[flight_idx]],
        FlightOperationUnit::Linked { arrival_idx, departure_idx } => {
            vec![&flights[arrival_idx], &flights[departure_idx]]
        }
    }
}

fn record_unallocated(
    unit: &FlightOperationUnit,
    flights: &[Flight],
    reason: &str,
    unallocated: &mut Vec<UnallocatedRecord>,
    ai_support: &mut dyn AiSupport,
) {
    for flight in units_flights(unit, flights) {
        ai_support.log_unallocated(&flight.flight_id, reason);
        unallocated.push(UnallocatedRecord {
            flight_id: flight.flight_id.clone(),
            reason: reason.to_string(),
        });
    }
}
