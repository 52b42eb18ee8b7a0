//! C5: Candidate Selector — filters and ranks stands for a flight.

use std::collections::HashMap;

use crate::domain::{Airline, Flight, FlightConnectionTracker, Stand};
use crate::time::is_compatible;

/// Adjacency rule check. The stub default (spec.md §9 open question) always
/// passes; the extension point is the `adjacency_rules` map on [`Stand`].
fn passes_adjacency_rules(_stand: &Stand) -> bool {
    true
}

fn hard_filter<'a>(
    stands: &'a [Stand],
    flight: &Flight,
    airline: Option<&Airline>,
) -> Vec<&'a Stand> {
    stands
        .iter()
        .filter(|stand| {
            if let Some(a) = airline {
                if a.base_terminal != stand.terminal {
                    return false;
                }
            }
            if !is_compatible(flight.aircraft_category(), stand.size_limit) {
                return false;
            }
            if let Some(a) = airline {
                if a.requires_contact_stand && !stand.is_contact_stand {
                    return false;
                }
            }
            passes_adjacency_rules(stand)
        })
        .collect()
}

/// Terminals of already-allocated flights that form a valid connection with
/// `flight`, per the connection tracker's time-window predicate (spec.md
/// §4.5).
fn connecting_terminals(
    flight: &Flight,
    flights: &[Flight],
    tracker: &FlightConnectionTracker,
    flight_terminals: &HashMap<String, String>,
) -> Vec<String> {
    let mut terminals = Vec::new();
    for other in flights {
        if flight.is_arrival {
            if !other.is_arrival && tracker.is_valid_connection_time(flight, other) {
                if let Some(t) = flight_terminals.get(&other.flight_id) {
                    terminals.push(t.clone());
                }
            }
        } else if other.is_arrival && tracker.is_valid_connection_time(other, flight) {
            if let Some(t) = flight_terminals.get(&other.flight_id) {
                terminals.push(t.clone());
            }
        }
    }
    terminals
}

fn terminal_proximity_score(stand_terminal: &str, connecting_terminals: &[String]) -> f64 {
    if connecting_terminals.is_empty() {
        return 0.0;
    }
    let matches = connecting_terminals
        .iter()
        .filter(|t| t.as_str() == stand_terminal)
        .count();
    matches as f64 / connecting_terminals.len() as f64 * 100.0
}

/// Produce an ordered list of candidate stands for `flight` (spec.md §4.5).
/// `flight_terminals` is the running map of already-allocated flights'
/// terminals, maintained by the greedy allocator.
pub fn select_candidates<'a>(
    stands: &'a [Stand],
    flight: &Flight,
    airline: Option<&Airline>,
    all_flights: &[Flight],
    tracker: &FlightConnectionTracker,
    flight_terminals: &HashMap<String, String>,
) -> Vec<&'a Stand> {
    let candidates = hard_filter(stands, flight, airline);
    let connecting = connecting_terminals(flight, all_flights, tracker, flight_terminals);
    if connecting.is_empty() {
        return candidates;
    }

    let mut scored: Vec<(&Stand, f64)> = candidates
        .into_iter()
        .map(|s| {
            let score = terminal_proximity_score(&s.terminal, &connecting);
            (s, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(s, _)| s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Flight, TransferWindow};
    use crate::time::SizeLimit;

    fn stand(name: &str, terminal: &str, contact: bool, size: SizeLimit) -> Stand {
        Stand {
            stand_name: name.into(),
            terminal: terminal.into(),
            is_contact_stand: contact,
            size_limit: size,
            adjacency_rules: HashMap::new(),
        }
    }

    fn airline(terminal: &str, contact_required: bool) -> Airline {
        Airline {
            airline_code: "AA".into(),
            airline_name: "Test".into(),
            base_terminal: terminal.into(),
            requires_contact_stand: contact_required,
            priority_tier: 1,
        }
    }

    #[test]
    fn filters_by_terminal_size_and_contact() {
        let stands = vec![
            stand("A1", "T1", true, SizeLimit::Narrow),
            stand("A2", "T2", true, SizeLimit::Narrow),
            stand("A3", "T1", false, SizeLimit::Narrow),
            stand("A4", "T1", true, SizeLimit::Super),
        ];
        let flight = Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap();
        let a = airline("T1", true);
        let candidates = select_candidates(
            &stands,
            &flight,
            Some(&a),
            &[],
            &FlightConnectionTracker::new(),
            &HashMap::new(),
        );
        let names: Vec<&str> = candidates.iter().map(|s| s.stand_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A4"]);
    }

    #[test]
    fn reranks_by_connection_proximity() {
        let stands = vec![
            stand("T1-A", "T1", true, SizeLimit::Narrow),
            stand("T2-A", "T2", true, SizeLimit::Narrow),
        ];
        let arrival =
            Flight::new("ARR", "ARR", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap();
        let departure =
            Flight::new("DEP", "DEP", "AA", "A320", "LHR", "CDG", "09:00", "T2", false, None, 0).unwrap();
        let mut tracker = FlightConnectionTracker::new();
        let mut flights = vec![arrival.clone(), departure.clone()];
        tracker.add_connection(
            &mut flights,
            0,
            1,
            TransferWindow {
                min_transfer_minutes: 30,
                max_transfer_minutes: 120,
                is_critical: false,
            },
        );
        let mut flight_terminals = HashMap::new();
        flight_terminals.insert("DEP".to_string(), "T2".to_string());

        // querying for the arrival: no airline filter by terminal, both stands pass
        let candidates = select_candidates(&stands, &arrival, None, &flights, &tracker, &flight_terminals);
        assert_eq!(candidates[0].stand_name, "T2-A");
    }
}
