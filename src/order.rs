//! C4: Processing-Order Builder — groups linked pairs, forms operation
//! units, sorts by (criticality desc, earliest-time asc).

use std::collections::HashMap;

use crate::domain::{Flight, FlightOperationUnit};

/// Build the ordered sequence of operation units (spec.md §4.4).
///
/// Flights are grouped by `link_id`; a group with both an arrival and a
/// departure becomes a linked pair, a degenerate one-sided group degrades to
/// a single unit. Units are then sorted by `(-criticality_score, earliest_time)`
/// with ties broken by insertion (grouping) order — `Vec::sort_by` is a
/// stable sort, so this falls out of the comparator alone.
///
/// Panics if a `link_id` groups more than one arrival or more than one
/// departure (spec.md invariant 1; a programmer error per §7 item 4).
pub fn build_processing_order(flights: &[Flight]) -> Vec<FlightOperationUnit> {
    let mut by_link: HashMap<&str, (Option<usize>, Option<usize>)> = HashMap::new();
    let mut link_order: Vec<&str> = Vec::new();
    let mut units = Vec::new();

    for (idx, flight) in flights.iter().enumerate() {
        match &flight.link_id {
            Some(link_id) => {
                let entry = by_link.entry(link_id.as_str()).or_insert_with(|| {
                    link_order.push(link_id.as_str());
                    (None, None)
                });
                if flight.is_arrival {
                    assert!(
                        entry.0.is_none(),
                        "link_id {link_id:?} groups more than one arrival"
                    );
                    entry.0 = Some(idx);
                } else {
                    assert!(
                        entry.1.is_none(),
                        "link_id {link_id:?} groups more than one departure"
                    );
                    entry.1 = Some(idx);
                }
            }
            None => units.push(FlightOperationUnit::Single { flight_idx: idx }),
        }
    }

    for link_id in link_order {
        let (arrival, departure) = by_link[link_id];
        match (arrival, departure) {
            (Some(a), Some(d)) => units.push(FlightOperationUnit::Linked {
                arrival_idx: a,
                departure_idx: d,
            }),
            (Some(a), None) => units.push(FlightOperationUnit::Single { flight_idx: a }),
            (None, Some(d)) => units.push(FlightOperationUnit::Single { flight_idx: d }),
            (None, None) => unreachable!("link group registered with no flights"),
        }
    }

    units.sort_by(|a, b| {
        let fa = &flights[a.primary_idx()];
        let fb = &flights[b.primary_idx()];
        fb.criticality_score
            .partial_cmp(&fa.criticality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.earliest_time(flights).cmp(&b.earliest_time(flights)))
    });

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flight;

    fn f(id: &str, time: &str, arrival: bool, link: Option<&str>, score: f64) -> Flight {
        let mut flight = Flight::new(
            id, id, "AA", "A320", "JFK", "LHR", time, "T1", arrival, link.map(String::from), 0,
        )
        .unwrap();
        flight.criticality_score = score;
        flight
    }

    #[test]
    fn groups_linked_pairs() {
        let flights = vec![
            f("ARR1", "09:00", true, Some("L1"), 1.0),
            f("DEP1", "10:30", false, Some("L1"), 1.0),
        ];
        let units = build_processing_order(&flights);
        assert_eq!(units.len(), 1);
        assert!(matches!(units[0], FlightOperationUnit::Linked { .. }));
    }

    #[test]
    fn degenerate_link_group_becomes_single() {
        let flights = vec![f("ARR1", "09:00", true, Some("L1"), 1.0)];
        let units = build_processing_order(&flights);
        assert_eq!(units.len(), 1);
        assert!(matches!(units[0], FlightOperationUnit::Single { .. }));
    }

    #[test]
    fn sorts_by_criticality_desc_then_time_asc() {
        let flights = vec![
            f("LOW", "08:00", true, None, 1.0),
            f("HIGH", "09:00", true, None, 10.0),
            f("MID_EARLY", "07:00", true, None, 5.0),
        ];
        let units = build_processing_order(&flights);
        let ids: Vec<&str> = units
            .iter()
            .map(|u| flights[u.primary_idx()].flight_id.as_str())
            .collect();
        assert_eq!(ids, vec!["HIGH", "MID_EARLY", "LOW"]);
    }

    #[test]
    #[should_panic(expected = "more than one arrival")]
    fn rejects_duplicate_arrival_in_link_group() {
        let flights = vec![
            f("A1", "09:00", true, Some("L1"), 1.0),
            f("A2", "09:30", true, Some("L1"), 1.0),
        ];
        build_processing_order(&flights);
    }
}
