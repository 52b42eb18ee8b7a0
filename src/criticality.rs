//! C3: Criticality Scorer — per-flight priority scores from weight maps.

use std::collections::HashMap;

use crate::domain::{Airline, Flight, PrioritizationWeights, Settings};
use crate::time::classify_aircraft;

/// Score and mutate `flight.criticality_score` in place (spec.md §4.3). No
/// failure mode: missing airline lookups simply skip the airline-dependent
/// terms.
pub fn score_flight(flight: &mut Flight, airline: Option<&Airline>, weights: &PrioritizationWeights) {
    let mut score = flight.base_priority_score as f64 * weights.base_score;

    let aircraft_type = flight.aircraft_type.as_str();
    if aircraft_type.contains("A380") {
        score += weights.aircraft_type_a380;
    } else if aircraft_type.contains("B747") {
        score += weights.aircraft_type_b747;
    } else if ["B777", "B787", "A330", "A350"]
        .iter()
        .any(|t| aircraft_type.contains(t))
    {
        score += weights.aircraft_type_wide;
    }

    if let Some(a) = airline {
        score += a.priority_tier as f64 * weights.airline_tier;
        if a.requires_contact_stand {
            score += weights.requires_contact_stand;
        }
    }

    if flight.is_critical_connection {
        score += weights.critical_connection;
    }

    flight.criticality_score = score;
}

/// Score every flight in place, given an airline lookup by code.
pub fn score_all(flights: &mut [Flight], airlines: &HashMap<String, Airline>, settings: &Settings) {
    for flight in flights.iter_mut() {
        let airline = airlines.get(&flight.airline_code);
        score_flight(flight, airline, &settings.prioritization_weights);
    }
}

/// Classify an aircraft type; re-exported here for callers that only deal
/// with criticality (the scorer's A380/B747/wide checks are substring-based
/// like the category classifier, but intentionally not the same three lists
/// — spec.md §4.3 is explicit about which substrings carry weight).
pub fn aircraft_category(aircraft_type: &str) -> crate::time::AircraftCategory {
    classify_aircraft(aircraft_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flight;

    fn flight(aircraft: &str, base: i64, critical: bool) -> Flight {
        let mut f = Flight::new(
            "F1", "F1", "AA", aircraft, "JFK", "LHR", "08:00", "T1", true, None, base,
        )
        .unwrap();
        f.is_critical_connection = critical;
        f
    }

    #[test]
    fn weights_combine_additively() {
        let weights = PrioritizationWeights::default();
        let airline = Airline {
            airline_code: "AA".into(),
            airline_name: "Test".into(),
            base_terminal: "T1".into(),
            requires_contact_stand: true,
            priority_tier: 2,
        };
        let mut f = flight("A380", 3, true);
        score_flight(&mut f, Some(&airline), &weights);
        // base(3*1) + A380(10) + tier(2*2) + contact(3) + critical(5)
        assert_eq!(f.criticality_score, 3.0 + 10.0 + 4.0 + 3.0 + 5.0);
    }

    #[test]
    fn unknown_airline_skips_tier_terms() {
        let weights = PrioritizationWeights::default();
        let mut f = flight("A320", 0, false);
        score_flight(&mut f, None, &weights);
        assert_eq!(f.criticality_score, 0.0);
    }

    #[test]
    fn higher_criticality_beats_lower_s6() {
        // Mirrors spec.md S6: A380 + critical connection outranks a bare A320.
        let weights = PrioritizationWeights::default();
        let mut f7 = flight("A380", 0, true);
        let mut f8 = flight("A320", 0, false);
        score_flight(&mut f7, None, &weights);
        score_flight(&mut f8, None, &weights);
        assert!(f7.criticality_score > f8.criticality_score);
    }
}
