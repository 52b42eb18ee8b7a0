//! C7: CP Allocator — a constraint-programming-flavoured allocation pass for
//! large scenarios, built on [`good_lp`]'s mixed-integer solver (no Rust
//! crate binds Google OR-Tools CP-SAT; `good_lp` over its pure-Rust `microlp`
//! backend is the closest real, fetchable equivalent — see DESIGN.md).
//!
//! Per-unit occupancy windows are computed exactly as the greedy allocator
//! computes them (spec.md §4.6 step 1) rather than left as free variables:
//! since those windows are fixed ahead of time, stand/flight overlap is known
//! before solving, and the no-overlap-with-gap and maintenance constraints
//! reduce to simple pairwise exclusion constraints rather than CP-SAT's
//! `NoOverlap` interval variables. This keeps the combinatorial core — which
//! unit gets which stand, maximizing total criticality — while trading away
//! CP-SAT's ability to also shift turnaround boundaries within their slack.

use std::collections::HashMap;

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, Solution, SolverModel, Variable,
    WithTimeLimit,
};

use crate::candidates::select_candidates;
use crate::collaborators::AiSupport;
use crate::domain::{Airline, Flight, FlightConnectionTracker, FlightOperationUnit, Settings, Stand};
use crate::report::{reasons, AllocatedRecord, UnallocatedRecord};
use crate::time::Epoch;

/// A maintenance window expressed in epoch minutes, as prepared by the
/// engine orchestrator.
pub struct MaintenanceWindow<'a> {
    pub stand_name: &'a str,
    pub start: i64,
    pub end: i64,
}

#[allow(clippy::too_many_arguments)]
pub fn run_cp(
    flights: &[Flight],
    stands: &[Stand],
    airlines: &HashMap<String, Airline>,
    settings: &Settings,
    epoch: &Epoch,
    tracker: &FlightConnectionTracker,
    order: &[FlightOperationUnit],
    maintenance: &[MaintenanceWindow],
    ai_support: &mut dyn AiSupport,
) -> Result<(Vec<AllocatedRecord>, Vec<UnallocatedRecord>), good_lp::ResolutionError> {
    let gap = settings.gap_between_flights_minutes;
    let time_only = flights.first().map(|f| f.scheduled_time.is_time_only()).unwrap_or(true);
    let empty_flights: &[Flight] = &[];
    let empty_terminals = HashMap::new();

    // Per-unit window and candidate stand set, computed once up front —
    // mirrors `StandAllocationCPSolver.prepare_flights_data`.
    let windows: Vec<(i64, i64)> = order
        .iter()
        .map(|u| u.occupancy_minutes(flights, epoch, settings))
        .collect();
    let candidate_stands: Vec<Vec<usize>> = order
        .iter()
        .enumerate()
        .map(|(u_idx, u)| {
            let primary = &flights[u.primary_idx()];
            let airline = airlines.get(&primary.airline_code);
            let candidates = select_candidates(stands, primary, airline, empty_flights, tracker, &empty_terminals);
            let (qs, qe) = (windows[u_idx].0 - gap, windows[u_idx].1 + gap);
            candidates
                .into_iter()
                .filter_map(|s| stands.iter().position(|cs| cs.stand_name == s.stand_name))
                .filter(|&stand_idx| {
                    !maintenance
                        .iter()
                        .any(|m| m.stand_name == stands[stand_idx].stand_name && qs < m.end && qe > m.start)
                })
                .collect()
        })
        .collect();

    let mut vars = ProblemVariables::new();
    let mut assign: HashMap<(usize, usize), Variable> = HashMap::new();
    for (u_idx, stand_list) in candidate_stands.iter().enumerate() {
        for &stand_idx in stand_list {
            assign.insert((u_idx, stand_idx), vars.add(variable().binary()));
        }
    }

    if assign.is_empty() {
        for unit in order {
            record_unallocated(unit, flights, reasons::NO_SUITABLE_STAND_CP_SOLVER, ai_support);
        }
        return Ok((
            Vec::new(),
            all_unallocated(order, flights, reasons::NO_SUITABLE_STAND_CP_SOLVER),
        ));
    }

    let weight_of = |u_idx: usize| -> f64 {
        let primary = &flights[order[u_idx].primary_idx()];
        (primary.criticality_score * 100.0).floor() + 1.0
    };

    let objective: Expression = assign
        .iter()
        .map(|(&(u_idx, _), &v)| v * weight_of(u_idx))
        .sum();

    let mut model = vars
        .maximise(objective)
        .using(default_solver)
        .with_time_limit(settings.solver_parameters.solver_time_limit_seconds as f64);

    // Each unit assigned to at most one stand.
    for (u_idx, stand_list) in candidate_stands.iter().enumerate() {
        if stand_list.is_empty() {
            continue;
        }
        let expr: Expression = stand_list.iter().map(|&s| assign[&(u_idx, s)]).sum();
        model = model.with(constraint!(expr <= 1));
    }

    // No two overlapping units on the same stand (gap-expanded).
    for s_idx in 0..stands.len() {
        let using_stand: Vec<usize> = (0..order.len())
            .filter(|&u| candidate_stands[u].contains(&s_idx))
            .collect();
        for (i, &ua) in using_stand.iter().enumerate() {
            for &ub in &using_stand[i + 1..] {
                let (sa, ea) = windows[ua];
                let (sb, eb) = windows[ub];
                if sa - gap < eb + gap && sb - gap < ea + gap {
                    let va = assign[&(ua, s_idx)];
                    let vb = assign[&(ub, s_idx)];
                    model = model.with(constraint!(va + vb <= 1));
                }
            }
        }
    }

    let solution = model.solve()?;

    let mut allocated = Vec::new();
    let mut unallocated = Vec::new();
    for (u_idx, unit) in order.iter().enumerate() {
        let chosen = candidate_stands[u_idx]
            .iter()
            .find(|&&s| solution.value(assign[&(u_idx, s)]) > 0.5);
        match chosen {
            Some(&s_idx) => {
                let stand = &stands[s_idx];
                let (start, end) = windows[u_idx];
                for flight in units_flights(unit, flights) {
                    allocated.push(AllocatedRecord {
                        flight_id: flight.flight_id.clone(),
                        stand_name: stand.stand_name.clone(),
                        start_time: epoch.format_minutes(start, time_only),
                        end_time: epoch.format_minutes(end, time_only),
                    });
                }
            }
            None => {
                let reason = reasons::NO_SUITABLE_STAND_CP_SOLVER;
                record_unallocated(unit, flights, reason, ai_support);
                for flight in units_flights(unit, flights) {
                    unallocated.push(UnallocatedRecord {
                        flight_id: flight.flight_id.clone(),
                        reason: reason.to_string(),
                    });
                }
            }
        }
    }

    Ok((allocated, unallocated))
}

fn units_flights<'a>(unit: &FlightOperationUnit, flights: &'a [Flight]) -> Vec<&'a Flight> {
    match *unit {
        FlightOperationUnit::Single { flight_idx } => vec![&flights[flight_idx]],
        FlightOperationUnit::Linked { arrival_idx, departure_idx } => {
            vec![&flights[arrival_idx], &flights[departure_idx]]
        }
    }
}

fn record_unallocated(unit: &FlightOperationUnit, flights: &[Flight], reason: &str, ai_support: &mut dyn AiSupport) {
    for flight in units_flights(unit, flights) {
        ai_support.log_unallocated(&flight.flight_id, reason);
    }
}

fn all_unallocated(order: &[FlightOperationUnit], flights: &[Flight], reason: &str) -> Vec<UnallocatedRecord> {
    order
        .iter()
        .flat_map(|u| units_flights(u, flights))
        .map(|f| UnallocatedRecord {
            flight_id: f.flight_id.clone(),
            reason: reason.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::LoggingAiSupport;
    use crate::domain::FlightConnectionTracker;
    use crate::time::SizeLimit;
    use crate::order::build_processing_order;
    use std::collections::HashMap as Map;

    fn stand(name: &str, terminal: &str, size: SizeLimit) -> Stand {
        Stand {
            stand_name: name.into(),
            terminal: terminal.into(),
            is_contact_stand: true,
            size_limit: size,
            adjacency_rules: Map::new(),
        }
    }

    #[test]
    fn allocates_non_conflicting_flights_to_distinct_stands() {
        let flights = vec![
            Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
            Flight::new("F2", "F2", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
        ];
        let stands = vec![
            stand("A1", "T1", SizeLimit::Narrow),
            stand("A2", "T1", SizeLimit::Narrow),
        ];
        let settings = Settings::default();
        let epoch = Epoch::from_earliest(flights.iter().map(|f| f.scheduled_time));
        let tracker = FlightConnectionTracker::new();
        let order = build_processing_order(&flights);
        let mut ai = LoggingAiSupport::default();

        let (allocated, unallocated) = run_cp(
            &flights,
            &stands,
            &Map::new(),
            &settings,
            &epoch,
            &tracker,
            &order,
            &[],
            &mut ai,
        )
        .unwrap();
        assert_eq!(allocated.len(), 2);
        assert!(unallocated.is_empty());
        let stands_used: std::collections::HashSet<_> =
            allocated.iter().map(|r| r.stand_name.clone()).collect();
        assert_eq!(stands_used.len(), 2);
    }

    #[test]
    fn single_stand_cannot_hold_two_overlapping_flights() {
        let flights = vec![
            Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 5).unwrap(),
            Flight::new("F2", "F2", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 1).unwrap(),
        ];
        let stands = vec![stand("A1", "T1", SizeLimit::Narrow)];
        let settings = Settings::default();
        let epoch = Epoch::from_earliest(flights.iter().map(|f| f.scheduled_time));
        let tracker = FlightConnectionTracker::new();
        let order = build_processing_order(&flights);
        let mut ai = LoggingAiSupport::default();

        let (allocated, unallocated) = run_cp(
            &flights,
            &stands,
            &Map::new(),
            &settings,
            &epoch,
            &tracker,
            &order,
            &[],
            &mut ai,
        )
        .unwrap();
        assert_eq!(allocated.len(), 1);
        assert_eq!(unallocated.len(), 1);
    }
}
