//! C8: Engine Orchestrator — owns the domain state for one allocation run
//! and dispatches between the greedy and CP allocators (spec.md §4.7).

use std::collections::{HashMap, HashSet};

use crate::collaborators::AiSupport;
use crate::cp::{self, MaintenanceWindow};
use crate::domain::{
    Airline, Flight, FlightConnectionTracker, MaintenanceEntry, Settings, Stand, TransferWindow,
};
use crate::error::EngineError;
use crate::greedy;
use crate::occupancy::OccupancyIndex;
use crate::order::build_processing_order;
use crate::report::{AllocatedRecord, UnallocatedRecord};
use crate::time::Epoch;

/// Above this many flights the CP allocator is skipped in favor of greedy,
/// unless `force_solver` is set (spec.md §4.7; matches
/// `StandAllocationEngine.run_allocation`'s `25000` threshold).
const CP_FLIGHT_THRESHOLD: usize = 25_000;

/// One allocation scenario: flights, stands, airlines, settings and
/// maintenance, validated at construction time.
#[derive(Debug)]
pub struct Engine {
    flights: Vec<Flight>,
    stands: Vec<Stand>,
    airlines: HashMap<String, Airline>,
    settings: Settings,
    maintenance: Vec<MaintenanceEntry>,
    connection_tracker: FlightConnectionTracker,
    epoch: Epoch,
}

impl Engine {
    /// Validate and assemble a scenario. Checks for duplicate identifiers and
    /// malformed link groups (spec.md §7 items 2-4); everything past this
    /// point can assume those invariants hold.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flights: Vec<Flight>,
        stands: Vec<Stand>,
        airlines: Vec<Airline>,
        settings: Settings,
        maintenance: Vec<MaintenanceEntry>,
        connections: Vec<(String, String, TransferWindow)>,
    ) -> Result<Self, EngineError> {
        let mut seen_flight_ids = HashSet::new();
        for f in &flights {
            if !seen_flight_ids.insert(f.flight_id.clone()) {
                return Err(EngineError::DuplicateFlightId(f.flight_id.clone()));
            }
        }

        let mut seen_stand_names = HashSet::new();
        for s in &stands {
            if !seen_stand_names.insert(s.stand_name.clone()) {
                return Err(EngineError::DuplicateStandName(s.stand_name.clone()));
            }
        }

        let mut airline_map = HashMap::new();
        for a in airlines {
            let code = a.airline_code.clone();
            if airline_map.insert(code.clone(), a).is_some() {
                return Err(EngineError::DuplicateAirlineCode(code));
            }
        }

        validate_link_groups(&flights)?;

        let epoch = Epoch::from_earliest(
            flights
                .iter()
                .map(|f| f.scheduled_time)
                .chain(maintenance.iter().flat_map(|m| [m.start_time, m.end_time])),
        );

        let mut flights = flights;
        let mut connection_tracker = FlightConnectionTracker::new();
        for (arrival_id, departure_id, window) in connections {
            let arrival_idx = flights
                .iter()
                .position(|f| f.flight_id == arrival_id)
                .ok_or_else(|| EngineError::InvalidLinkGroup(arrival_id.clone()))?;
            let departure_idx = flights
                .iter()
                .position(|f| f.flight_id == departure_id)
                .ok_or_else(|| EngineError::InvalidLinkGroup(departure_id.clone()))?;
            connection_tracker.add_connection(&mut flights, arrival_idx, departure_idx, window);
        }

        crate::criticality::score_all(&mut flights, &airline_map, &settings);

        Ok(Engine {
            flights,
            stands,
            airlines: airline_map,
            settings,
            maintenance,
            connection_tracker,
            epoch,
        })
    }

    fn build_occupancy_index(&self) -> OccupancyIndex {
        let mut occupancy = OccupancyIndex::new(self.stands.iter().map(|s| s.stand_name.clone()));
        for entry in &self.maintenance {
            let (start, end) = self.epoch.to_interval_minutes(entry.start_time, entry.end_time);
            occupancy.seed_maintenance(&entry.stand_name, start, end);
        }
        occupancy
    }

    fn maintenance_windows(&self) -> Vec<MaintenanceWindow<'_>> {
        self.maintenance
            .iter()
            .map(|m| {
                let (start, end) = self.epoch.to_interval_minutes(m.start_time, m.end_time);
                MaintenanceWindow {
                    stand_name: &m.stand_name,
                    start,
                    end,
                }
            })
            .collect()
    }

    /// Run the allocation once, producing allocated and unallocated reports
    /// (spec.md §4.7). Dispatches to the CP allocator when
    /// `settings.solver_parameters.use_solver` is set and the scenario is
    /// small enough (or `force_solver` overrides the size check), falling
    /// back to the greedy allocator if the CP solver fails to find any
    /// solution at all.
    pub fn run(
        &self,
        ai_support: &mut dyn AiSupport,
    ) -> (Vec<AllocatedRecord>, Vec<UnallocatedRecord>) {
        let order = build_processing_order(&self.flights);
        let params = self.settings.solver_parameters;

        let try_cp = params.use_solver && (params.force_solver || self.flights.len() <= CP_FLIGHT_THRESHOLD);
        if try_cp {
            let windows = self.maintenance_windows();
            match cp::run_cp(
                &self.flights,
                &self.stands,
                &self.airlines,
                &self.settings,
                &self.epoch,
                &self.connection_tracker,
                &order,
                &windows,
                ai_support,
            ) {
                Ok(result) => return result,
                Err(e) => {
                    tracing::warn!(error = %e, "CP allocator failed, falling back to greedy");
                }
            }
        }

        let mut occupancy = self.build_occupancy_index();
        let mut flight_terminals = HashMap::new();
        greedy::run_greedy(
            &self.flights,
            &self.stands,
            &self.airlines,
            &self.settings,
            &self.epoch,
            &self.connection_tracker,
            &order,
            &mut occupancy,
            &mut flight_terminals,
            ai_support,
        )
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn stands(&self) -> &[Stand] {
        &self.stands
    }
}

/// Enforce invariant 1 (spec.md §7 item 4) at construction time: a link_id
/// may group at most one arrival and at most one departure.
fn validate_link_groups(flights: &[Flight]) -> Result<(), EngineError> {
    let mut seen: HashMap<&str, (bool, bool)> = HashMap::new();
    for f in flights {
        if let Some(link_id) = &f.link_id {
            let entry = seen.entry(link_id.as_str()).or_insert((false, false));
            if f.is_arrival {
                if entry.0 {
                    return Err(EngineError::InvalidLinkGroup(link_id.clone()));
                }
                entry.0 = true;
            } else {
                if entry.1 {
                    return Err(EngineError::InvalidLinkGroup(link_id.clone()));
                }
                entry.1 = true;
            }
        }
    }
    Ok(())
}
