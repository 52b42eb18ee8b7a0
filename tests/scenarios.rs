//! End-to-end coverage of the concrete scenarios: single-flight fit, linked
//! turnaround, gap enforcement, size mismatch, maintenance block and
//! criticality ordering.

use std::collections::HashMap;

use stand_allocation_engine::collaborators::LoggingAiSupport;
use stand_allocation_engine::report::reasons;
use stand_allocation_engine::{Airline, Engine, Flight, MaintenanceEntry, Settings, SizeLimit, Stand};

fn stand(name: &str, terminal: &str, contact: bool, size: SizeLimit) -> Stand {
    Stand {
        stand_name: name.into(),
        terminal: terminal.into(),
        is_contact_stand: contact,
        size_limit: size,
        adjacency_rules: HashMap::new(),
    }
}

fn airline_aa() -> Airline {
    Airline {
        airline_code: "AA".into(),
        airline_name: "Test Airline".into(),
        base_terminal: "T1".into(),
        requires_contact_stand: true,
        priority_tier: 1,
    }
}

fn settings_with_gap(gap_minutes: i64) -> Settings {
    let mut settings = Settings::default();
    settings.gap_between_flights_minutes = gap_minutes;
    settings
}

#[test]
fn s1_single_flight_fit() {
    let flights = vec![
        Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
    ];
    let stands = vec![stand("A1", "T1", true, SizeLimit::Narrow)];
    let engine = Engine::new(flights, stands, vec![airline_aa()], settings_with_gap(15), vec![], vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai);
    assert_eq!(allocated.len(), 1);
    assert!(unallocated.is_empty());
    assert_eq!(allocated[0].stand_name, "A1");
    assert_eq!(allocated[0].start_time, "08:00");
    assert_eq!(allocated[0].end_time, "08:45");
}

#[test]
fn s2_linked_turnaround_shares_one_stand() {
    let flights = vec![
        Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
        Flight::new("F2", "F2", "AA", "A320", "JFK", "LHR", "09:00", "T1", true, Some("L1".into()), 0).unwrap(),
        Flight::new("F3", "F3", "AA", "A320", "T1", "CDG", "10:30", "T1", false, Some("L1".into()), 0).unwrap(),
    ];
    let stands = vec![stand("A1", "T1", true, SizeLimit::Narrow)];
    let engine = Engine::new(flights, stands, vec![airline_aa()], settings_with_gap(0), vec![], vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, _unallocated) = engine.run(&mut ai);
    let f2 = allocated.iter().find(|r| r.flight_id == "F2").expect("F2 allocated");
    let f3 = allocated.iter().find(|r| r.flight_id == "F3").expect("F3 allocated");
    assert_eq!(f2.stand_name, f3.stand_name);
    assert_eq!(f2.start_time, "09:00");
    assert_eq!(f3.end_time, "10:30");
}

#[test]
fn s3_gap_enforcement() {
    let flights = vec![
        Flight::new("F1", "F1", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
        Flight::new("F4", "F4", "AA", "A320", "JFK", "LHR", "08:45", "T1", true, None, 0).unwrap(),
    ];
    let stands = vec![stand("A1", "T1", true, SizeLimit::Narrow)];
    let engine = Engine::new(flights, stands, vec![airline_aa()], settings_with_gap(15), vec![], vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai);
    assert_eq!(allocated.len(), 1);
    assert_eq!(allocated[0].flight_id, "F1");
    assert_eq!(unallocated.len(), 1);
    assert_eq!(unallocated[0].flight_id, "F4");
    assert_eq!(unallocated[0].reason, reasons::NO_SUITABLE_STAND);
}

#[test]
fn s4_size_mismatch() {
    let flights = vec![
        Flight::new("F5", "F5", "AA", "A380", "JFK", "LHR", "12:00", "T1", true, None, 0).unwrap(),
    ];
    let stands = vec![stand("B1", "T1", true, SizeLimit::Narrow)];
    let engine = Engine::new(flights, stands, vec![airline_aa()], Settings::default(), vec![], vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai);
    assert!(allocated.is_empty());
    assert_eq!(unallocated.len(), 1);
    assert_eq!(unallocated[0].flight_id, "F5");
}

#[test]
fn s5_maintenance_block() {
    let flights = vec![
        Flight::new("F6", "F6", "AA", "A320", "JFK", "LHR", "10:30", "T1", true, None, 0).unwrap(),
    ];
    let stands = vec![stand("A1", "T1", true, SizeLimit::Narrow)];
    let maintenance = vec![MaintenanceEntry::new("A1", "10:00", "11:00").unwrap()];
    let engine = Engine::new(flights, stands, vec![airline_aa()], Settings::default(), maintenance, vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai);
    assert!(allocated.is_empty());
    assert_eq!(unallocated.len(), 1);
    assert_eq!(unallocated[0].flight_id, "F6");
}

#[test]
fn s6_criticality_order() {
    let flights = vec![
        Flight::new("F7", "F7", "AA", "A380", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
        Flight::new("F8", "F8", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 0).unwrap(),
    ];
    let stands = vec![stand("A1", "T1", true, SizeLimit::Super)];
    let engine = Engine::new(flights, stands, vec![airline_aa()], Settings::default(), vec![], vec![]).unwrap();
    let mut ai = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai);
    // F7's A380 weight (10.0) beats F8's bare base score, so F7 is processed
    // first and claims the only stand.
    assert_eq!(allocated.len(), 1);
    assert_eq!(allocated[0].flight_id, "F7");
    assert_eq!(unallocated.len(), 1);
    assert_eq!(unallocated[0].flight_id, "F8");
}
