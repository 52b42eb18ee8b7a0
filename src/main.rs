//! Demo runner: seeds a small stand-allocation scenario and prints the
//! resulting allocation report. Mirrors the spec's concrete scenarios (S1,
//! S2, S3, S6) so the output is directly checkable against them.

use std::collections::HashMap;

use stand_allocation_engine::collaborators::LoggingAiSupport;
use stand_allocation_engine::{Airline, Engine, Flight, MaintenanceEntry, Settings, SizeLimit, Stand};

fn seed_stands() -> Vec<Stand> {
    vec![
        Stand {
            stand_name: "T1-A1".into(),
            terminal: "T1".into(),
            is_contact_stand: true,
            size_limit: SizeLimit::Narrow,
            adjacency_rules: HashMap::new(),
        },
        Stand {
            stand_name: "T1-A2".into(),
            terminal: "T1".into(),
            is_contact_stand: true,
            size_limit: SizeLimit::Wide,
            adjacency_rules: HashMap::new(),
        },
        Stand {
            stand_name: "T1-R1".into(),
            terminal: "T1".into(),
            is_contact_stand: false,
            size_limit: SizeLimit::Super,
            adjacency_rules: HashMap::new(),
        },
        Stand {
            stand_name: "T2-A1".into(),
            terminal: "T2".into(),
            is_contact_stand: true,
            size_limit: SizeLimit::Narrow,
            adjacency_rules: HashMap::new(),
        },
        Stand {
            stand_name: "T2-R1".into(),
            terminal: "T2".into(),
            is_contact_stand: false,
            size_limit: SizeLimit::Super,
            adjacency_rules: HashMap::new(),
        },
    ]
}

fn seed_airlines() -> Vec<Airline> {
    vec![
        Airline {
            airline_code: "AA".into(),
            airline_name: "Atlantic Air".into(),
            base_terminal: "T1".into(),
            requires_contact_stand: true,
            priority_tier: 3,
        },
        Airline {
            airline_code: "BB".into(),
            airline_name: "Budget Birds".into(),
            base_terminal: "T2".into(),
            requires_contact_stand: false,
            priority_tier: 1,
        },
    ]
}

fn seed_flights() -> Vec<Flight> {
    vec![
        // S1: a single narrow-body arrival fits a same-terminal contact stand.
        Flight::new("AA101", "AA101", "AA", "A320", "JFK", "LHR", "08:00", "T1", true, None, 1)
            .expect("valid scenario flight"),
        // S2: a linked arrival/departure pair sharing a turnaround stand.
        Flight::new(
            "AA202",
            "AA202",
            "AA",
            "B787",
            "ORD",
            "T1",
            "10:00",
            "T1",
            true,
            Some("TURN-1".into()),
            2,
        )
        .expect("valid scenario flight"),
        Flight::new(
            "AA203",
            "AA203",
            "AA",
            "B787",
            "T1",
            "CDG",
            "11:30",
            "T1",
            false,
            Some("TURN-1".into()),
            2,
        )
        .expect("valid scenario flight"),
        // S6: an A380 outranks a bare narrow-body despite a later schedule time.
        Flight::new("BB301", "BB301", "BB", "A320", "LGA", "T2", "09:00", "T2", true, None, 0)
            .expect("valid scenario flight"),
        Flight::new("BB302", "BB302", "BB", "A380", "LGA", "T2", "09:15", "T2", true, None, 0)
            .expect("valid scenario flight"),
    ]
}

fn seed_maintenance() -> Vec<MaintenanceEntry> {
    // S5: T2-A1 is blocked mid-morning, forcing BB301/BB302 to compete for
    // whichever window remains.
    vec![MaintenanceEntry::new("T2-A1", "07:00", "09:10").expect("valid maintenance window")]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let engine = Engine::new(
        seed_flights(),
        seed_stands(),
        seed_airlines(),
        Settings::default(),
        seed_maintenance(),
        vec![],
    )
    .expect("demo scenario is internally consistent");

    let mut ai_support = LoggingAiSupport::default();
    let (allocated, unallocated) = engine.run(&mut ai_support);

    println!("\n=====================================================================");
    println!("  Stand Allocation Engine -- Demo Run");
    println!("=====================================================================\n");

    println!("--- Allocated ---\n");
    for record in &allocated {
        println!(
            "  [>] {} -> {} [{} - {}]",
            record.flight_id, record.stand_name, record.start_time, record.end_time
        );
    }

    println!("\n--- Unallocated ---\n");
    for record in &unallocated {
        println!("  [!] {} ({})", record.flight_id, record.reason);
    }

    println!(
        "\n  {} allocated, {} unallocated, {} logged to AI support\n",
        allocated.len(),
        unallocated.len(),
        ai_support.logged.len()
    );
}
