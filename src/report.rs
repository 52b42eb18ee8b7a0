//! Allocation outcomes: one record per operation unit, either allocated or
//! not (spec.md §4.6, §6).

/// A successful allocation, formatted per spec.md §6 (`HH:MM` for time-only
/// input, `YYYY-MM-DD HH:MM` otherwise).
#[derive(Debug, Clone)]
pub struct AllocatedRecord {
    pub flight_id: String,
    pub stand_name: String,
    pub start_time: String,
    pub end_time: String,
}

/// A flight (or linked pair) that could not be allocated, with the reason
/// string the allocator recorded and forwarded to the AI-support collaborator.
#[derive(Debug, Clone)]
pub struct UnallocatedRecord {
    pub flight_id: String,
    pub reason: String,
}

/// The three documented unallocated reasons, bit-exact per spec.md §6
/// External interfaces.
pub mod reasons {
    pub const NO_SUITABLE_STAND: &str = "No suitable stand available";
    pub const NO_SUITABLE_STAND_LINKED_PAIR: &str = "No suitable stand available for linked pair";
    pub const NO_SUITABLE_STAND_CP_SOLVER: &str = "No suitable stand available (CP solver)";
}
