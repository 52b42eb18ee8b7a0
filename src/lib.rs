//! Airport stand allocation engine.
//!
//! Assigns scheduled flight operations to parking stands over non-overlapping
//! time intervals, respecting terminal/size/contact compatibility, airline
//! preferences and stand maintenance windows. Two allocators are provided: a
//! deterministic greedy interval-tree allocator (`greedy`) and an
//! exact mixed-integer allocator (`cp`); `engine::Engine` dispatches between
//! them based on `Settings::solver_parameters`.

pub mod candidates;
pub mod collaborators;
pub mod cp;
pub mod criticality;
pub mod domain;
pub mod engine;
pub mod error;
pub mod greedy;
pub mod occupancy;
pub mod order;
pub mod report;
pub mod time;

pub use domain::*;
pub use engine::Engine;
pub use error::EngineError;
pub use report::{AllocatedRecord, UnallocatedRecord};
pub use time::{AircraftCategory, SizeLimit, Timestamp};
