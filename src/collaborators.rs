//! External collaborators (spec.md §5): AI-support logging and the
//! maintenance-window lookup the occupancy index is seeded from.

/// Mirrors `original_source/ai_support.py`'s `MockAISupport`: a hook the
/// greedy allocator calls whenever it cannot place a flight, so a downstream
/// system can attempt a manual resolution.
pub trait AiSupport {
    fn log_unallocated(&mut self, flight_id: &str, reason: &str);
}

/// Default [`AiSupport`] that logs via `tracing`, matching the teacher's
/// logging conventions rather than printing directly.
#[derive(Debug, Clone, Default)]
pub struct LoggingAiSupport {
    pub logged: Vec<(String, String)>,
}

impl AiSupport for LoggingAiSupport {
    fn log_unallocated(&mut self, flight_id: &str, reason: &str) {
        tracing::warn!(flight_id, reason, "flight could not be allocated");
        self.logged.push((flight_id.to_string(), reason.to_string()));
    }
}

/// Mirrors `original_source/maintenance_tracker.py`'s `MockMaintenanceTracker`.
pub trait MaintenanceTracker {
    fn is_stand_under_maintenance(&self, stand_name: &str, start_minutes: i64, end_minutes: i64) -> bool;
}

/// A maintenance schedule backed by a flat list, scanned linearly per query
/// — the occupancy index is the fast path; this trait exists for callers
/// that want to query maintenance independently of the index.
#[derive(Debug, Clone, Default)]
pub struct VecMaintenanceTracker {
    schedules: Vec<(String, i64, i64)>,
}

impl VecMaintenanceTracker {
    pub fn new(entries: &[crate::domain::MaintenanceEntry], epoch: &crate::time::Epoch) -> Self {
        let schedules = entries
            .iter()
            .map(|e| {
                let (start, end) = epoch.to_interval_minutes(e.start_time, e.end_time);
                (e.stand_name.clone(), start, end)
            })
            .collect();
        VecMaintenanceTracker { schedules }
    }
}

impl MaintenanceTracker for VecMaintenanceTracker {
    fn is_stand_under_maintenance(&self, stand_name: &str, start_minutes: i64, end_minutes: i64) -> bool {
        self.schedules
            .iter()
            .any(|(name, s, e)| name == stand_name && start_minutes < *e && end_minutes > *s)
    }
}
