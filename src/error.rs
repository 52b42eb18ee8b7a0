use thiserror::Error;

/// Errors surfaced to the caller at construction time (spec §7 item 3).
/// Per-flight allocation failures are never represented here — they are
/// reported through [`crate::report::UnallocatedRecord`] instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unparseable time string: {0:?}")]
    InvalidTime(String),

    #[error("duplicate flight_id: {0}")]
    DuplicateFlightId(String),

    #[error("duplicate stand_name: {0}")]
    DuplicateStandName(String),

    #[error("duplicate airline_code: {0}")]
    DuplicateAirlineCode(String),

    #[error("link_id {0:?} groups more than one arrival or more than one departure")]
    InvalidLinkGroup(String),
}
