//! Error kinds raised by the solution-space engine.

use thiserror::Error;

/// Errors surfaced by snapshot validation and per-pair geometry.
///
/// Zero relative velocity is deliberately absent: it resolves to infinite
/// tcpa/tlos sentinels inside the CPA analyzer instead of failing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SsdError {
    /// Intruder too close for a tangent construction, or the wedge would be
    /// malformed. Recovered per pair by the evaluator.
    #[error("degenerate geometry for intruder {intruder_id}: {reason}")]
    DegenerateInput { intruder_id: String, reason: String },

    /// Fatal for a whole evaluation cycle; reported before any pair runs.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("aircraft {0} not found in snapshot")]
    UnknownAircraft(String),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),
}

impl SsdError {
    pub(crate) fn degenerate(intruder_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            intruder_id: intruder_id.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SsdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SsdError>;
