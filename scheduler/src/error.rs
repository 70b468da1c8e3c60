use thiserror::Error;

use crate::ProcessId;

/// Errors reported before a scheduling run starts.
///
/// A run either returns the complete schedule or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid algorithm: {0:?}")]
    InvalidAlgorithm(String),

    #[error("Invalid parameter {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Process {0} has no priority")]
    MissingPriority(ProcessId),

    #[error("Process {0} has a burst time of zero")]
    ZeroBurst(ProcessId),

    #[error("Process {0} would finish past the last representable tick")]
    TickOverflow(ProcessId),
}
