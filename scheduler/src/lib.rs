//! A process scheduling library.
//!
//! This library simulates classic CPU scheduling policies over a list of
//! processes and computes the completion, turnaround and waiting time of
//! each of them.
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use scheduler::{Process, ProcessId};
//!
//! let processes = vec![
//!     Process::new(ProcessId::new(NonZeroUsize::MIN), "init", 0, 5),
//!     Process::new(ProcessId::new(NonZeroUsize::MIN.saturating_add(1)), "shell", 1, 3),
//! ];
//!
//! let schedule = scheduler::schedule(&processes, "round_robin", Some("2")).unwrap();
//! assert_eq!(schedule.completed.len(), 2);
//! ```

use std::num::NonZeroU64;

mod error;
mod scheduler;

use schedulers::{Fcfs, PriorityScheduling, RoundRobin, ShortestJobFirst};

pub use crate::error::SchedulingError;
pub use crate::scheduler::{
    Algorithm, Process, ProcessId, Schedule, ScheduledProcess, Scheduler, Slice, Ticks,
};

mod schedulers;

/// Returns a structure that implements the `Scheduler` trait with a first come, first served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive shortest job
/// first policy
pub fn shortest_job_first() -> impl Scheduler {
    ShortestJobFirst
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive priority policy
///
/// Every scheduled process must have a priority, lower values run first.
pub fn priority() -> impl Scheduler {
    PriorityScheduling
}

/// Returns a structure that implements the `Scheduler` trait with a round robin policy
///
/// * `quantum` - the number of ticks a process can run before it is preempted
pub fn round_robin(quantum: NonZeroU64) -> impl Scheduler {
    RoundRobin::new(quantum)
}

impl Algorithm {
    /// Returns the scheduler implementing this algorithm.
    pub fn scheduler(self) -> Box<dyn Scheduler> {
        match self {
            Algorithm::Fcfs => Box::new(fcfs()),
            Algorithm::ShortestJobFirst => Box::new(shortest_job_first()),
            Algorithm::Priority => Box::new(priority()),
            Algorithm::RoundRobin { quantum } => Box::new(round_robin(quantum)),
        }
    }
}

/// Schedules `processes` with the algorithm named by `selector`.
///
/// * `processes` - the processes in submission order, never modified
/// * `selector` - one of `fcfs`, `sjf`, `priority`, `round_robin`
/// * `time_quantum` - the round robin quantum, `1` when absent, ignored by
///                    the other algorithms
pub fn schedule(
    processes: &[Process],
    selector: &str,
    time_quantum: Option<&str>,
) -> Result<Schedule, SchedulingError> {
    let algorithm = Algorithm::parse(selector, time_quantum)?;
    tracing::info!(%algorithm, processes = processes.len(), "scheduling");
    algorithm.scheduler().schedule(processes)
}
