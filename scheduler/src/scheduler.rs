use std::fmt::{self, Display};
use std::num::{NonZeroU64, NonZeroUsize};

use serde::{Deserialize, Serialize};

use crate::SchedulingError;

/// A point in simulated time, or a duration, measured in CPU ticks.
pub type Ticks = u64;

/// The identifier of a process.
///
/// Identifiers are assigned by the process store and are never reused.
/// They start from 1.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ProcessId(NonZeroUsize);

impl ProcessId {
    pub fn new(id: NonZeroUsize) -> ProcessId {
        ProcessId(id)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for ProcessId {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process submitted for scheduling.
///
/// The engine only ever reads these records. Timing results are attached
/// to a [`ScheduledProcess`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier assigned by the store.
    pub id: ProcessId,

    /// Display label, not necessarily unique.
    pub pid: String,

    /// The process cannot run before this tick.
    pub arrival_time: Ticks,

    /// Total CPU ticks the process needs.
    pub burst_time: Ticks,

    /// Lower values run first. Only the priority policy reads it.
    pub priority: Option<i32>,
}

impl Process {
    pub fn new(
        id: ProcessId,
        pid: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
    ) -> Self {
        Process {
            id,
            pid: pid.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A process together with the timings computed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledProcess {
    #[serde(flatten)]
    pub process: Process,

    /// The tick at which the last unit of work finished.
    pub completion_time: Ticks,

    /// `completion_time - arrival_time`
    pub turnaround_time: Ticks,

    /// `turnaround_time - burst_time`, against the original burst.
    pub waiting_time: Ticks,
}

impl ScheduledProcess {
    pub(crate) fn complete(process: &Process, completion_time: Ticks) -> Self {
        let turnaround_time = completion_time - process.arrival_time;
        ScheduledProcess {
            process: process.clone(),
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time,
        }
    }
}

/// One uninterrupted run of a process on the CPU, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub id: ProcessId,
    pub pid: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.start, self.end, self.pid)
    }
}

/// The scheduling policy to run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// First come, first served.
    Fcfs,

    /// Non-preemptive shortest job first.
    #[serde(rename = "sjf")]
    ShortestJobFirst,

    /// Non-preemptive, lowest priority value first.
    Priority,

    /// Preemptive round robin.
    RoundRobin {
        /// The maximum number of ticks a process runs per dispatch.
        quantum: NonZeroU64,
    },
}

impl Algorithm {
    /// The quantum used when the caller does not provide one.
    pub const DEFAULT_QUANTUM: NonZeroU64 = NonZeroU64::MIN;

    /// Resolves a selector (`fcfs`, `sjf`, `priority`, `round_robin`) and,
    /// for round robin, its `time_quantum` parameter.
    ///
    /// * `selector` - the algorithm name, matched exactly.
    /// * `time_quantum` - the raw quantum value. It is ignored by every
    ///                    algorithm except round robin, which defaults it to
    ///                    [`Algorithm::DEFAULT_QUANTUM`] when absent.
    pub fn parse(
        selector: &str,
        time_quantum: Option<&str>,
    ) -> Result<Algorithm, SchedulingError> {
        match selector {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::ShortestJobFirst),
            "priority" => Ok(Algorithm::Priority),
            "round_robin" => {
                let quantum = match time_quantum {
                    Some(raw) => parse_quantum(raw)?,
                    None => Algorithm::DEFAULT_QUANTUM,
                };
                Ok(Algorithm::RoundRobin { quantum })
            }
            other => Err(SchedulingError::InvalidAlgorithm(other.to_string())),
        }
    }

    /// The selector this algorithm is chosen by.
    pub fn selector(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::ShortestJobFirst => "sjf",
            Algorithm::Priority => "priority",
            Algorithm::RoundRobin { .. } => "round_robin",
        }
    }
}

fn parse_quantum(raw: &str) -> Result<NonZeroU64, SchedulingError> {
    let invalid = || SchedulingError::InvalidParameter {
        name: "time_quantum",
        value: raw.to_string(),
    };
    let value = raw.trim().parse::<i64>().map_err(|_| invalid())?;
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(invalid)
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RoundRobin { quantum } => {
                write!(f, "{} (quantum {})", self.selector(), quantum)
            }
            _ => write!(f, "{}", self.selector()),
        }
    }
}

/// The outcome of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// The policy that produced this schedule.
    pub algorithm: Algorithm,

    /// Processes in the order they finished.
    pub completed: Vec<ScheduledProcess>,

    /// Every dispatch, in time order.
    pub timeline: Vec<Slice>,
}

impl Schedule {
    pub(crate) fn new(algorithm: Algorithm, capacity: usize) -> Self {
        Schedule {
            algorithm,
            completed: Vec::with_capacity(capacity),
            timeline: Vec::new(),
        }
    }

    /// Records that `process` held the CPU from `start` to `end`.
    pub(crate) fn dispatch(&mut self, process: &Process, start: Ticks, end: Ticks) {
        tracing::debug!(id = %process.id, pid = %process.pid, start, end, "dispatch");
        self.timeline.push(Slice {
            id: process.id,
            pid: process.pid.clone(),
            start,
            end,
        });
    }

    /// Records that `process` finished at `completion_time`.
    pub(crate) fn complete(&mut self, process: &Process, completion_time: Ticks) {
        let scheduled = ScheduledProcess::complete(process, completion_time);
        tracing::trace!(
            id = %process.id,
            completion = scheduled.completion_time,
            turnaround = scheduled.turnaround_time,
            waiting = scheduled.waiting_time,
            "complete"
        );
        self.completed.push(scheduled);
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// The completion time of the last process, 0 when nothing ran.
    pub fn makespan(&self) -> Ticks {
        self.completed
            .iter()
            .map(|process| process.completion_time)
            .max()
            .unwrap_or(0)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.average(|process| process.turnaround_time)
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average(|process| process.waiting_time)
    }

    fn average(&self, field: impl Fn(&ScheduledProcess) -> Ticks) -> f64 {
        if self.completed.is_empty() {
            return 0.0;
        }
        let total: f64 = self.completed.iter().map(|process| field(process) as f64).sum();
        total / self.completed.len() as f64
    }

    /// Total ticks the timeline attributes to process `id`.
    pub fn executed(&self, id: ProcessId) -> Ticks {
        self.timeline
            .iter()
            .filter(|slice| slice.id == id)
            .map(Slice::duration)
            .sum()
    }

    pub fn into_completed(self) -> Vec<ScheduledProcess> {
        self.completed
    }
}

/// The trait that every scheduling policy implements.
///
/// Policies are pure: they read the input records, never modify them and
/// keep no state between calls.
pub trait Scheduler {
    /// The policy this scheduler implements.
    fn algorithm(&self) -> Algorithm;

    /// Runs the policy over `processes` and returns the processes annotated
    /// with their timings, in completion order.
    ///
    /// `processes` is in submission order, which is the last tie-break of
    /// every policy.
    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError>;
}
