use crate::{Algorithm, Process, Schedule, Scheduler, SchedulingError};

use super::{run_to_completion, validate};

/// Non-preemptive shortest job first.
///
/// Whenever the CPU is free, the arrived process with the smallest burst
/// runs to completion. Ties go to the earlier arrival, then to the earlier
/// submission. Processes that have not arrived yet are never considered.
#[derive(Debug, Default, Copy, Clone)]
pub struct ShortestJobFirst;

impl Scheduler for ShortestJobFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ShortestJobFirst
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let candidates = processes
            .iter()
            .map(|process| (process.burst_time, process))
            .collect();
        Ok(run_to_completion(self.algorithm(), candidates))
    }
}
