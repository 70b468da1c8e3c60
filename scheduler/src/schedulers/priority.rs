use crate::{Algorithm, Process, Schedule, Scheduler, SchedulingError};

use super::{run_to_completion, validate};

/// Non-preemptive priority scheduling.
///
/// Lower priority values run first, ties go to the earlier arrival and
/// then to the earlier submission. Every process must carry a priority.
#[derive(Debug, Default, Copy, Clone)]
pub struct PriorityScheduling;

impl Scheduler for PriorityScheduling {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Priority
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let candidates = processes
            .iter()
            .map(|process| match process.priority {
                Some(priority) => Ok((priority, process)),
                None => Err(SchedulingError::MissingPriority(process.id)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(run_to_completion(self.algorithm(), candidates))
    }
}
