use std::collections::VecDeque;
use std::num::NonZeroU64;

use crate::{Algorithm, Process, Schedule, Scheduler, SchedulingError, Ticks};

use super::validate;

/// The working copy of a process while it waits in the ready queue.
///
/// The original burst stays on `process`, only `remaining` is consumed.
struct Job<'a> {
    process: &'a Process,
    remaining: Ticks,
}

/// Preemptive round robin.
///
/// Every process is queued upfront in arrival order. The head of the queue
/// runs for at most `quantum` ticks and goes back to the tail if it still
/// has work left.
#[derive(Debug, Copy, Clone)]
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        RoundRobin { quantum }
    }
}

impl Scheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RoundRobin {
            quantum: self.quantum,
        }
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let mut sorted: Vec<&Process> = processes.iter().collect();
        sorted.sort_by_key(|process| process.arrival_time);
        let mut ready_queue: VecDeque<Job> = sorted
            .into_iter()
            .map(|process| Job {
                process,
                remaining: process.burst_time,
            })
            .collect();

        let mut schedule = Schedule::new(self.algorithm(), ready_queue.len());
        let mut clock: Ticks = 0;
        while let Some(mut job) = ready_queue.pop_front() {
            let start = clock.max(job.process.arrival_time);
            let executed = job.remaining.min(self.quantum.get());
            job.remaining -= executed;
            clock = start + executed;
            schedule.dispatch(job.process, start, clock);

            if job.remaining == 0 {
                schedule.complete(job.process, clock);
            } else {
                ready_queue.push_back(job);
            }
        }

        Ok(schedule)
    }
}
