//! The scheduling policies.
//!
//! Each policy lives in its own file. The two non-preemptive selection
//! policies, shortest job first and priority, share [`run_to_completion`].

mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::ShortestJobFirst;

mod priority;
pub use priority::PriorityScheduling;

mod round_robin;
pub use round_robin::RoundRobin;

use crate::{Algorithm, Process, Schedule, SchedulingError, Ticks};

/// Rejects records no policy can schedule.
///
/// The clock never passes the latest arrival plus the sum of all bursts, so
/// once that bound fits in [`Ticks`] no policy can overflow.
fn validate(processes: &[Process]) -> Result<(), SchedulingError> {
    if let Some(process) = processes.iter().find(|process| process.burst_time == 0) {
        return Err(SchedulingError::ZeroBurst(process.id));
    }

    let mut total_burst: Ticks = 0;
    for process in processes {
        total_burst = total_burst
            .checked_add(process.burst_time)
            .ok_or(SchedulingError::TickOverflow(process.id))?;
    }
    if let Some(latest) = processes.iter().max_by_key(|process| process.arrival_time) {
        latest
            .arrival_time
            .checked_add(total_burst)
            .ok_or(SchedulingError::TickOverflow(latest.id))?;
    }
    Ok(())
}

/// Runs a non-preemptive policy.
///
/// Each candidate carries the primary selection key of the policy. Among
/// the processes that have arrived, the one with the smallest
/// `(key, arrival_time, submission index)` runs to completion. When none
/// has arrived the clock jumps to the earliest pending arrival.
fn run_to_completion<K: Ord + Copy>(
    algorithm: Algorithm,
    candidates: Vec<(K, &Process)>,
) -> Schedule {
    let mut schedule = Schedule::new(algorithm, candidates.len());
    let mut pending: Vec<(K, usize, &Process)> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, (key, process))| (key, index, process))
        .collect();
    let mut clock: Ticks = 0;

    while !pending.is_empty() {
        let selected = pending
            .iter()
            .enumerate()
            .filter(|(_, (_, _, process))| process.arrival_time <= clock)
            .min_by_key(|(_, (key, index, process))| (*key, process.arrival_time, *index))
            .map(|(position, _)| position);

        let Some(position) = selected else {
            let next_arrival = pending.iter().map(|(_, _, process)| process.arrival_time).min();
            if let Some(next_arrival) = next_arrival {
                tracing::debug!(from = clock, to = next_arrival, "idle");
                clock = next_arrival;
            }
            continue;
        };

        let (_, _, process) = pending.remove(position);
        let end = clock + process.burst_time;
        schedule.dispatch(process, clock, end);
        clock = end;
        schedule.complete(process, clock);
    }

    schedule
}
