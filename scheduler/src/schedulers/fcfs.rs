use crate::{Algorithm, Process, Schedule, Scheduler, SchedulingError, Ticks};

use super::validate;

/// First come, first served.
///
/// Processes run to completion in arrival order. Processes that arrive at
/// the same tick keep their submission order.
#[derive(Debug, Default, Copy, Clone)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let mut queue: Vec<&Process> = processes.iter().collect();
        queue.sort_by_key(|process| process.arrival_time);

        let mut schedule = Schedule::new(self.algorithm(), queue.len());
        let mut clock: Ticks = 0;
        for process in queue {
            let start = clock.max(process.arrival_time);
            clock = start + process.burst_time;
            schedule.dispatch(process, start, clock);
            schedule.complete(process, clock);
        }

        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schedulers::test_support::{assert_consistent, process, timings};

    #[test]
    fn empty_input() {
        let schedule = Fcfs.schedule(&[]).unwrap();
        assert!(schedule.is_empty());
        assert!(schedule.timeline.is_empty());
    }

    #[test]
    fn two_processes() {
        let processes = vec![process(1, 0, 5), process(2, 1, 3)];
        let schedule = Fcfs.schedule(&processes).unwrap();

        assert_eq!(
            timings(&schedule),
            vec![("P1".to_string(), 5, 5, 0), ("P2".to_string(), 8, 7, 4)]
        );
        assert_consistent(&schedule, &processes);
    }

    #[test]
    fn sorts_by_arrival_keeping_submission_order() {
        let processes = vec![process(1, 4, 1), process(2, 0, 2), process(3, 0, 1)];
        let schedule = Fcfs.schedule(&processes).unwrap();

        assert_eq!(
            timings(&schedule),
            vec![
                ("P2".to_string(), 2, 2, 0),
                ("P3".to_string(), 3, 3, 2),
                ("P1".to_string(), 5, 1, 0),
            ]
        );
        assert_consistent(&schedule, &processes);
    }

    #[test]
    fn idle_gap() {
        let processes = vec![process(1, 0, 2), process(2, 5, 3)];
        let schedule = Fcfs.schedule(&processes).unwrap();

        assert_eq!(
            timings(&schedule),
            vec![("P1".to_string(), 2, 2, 0), ("P2".to_string(), 8, 3, 0)]
        );
        assert_eq!(schedule.timeline[1].start, 5);
    }

    #[test]
    fn input_is_untouched() {
        let processes = vec![process(1, 3, 2), process(2, 0, 4)];
        let copy = processes.clone();
        Fcfs.schedule(&processes).unwrap();
        assert_eq!(processes, copy);
    }
}
