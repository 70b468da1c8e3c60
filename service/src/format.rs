use std::fmt::{self, Display, Write};

use scheduler::{Process, Schedule, ScheduledProcess};

/// A table row of a stored process.
struct ProcessRow<'a>(&'a Process);

impl Display for ProcessRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let process = self.0;
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            process.id,
            process.pid,
            process.arrival_time,
            process.burst_time,
            Priority(process.priority)
        )
    }
}

/// A table row of a completed process.
struct ScheduledRow<'a>(&'a ScheduledProcess);

impl Display for ScheduledRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            ProcessRow(&self.0.process),
            self.0.completion_time,
            self.0.turnaround_time,
            self.0.waiting_time
        )
    }
}

struct Priority(Option<i32>);

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(priority) => write!(f, "{}", priority),
            None => write!(f, "-"),
        }
    }
}

/// Format the stored processes to a [`String`].
///
/// * `processes` - the processes, in the order they should be listed.
pub fn format_processes(processes: &[Process]) -> String {
    let mut s = String::new();
    writeln!(s, "===== Processes =====").unwrap();
    writeln!(s, "ID\tPID\tARRIVAL\tBURST\tPRI").unwrap();
    for process in processes {
        writeln!(s, "{}", ProcessRow(process)).unwrap();
    }
    s
}

/// Format a [`Schedule`] to a [`String`].
///
/// The completed processes are listed in completion order, followed by
/// every dispatch and the average turnaround and waiting times.
///
/// ## Example
///
/// ```rust
/// use service::format_schedule;
///
/// let schedule = scheduler::schedule(&[], "fcfs", None).unwrap();
/// println!("{}", format_schedule(&schedule));
/// ```
pub fn format_schedule(schedule: &Schedule) -> String {
    let mut s = String::new();
    writeln!(s, "===== Schedule: {} =====", schedule.algorithm).unwrap();
    writeln!(s, "ID\tPID\tARRIVAL\tBURST\tPRI\tDONE\tTAT\tWAIT").unwrap();
    for process in &schedule.completed {
        writeln!(s, "{}", ScheduledRow(process)).unwrap();
    }
    writeln!(s, "===== Timeline =====").unwrap();
    for slice in &schedule.timeline {
        writeln!(s, "{}", slice).unwrap();
    }
    writeln!(s, "===== Averages =====").unwrap();
    writeln!(s, "TURNAROUND\t{:.2}", schedule.average_turnaround_time()).unwrap();
    writeln!(s, "WAITING\t{:.2}", schedule.average_waiting_time()).unwrap();
    s
}
