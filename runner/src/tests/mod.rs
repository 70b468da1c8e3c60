use std::env;
use std::fs;

use service::{format_schedule, ProcessStore, Submission};


fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

/// Submits `workload` to a fresh store, schedules it with the selected
/// algorithm and compares the formatted schedule with the reference output.
fn run(folder: &str, name: &str, workload: &[Submission]) {
    let mut store = ProcessStore::new();
    for submission in workload {
        store.submit(submission.clone()).unwrap();
    }

    let quantum = arguments().to_string();
    let schedule = scheduler::schedule(store.processes(), SCHEDULER, Some(&quantum)).unwrap();
    let output = format_schedule(&schedule);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn arguments() -> u64 {
    let quantum = env::var("TIME_QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<u64>()
        .unwrap();
    println!("Algorithm {SCHEDULER}\nTime quantum {quantum}");
    quantum
}

#[cfg(feature = "fcfs")]
static SCHEDULER: &str = "fcfs";

#[cfg(all(feature = "sjf", not(feature = "fcfs")))]
static SCHEDULER: &str = "sjf";

#[cfg(all(feature = "priority", not(any(feature = "fcfs", feature = "sjf"))))]
static SCHEDULER: &str = "priority";

#[cfg(all(
    feature = "round-robin",
    not(any(feature = "fcfs", feature = "sjf", feature = "priority"))
))]
static SCHEDULER: &str = "round_robin";

#[cfg(not(any(
    feature = "fcfs",
    feature = "sjf",
    feature = "priority",
    feature = "round-robin"
)))]
static SCHEDULER: &str = "fcfs";
