use std::env;
use std::path::PathBuf;

/// How the result is printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Output {
    /// The tables produced by [`service::format_schedule`].
    Table,

    /// The JSON body returned by the `/schedule` route.
    Json,
}

/// Runner configuration, read from the environment.
///
/// | Variable       | Meaning                                       | Default  |
/// |----------------|-----------------------------------------------|----------|
/// | `ALGORITHM`    | `fcfs`, `sjf`, `priority` or `round_robin`    | `fcfs`   |
/// | `TIME_QUANTUM` | round robin quantum                           | `1`      |
/// | `WORKLOAD`     | JSON file with an array of submissions        | built in |
/// | `OUTPUT`       | `table` or `json`                             | `table`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub algorithm: String,
    pub time_quantum: Option<String>,
    pub workload: Option<PathBuf>,
    pub output: Output,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output = match lookup("OUTPUT").as_deref() {
            Some("json") => Output::Json,
            _ => Output::Table,
        };
        Config {
            algorithm: lookup("ALGORITHM").unwrap_or_else(|| "fcfs".to_string()),
            time_quantum: lookup("TIME_QUANTUM"),
            workload: lookup("WORKLOAD").map(PathBuf::from),
            output,
        }
    }

    /// The `/schedule` route for this configuration.
    pub fn schedule_uri(&self) -> String {
        match &self.time_quantum {
            Some(quantum) => format!("/schedule/{}?time_quantum={}", self.algorithm, quantum),
            None => format!("/schedule/{}", self.algorithm),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
