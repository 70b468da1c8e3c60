use std::fs;
use std::io;
use std::process::ExitCode;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use thiserror::Error;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use service::{format_schedule, ProcessStore, Service, StoreError, Submission};

mod config;

use config::{Config, Output};

#[derive(Error, Debug)]
enum RunnerError {
    #[error("Cannot read workload: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid workload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scheduling(#[from] scheduler::SchedulingError),

    #[error("Invalid request: {0}")]
    Http(#[from] axum::http::Error),

    #[error("Cannot read response: {0}")]
    Body(#[from] axum::Error),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// The processes scheduled when no workload file is given.
fn demo_workload() -> Vec<Submission> {
    vec![
        Submission::new("P1", 0, 7).with_priority(3),
        Submission::new("P2", 2, 4).with_priority(1),
        Submission::new("P3", 4, 1).with_priority(4),
        Submission::new("P4", 5, 4).with_priority(2),
    ]
}

fn load_store(config: &Config) -> Result<ProcessStore, RunnerError> {
    let submissions = match &config.workload {
        Some(path) => serde_json::from_str::<Vec<Submission>>(&fs::read_to_string(path)?)?,
        None => demo_workload(),
    };

    let mut store = ProcessStore::new();
    for submission in submissions {
        store.submit(submission)?;
    }
    Ok(store)
}

async fn run(config: &Config) -> Result<String, RunnerError> {
    let store = load_store(config)?;
    match config.output {
        Output::Table => {
            let schedule = scheduler::schedule(
                store.processes(),
                &config.algorithm,
                config.time_quantum.as_deref(),
            )?;
            Ok(format_schedule(&schedule))
        }
        Output::Json => {
            let request = Request::get(config.schedule_uri()).body(Body::empty())?;
            let response = match Service::new(store).router().oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            let status = response.status();
            tracing::info!(%status, "schedule request");

            let body = to_bytes(response.into_body(), usize::MAX).await?;
            let body = String::from_utf8_lossy(&body).into_owned();
            if status.is_success() {
                Ok(body)
            } else {
                Err(RunnerError::Rejected(body))
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    match run(&config).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests;
