use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scheduler::Ticks;

/// Errors found while reading a submission form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// A process as submitted by a user, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub pid: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl Submission {
    pub fn new(pid: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Submission {
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

    /// Reads a submission from the fields of a submitted form.
    ///
    /// `pid`, `arrival_time` and `burst_time` are required. `priority` may be
    /// missing or empty, in which case the process has no priority.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, FormError> {
        let pid = required(fields, "pid")?.to_string();
        let arrival_time = number::<Ticks>(fields, "arrival_time")?;
        let burst_time = number::<Ticks>(fields, "burst_time")?;
        if burst_time == 0 {
            return Err(FormError::InvalidField {
                field: "burst_time",
                value: "0".to_string(),
            });
        }

        let priority = match fields.get("priority").map(|value| value.trim()) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<i32>().map_err(|_| FormError::InvalidField {
                field: "priority",
                value: value.to_string(),
            })?),
        };

        Ok(Submission {
            pid,
            arrival_time,
            burst_time,
            priority,
        })
    }
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    field: &'static str,
) -> Result<&'a str, FormError> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or(FormError::MissingField(field))
}

fn number<T: std::str::FromStr>(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<T, FormError> {
    let value = required(fields, field)?;
    value.trim().parse::<T>().map_err(|_| FormError::InvalidField {
        field,
        value: value.to_string(),
    })
}
