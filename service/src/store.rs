use std::num::NonZeroUsize;

use thiserror::Error;

use scheduler::{Process, ProcessId};

use crate::Submission;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No process identifiers left")]
    IdsExhausted,
}

/// The process store.
///
/// Keeps submitted processes in submission order. Identifiers start from 1
/// and are never handed out twice, not even after [`ProcessStore::clear`].
#[derive(Debug)]
pub struct ProcessStore {
    processes: Vec<Process>,
    next_id: Option<NonZeroUsize>,
}

impl ProcessStore {
    pub fn new() -> Self {
        ProcessStore {
            processes: Vec::new(),
            next_id: Some(NonZeroUsize::MIN),
        }
    }

    /// Stores a new process and returns its identifier.
    pub fn submit(&mut self, submission: Submission) -> Result<ProcessId, StoreError> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        self.next_id = id.checked_add(1);

        let id = ProcessId::new(id);
        let mut process = Process::new(
            id,
            submission.pid,
            submission.arrival_time,
            submission.burst_time,
        );
        process.priority = submission.priority;

        tracing::info!(%id, pid = %process.pid, "process submitted");
        self.processes.push(process);
        Ok(id)
    }

    /// All stored processes, in submission order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Deletes every stored process.
    pub fn clear(&mut self) {
        tracing::info!(count = self.processes.len(), "processes cleared");
        self.processes.clear();
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessStore {
    fn default() -> Self {
        Self::new()
    }
}
