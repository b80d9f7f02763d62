use crate::ProcessId;
use thiserror::Error;

/// Core error types for process bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to spawn process: {0}")]
    SpawnFailed(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(ProcessId),

    #[error("Process inspection failed: {0}")]
    Inspection(#[from] ProbeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Failure of an OS-level process status query.
///
/// Distinct from "the process is gone": a missing process is a normal
/// `false` liveness answer, not a probe error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("status query for process {pid} failed: {message}")]
pub struct ProbeError {
    pub pid: ProcessId,
    pub message: String,
}

impl ProbeError {
    pub fn new(pid: ProcessId, message: impl Into<String>) -> Self {
        Self {
            pid,
            message: message.into(),
        }
    }
}
