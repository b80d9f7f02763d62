use serde::{Deserialize, Serialize};

/// Result of a synchronous or background execution.
///
/// `Success` carries captured output for blocking runs and the spawned
/// process id rendered as text for background runs. `Failure` carries
/// human-readable error text. Callers never need to distinguish "ran but
/// the OS call errored" from "failed to run" beyond this message.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    Success { output: String },
    Failure { message: String },
}

impl ExecOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success {
            output: output.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The text carried by either variant
    pub fn message(&self) -> &str {
        match self {
            Self::Success { output } => output,
            Self::Failure { message } => message,
        }
    }

    /// Flatten into the `{success, message}` surface consumed by callers
    pub fn to_report(&self) -> ExecReport {
        ExecReport {
            success: self.is_success(),
            message: self.message().to_string(),
        }
    }
}

/// Wire-friendly `{success, message}` shape of an execution result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecReport {
    pub success: bool,
    pub message: String,
}

/// Final state of a termination attempt.
///
/// Every variant except `ForceKillFailed` guarantees the process id no
/// longer references a live process (barring pid reuse).
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationOutcome {
    /// Process exited on its own after the cooperative signal
    ExitedGracefully,
    /// Process was already gone when the cooperative signal was sent
    ExitedBeforeSignal,
    /// Deadline expired and the forced kill succeeded
    ForceKilled,
    /// Deadline expired and the forced kill also failed
    ForceKillFailed { cause: String },
}

impl TerminationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::ForceKillFailed { .. })
    }
}
