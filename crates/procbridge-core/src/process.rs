use crate::ProbeError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Operating-system process identifier
pub type ProcessId = u32;

/// Basic descriptive metadata for a process, resolved from a bare pid
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetadata {
    pub pid: ProcessId,
    pub name: String,
}

/// Result of delivering a signal to a process
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome {
    /// The signal was delivered
    Delivered,
    /// The process did not exist at delivery time
    ProcessGone,
    /// Delivery failed for another reason (permissions, OS error)
    Failed(String),
}

/// Platform seam for sending termination signals to a process by pid.
///
/// Implementations never assume exclusive ownership of the process: the pid
/// may belong to a process spawned elsewhere, and any number of callers may
/// signal it concurrently.
#[async_trait]
pub trait ProcessSignaler: Send + Sync {
    /// Request a cooperative exit (SIGTERM on Unix). May be ignored.
    async fn send_exit_signal(&self, pid: ProcessId) -> SignalOutcome;

    /// Terminate unconditionally (SIGKILL on Unix)
    async fn force_kill(&self, pid: ProcessId) -> SignalOutcome;
}

/// Platform seam for point-in-time liveness checks.
#[async_trait]
pub trait ProcessProbe: Send + Sync {
    /// Whether `pid` currently references a running process.
    ///
    /// A missing process is `Ok(false)`; `Err` is reserved for queries the
    /// OS could not perform at all.
    async fn is_alive(&self, pid: ProcessId) -> Result<bool, ProbeError>;
}

/// Combined signal-and-probe capability of a platform implementation
pub trait ProcessControl: ProcessSignaler + ProcessProbe {}

impl<T: ProcessSignaler + ProcessProbe> ProcessControl for T {}

/// Collaborator that resolves an executable reference to a concrete path.
///
/// Returning `None` (or a path that does not exist) makes the launcher fall
/// back to the original reference, delegating resolution to the OS loader.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

/// Collaborator that converts captured output bytes into text when a
/// request's conversion directive is set.
pub trait OutputConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> String;
}

/// Default converter: lossy UTF-8 pass-through
#[derive(Debug, Default, Clone, Copy)]
pub struct LossyConverter;

impl OutputConverter for LossyConverter {
    fn convert(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
