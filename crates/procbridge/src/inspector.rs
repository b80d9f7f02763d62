use crate::PlatformProcessControl;
use procbridge_core::{BridgeError, ProcessId, ProcessMetadata, ProcessProbe};
use std::sync::{Arc, Mutex};
use sysinfo::System;

/// Resolves bare pids to liveness and basic metadata.
///
/// Works against any pid, not just processes this host spawned, and never
/// assumes ownership of them.
pub struct ProcessInspector {
    probe: Arc<dyn ProcessProbe>,
    system: Mutex<System>,
}

impl ProcessInspector {
    pub fn new() -> Self {
        Self::with_probe(Arc::new(PlatformProcessControl::new()))
    }

    pub fn with_probe(probe: Arc<dyn ProcessProbe>) -> Self {
        Self {
            probe,
            system: Mutex::new(System::new()),
        }
    }

    /// Whether `pid` currently references a running process.
    ///
    /// A missing process is `Ok(false)`; an error means the OS status query
    /// itself could not be performed.
    pub async fn is_alive(&self, pid: ProcessId) -> Result<bool, BridgeError> {
        Ok(self.probe.is_alive(pid).await?)
    }

    /// Look up descriptive metadata for `pid` from the process table
    pub fn metadata(&self, pid: ProcessId) -> Result<ProcessMetadata, BridgeError> {
        let target = sysinfo::Pid::from_u32(pid);
        let mut system = self
            .system
            .lock()
            .map_err(|e| anyhow::anyhow!("process table lock poisoned: {e}"))?;

        system.refresh_processes_specifics(
            sysinfo::ProcessesToUpdate::Some(&[target]),
            true,
            sysinfo::ProcessRefreshKind::nothing(),
        );

        match system.process(target) {
            Some(process) => Ok(ProcessMetadata {
                pid,
                name: process.name().to_string_lossy().into_owned(),
            }),
            None => Err(BridgeError::ProcessNotFound(pid)),
        }
    }
}

impl Default for ProcessInspector {
    fn default() -> Self {
        Self::new()
    }
}
