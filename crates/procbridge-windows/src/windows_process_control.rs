#[cfg(windows)]
mod windows_impl {
    use anyhow::{Context, Result};
    use async_trait::async_trait;
    use procbridge_core::{ProbeError, ProcessId, ProcessProbe, ProcessSignaler, SignalOutcome};
    use std::sync::Mutex;
    use sysinfo::System;
    use tokio::process::Command;
    use tracing::{info, warn};

    // taskkill exits with 128 when the target process does not exist
    const TASKKILL_NOT_FOUND: i32 = 128;

    /// Windows signaler and liveness probe addressing processes by bare pid
    pub struct WindowsProcessControl {
        system: Mutex<System>,
    }

    impl Default for WindowsProcessControl {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WindowsProcessControl {
        pub fn new() -> Self {
            Self {
                system: Mutex::new(System::new()),
            }
        }

        async fn taskkill(&self, pid: ProcessId, force: bool) -> Result<bool> {
            let mut cmd = Command::new("taskkill");
            if force {
                cmd.arg("/F");
            }
            cmd.args(["/PID", &pid.to_string()]);

            {
                use std::os::windows::process::CommandExt;
                // CREATE_NO_WINDOW - no console popup for the helper itself
                cmd.creation_flags(0x08000000);
            }

            let output = cmd
                .output()
                .await
                .with_context(|| format!("failed to run taskkill for pid {pid}"))?;

            if output.status.success() {
                return Ok(true);
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            if output.status.code() == Some(TASKKILL_NOT_FOUND) {
                return Ok(false);
            }

            Err(anyhow::anyhow!(
                "taskkill exited with {}: {}",
                output.status,
                stderr.trim()
            ))
        }

        async fn signal(&self, pid: ProcessId, force: bool) -> SignalOutcome {
            match self.taskkill(pid, force).await {
                Ok(true) => {
                    info!(pid, force, "taskkill delivered");
                    SignalOutcome::Delivered
                }
                Ok(false) => {
                    info!(pid, "Process not found (already terminated)");
                    SignalOutcome::ProcessGone
                }
                Err(e) => {
                    warn!(pid, force, error = %e, "taskkill failed");
                    SignalOutcome::Failed(e.to_string())
                }
            }
        }
    }

    #[async_trait]
    impl ProcessSignaler for WindowsProcessControl {
        async fn send_exit_signal(&self, pid: ProcessId) -> SignalOutcome {
            self.signal(pid, false).await
        }

        async fn force_kill(&self, pid: ProcessId) -> SignalOutcome {
            self.signal(pid, true).await
        }
    }

    #[async_trait]
    impl ProcessProbe for WindowsProcessControl {
        async fn is_alive(&self, pid: ProcessId) -> Result<bool, ProbeError> {
            let target = sysinfo::Pid::from_u32(pid);
            let mut system = self
                .system
                .lock()
                .map_err(|e| ProbeError::new(pid, format!("process table lock poisoned: {e}")))?;

            system.refresh_processes_specifics(
                sysinfo::ProcessesToUpdate::Some(&[target]),
                true,
                sysinfo::ProcessRefreshKind::nothing(),
            );

            Ok(system.process(target).is_some())
        }
    }
}

// Re-export the Windows implementation when on Windows systems
#[cfg(windows)]
pub use windows_impl::WindowsProcessControl;

// Provide a stub for non-Windows systems so dependents always compile
#[cfg(not(windows))]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProcessControl;

#[cfg(not(windows))]
impl WindowsProcessControl {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use procbridge_core::ProcessProbe;

    #[tokio::test]
    async fn test_own_process_is_alive() {
        let control = WindowsProcessControl::new();
        let alive = control.is_alive(std::process::id()).await.unwrap();
        assert!(alive);
    }
}
