#[cfg(unix)]
mod unix_impl {
    use async_trait::async_trait;
    use nix::errno::Errno;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid as NixPid;
    use procbridge_core::{ProbeError, ProcessId, ProcessProbe, ProcessSignaler, SignalOutcome};
    use tracing::{info, warn};

    /// Unix signaler and liveness probe addressing processes by bare pid
    #[derive(Debug, Default, Clone, Copy)]
    pub struct UnixProcessControl;

    impl UnixProcessControl {
        pub fn new() -> Self {
            Self
        }

        fn deliver(pid: ProcessId, sig: Signal) -> SignalOutcome {
            let nix_pid = NixPid::from_raw(pid as i32);

            match signal::kill(nix_pid, sig) {
                Ok(()) => {
                    info!(pid, signal = %sig, "Signal delivered");
                    SignalOutcome::Delivered
                }
                Err(Errno::ESRCH) => {
                    info!(pid, "Process not found (already terminated)");
                    SignalOutcome::ProcessGone
                }
                Err(e) => {
                    warn!(pid, signal = %sig, error = %e, "Failed to deliver signal");
                    SignalOutcome::Failed(format!("{sig} failed: {e}"))
                }
            }
        }
    }

    #[async_trait]
    impl ProcessSignaler for UnixProcessControl {
        async fn send_exit_signal(&self, pid: ProcessId) -> SignalOutcome {
            Self::deliver(pid, Signal::SIGTERM)
        }

        async fn force_kill(&self, pid: ProcessId) -> SignalOutcome {
            Self::deliver(pid, Signal::SIGKILL)
        }
    }

    #[async_trait]
    impl ProcessProbe for UnixProcessControl {
        async fn is_alive(&self, pid: ProcessId) -> Result<bool, ProbeError> {
            let nix_pid = NixPid::from_raw(pid as i32);

            // Signal 0 performs the permission and existence checks without
            // delivering anything.
            match signal::kill(nix_pid, None) {
                Ok(()) => Ok(true),
                Err(Errno::ESRCH) => Ok(false),
                // The process exists but belongs to another user
                Err(Errno::EPERM) => Ok(true),
                Err(e) => Err(ProbeError::new(pid, e.to_string())),
            }
        }
    }
}

// Re-export the Unix implementation when on Unix systems
#[cfg(unix)]
pub use unix_impl::UnixProcessControl;

// Provide a stub for non-Unix systems so dependents always compile
#[cfg(not(unix))]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixProcessControl;

#[cfg(not(unix))]
impl UnixProcessControl {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use procbridge_core::{ProcessProbe, ProcessSignaler, SignalOutcome};

    // Positive as an i32 but far above any real pid_max, so it stays a
    // plain ESRCH instead of a process-group signal
    const MISSING_PID: u32 = i32::MAX as u32;

    #[tokio::test]
    async fn test_own_process_is_alive() {
        let control = UnixProcessControl::new();
        let alive = control.is_alive(std::process::id()).await.unwrap();
        assert!(alive);
    }

    #[tokio::test]
    async fn test_missing_process_is_not_alive() {
        let control = UnixProcessControl::new();
        let alive = control.is_alive(MISSING_PID).await.unwrap();
        assert!(!alive);
    }

    #[tokio::test]
    async fn test_signal_to_missing_process_reports_gone() {
        let control = UnixProcessControl::new();
        let outcome = control.send_exit_signal(MISSING_PID).await;
        assert_eq!(outcome, SignalOutcome::ProcessGone);
    }

    #[tokio::test]
    async fn test_force_kill_spawned_process() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        let pid = child.id().unwrap();

        let control = UnixProcessControl::new();
        assert!(control.is_alive(pid).await.unwrap());

        let outcome = control.force_kill(pid).await;
        assert_eq!(outcome, SignalOutcome::Delivered);

        // Reap the child so the pid actually leaves the process table
        let status = child.wait().await.unwrap();
        assert!(!status.success());
        assert!(!control.is_alive(pid).await.unwrap());
    }
}
