use crate::PlatformProcessControl;
use procbridge_core::{ProcessControl, ProcessId, SignalOutcome, TerminationOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Cadence of liveness checks between the cooperative signal and the deadline
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Escalating process termination: cooperative signal, polled wait, forced
/// kill on deadline expiry.
///
/// The wait is an explicit poll loop rather than a single blocking wait so
/// it works against bare pids on every platform, including processes this
/// host never spawned.
pub struct TerminationController {
    control: Arc<dyn ProcessControl>,
    poll_interval: Duration,
}

impl TerminationController {
    pub fn new() -> Self {
        Self::with_control(Arc::new(PlatformProcessControl::new()))
    }

    pub fn with_control(control: Arc<dyn ProcessControl>) -> Self {
        Self {
            control,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Ask the process to exit, wait up to `timeout_secs` for it to go away,
    /// then force-kill it.
    ///
    /// Signal delivery failure is non-fatal: the process may already be gone,
    /// which the poll loop will confirm. A `timeout_secs` of 0 skips straight
    /// to the forced-kill check. `ForceKillFailed` is the only outcome that
    /// leaves the process possibly alive.
    pub async fn terminate(&self, pid: ProcessId, timeout_secs: u64) -> TerminationOutcome {
        info!(pid, timeout_secs, "Terminating process");

        let signal = self.control.send_exit_signal(pid).await;
        let gone_before_signal = matches!(signal, SignalOutcome::ProcessGone);
        if let SignalOutcome::Failed(cause) = &signal {
            // Not fatal: the desired end state may already hold
            warn!(pid, %cause, "Cooperative exit signal failed, polling anyway");
        }

        let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);
        let force_at = tokio::time::sleep_until(deadline);
        tokio::pin!(force_at);

        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Deadline wins a tie with a poll tick so a racing liveness
                // check can never extend the wait.
                biased;

                _ = &mut force_at => {
                    return match self.control.force_kill(pid).await {
                        SignalOutcome::Delivered => {
                            info!(pid, "Process force-killed after deadline");
                            TerminationOutcome::ForceKilled
                        }
                        SignalOutcome::ProcessGone => {
                            info!(pid, "Process exited before the forced kill");
                            Self::exited(gone_before_signal)
                        }
                        SignalOutcome::Failed(cause) => {
                            warn!(pid, %cause, "Forced kill failed");
                            TerminationOutcome::ForceKillFailed { cause }
                        }
                    };
                }

                _ = poll.tick() => {
                    match self.control.is_alive(pid).await {
                        Ok(false) => {
                            info!(pid, "Process exited within the grace period");
                            return Self::exited(gone_before_signal);
                        }
                        Ok(true) => {}
                        // Distinct from "not alive": keep polling until the
                        // deadline settles it
                        Err(e) => warn!(pid, error = %e, "Liveness check failed"),
                    }
                }
            }
        }
    }

    fn exited(gone_before_signal: bool) -> TerminationOutcome {
        if gone_before_signal {
            TerminationOutcome::ExitedBeforeSignal
        } else {
            TerminationOutcome::ExitedGracefully
        }
    }
}

impl Default for TerminationController {
    fn default() -> Self {
        Self::new()
    }
}
