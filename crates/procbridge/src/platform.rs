use async_trait::async_trait;
use procbridge_core::{ProbeError, ProcessId, ProcessProbe, ProcessSignaler, SignalOutcome};
use tracing::info;

/// Platform-specific process control implementations
#[derive(Clone)]
pub enum PlatformProcessControl {
    #[cfg(unix)]
    Unix(std::sync::Arc<procbridge_unix::UnixProcessControl>),
    #[cfg(windows)]
    Windows(std::sync::Arc<procbridge_windows::WindowsProcessControl>),
}

impl PlatformProcessControl {
    pub fn new() -> Self {
        #[cfg(unix)]
        {
            info!("Creating Unix process control");
            Self::Unix(std::sync::Arc::new(
                procbridge_unix::UnixProcessControl::new(),
            ))
        }

        #[cfg(windows)]
        {
            info!("Creating Windows process control");
            Self::Windows(std::sync::Arc::new(
                procbridge_windows::WindowsProcessControl::new(),
            ))
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform: only Unix and Windows are currently supported");
        }
    }

    pub fn platform_name() -> &'static str {
        #[cfg(unix)]
        return "unix";

        #[cfg(windows)]
        return "windows";
    }
}

impl Default for PlatformProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessSignaler for PlatformProcessControl {
    async fn send_exit_signal(&self, pid: ProcessId) -> SignalOutcome {
        match self {
            #[cfg(unix)]
            Self::Unix(control) => control.send_exit_signal(pid).await,
            #[cfg(windows)]
            Self::Windows(control) => control.send_exit_signal(pid).await,
        }
    }

    async fn force_kill(&self, pid: ProcessId) -> SignalOutcome {
        match self {
            #[cfg(unix)]
            Self::Unix(control) => control.force_kill(pid).await,
            #[cfg(windows)]
            Self::Windows(control) => control.force_kill(pid).await,
        }
    }
}

#[async_trait]
impl ProcessProbe for PlatformProcessControl {
    async fn is_alive(&self, pid: ProcessId) -> Result<bool, ProbeError> {
        match self {
            #[cfg(unix)]
            Self::Unix(control) => control.is_alive(pid).await,
            #[cfg(windows)]
            Self::Windows(control) => control.is_alive(pid).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_platform_detection() {
        let platform = PlatformProcessControl::platform_name();
        println!("Running on platform: {platform}");

        let control = PlatformProcessControl::new();
        let alive = control.is_alive(std::process::id()).await.unwrap();
        assert!(alive);
    }
}
