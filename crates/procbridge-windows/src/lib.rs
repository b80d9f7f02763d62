//! Windows process control for procbridge.
//!
//! Windows has no cooperative signal equivalent to SIGTERM, so graceful
//! termination goes through `taskkill` without `/F` and forced termination
//! through `taskkill /F`. Liveness is answered from the process table.

mod windows_process_control;

pub use windows_process_control::WindowsProcessControl;
