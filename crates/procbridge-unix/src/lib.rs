//! Unix process control for procbridge.
//!
//! Signals by pid via `nix`: SIGTERM for cooperative exit, SIGKILL for
//! forced termination, signal 0 for liveness probes.

mod unix_process_control;

pub use unix_process_control::UnixProcessControl;
