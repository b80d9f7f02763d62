//! Procbridge - launch external processes, stream their output, and
//! terminate them reliably.
//!
//! The launcher runs processes either to completion (capturing combined
//! stdout/stderr) or in the background, where two independent observers
//! stream output lines and report exit through caller-named events.
//! Termination escalates from a cooperative signal to a forced kill after a
//! bounded, polled wait.

mod inspector;
mod launcher;
mod platform;
mod resolve;
mod streamer;
mod termination;

pub use inspector::*;
pub use launcher::*;
pub use platform::*;
pub use resolve::*;
pub use streamer::*;
pub use termination::*;

// Re-export core functionality
pub use procbridge_core::*;
