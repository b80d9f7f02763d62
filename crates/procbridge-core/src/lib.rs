//! Procbridge Core - Platform-independent types and trait seams
//!
//! This crate provides the request/outcome data model, error types, and the
//! traits implemented by platform-specific crates and injected collaborators.

mod config;
mod error;
mod events;
mod outcome;
mod process;

pub use config::*;
pub use error::*;
pub use events::*;
pub use outcome::*;
pub use process::*;
