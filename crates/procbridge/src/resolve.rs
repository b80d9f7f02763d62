use procbridge_core::PathResolver;
use std::path::PathBuf;

/// Default path resolver backed by a PATH lookup.
///
/// The launcher treats a `None` answer (or a resolved path that no longer
/// exists) as "use the original reference as-is", so lookup failure is never
/// a hard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichResolver;

impl PathResolver for WhichResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }
}
