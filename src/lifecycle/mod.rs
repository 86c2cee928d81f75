//! Lifecycle callbacks a file-watching host drives.

pub mod adapter;

use std::fmt;
use std::path::PathBuf;

use crate::docker::CommandStatus;
use crate::error::Result;

pub use adapter::ContainerLifecycle;

/// Kind of file system change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathChange {
    Added,
    Modified,
    Removed,
}

impl fmt::Display for PathChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathChange::Added => "added",
            PathChange::Modified => "modified",
            PathChange::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Capabilities a host framework invokes over the life of a session.
///
/// The host calls `start` once at launch and `stop` at shutdown, never
/// concurrently. The remaining callbacks default to doing nothing.
pub trait Lifecycle {
    /// Bring the managed resource up. Returns a human readable status.
    fn start(&self) -> Result<String>;

    /// Tear the managed resource down.
    fn stop(&self) -> Result<CommandStatus>;

    fn reload(&self) -> Result<()> {
        Ok(())
    }

    fn run_all(&self) -> Result<()> {
        Ok(())
    }

    fn on_paths_changed(&self, change: PathChange, paths: &[PathBuf]) -> Result<()> {
        let _ = (change, paths);
        Ok(())
    }
}
