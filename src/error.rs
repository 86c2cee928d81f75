//! Error types for container lifecycle operations.

use thiserror::Error;

/// Result type alias for lifecycle operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// Errors raised by the lifecycle adapter.
///
/// A non-zero exit from `docker stop` is deliberately absent: it is an
/// ordinary outcome and is reported through [`crate::docker::CommandStatus`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// No image configured, so no container name can be derived.
    #[error("You must specify an image")]
    MissingImage,

    /// The docker process could not be launched at all.
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
