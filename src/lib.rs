//! Start and stop a single Docker container from the lifecycle callbacks of
//! a file-watching host.
//!
//! The host builds a [`ContainerLifecycle`] from a [`ContainerConfig`], a
//! [`CommandRunner`](docker::CommandRunner) and a [`Notifier`](notify::Notifier),
//! then calls [`Lifecycle::start`] once at launch and [`Lifecycle::stop`] at
//! shutdown.

pub mod cli;
pub mod config;
pub mod docker;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod utils;

pub use config::ContainerConfig;
pub use error::{LifecycleError, Result};
pub use lifecycle::{ContainerLifecycle, Lifecycle, PathChange};
