pub mod container;
pub mod loader;

pub use container::{ConfigOverrides, ContainerConfig};
