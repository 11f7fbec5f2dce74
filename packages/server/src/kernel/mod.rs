//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod directory;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use directory::{build_directory, InMemoryDirectory};
pub use storage::LocalObjectStorage;
pub use traits::*;
