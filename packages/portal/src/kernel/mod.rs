//! Kernel module - provider infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AppwriteAdapter, PortalDeps};
pub use test_dependencies::{test_identity, MockProvider, ProviderCall};
pub use traits::*;
