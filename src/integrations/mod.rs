//! Configuration-driven provider integrations.
//!
//! Providers are described declaratively in the catalog; a single generic
//! adapter executes any of their actions via string-template substitution.

pub mod adapter;
pub mod registry;
pub mod traits;

pub use adapter::IntegrationAdapter;
pub use registry::ProcessorRegistry;
pub use traits::Processor;
