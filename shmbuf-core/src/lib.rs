//! shmbuf Core Library
//!
//! Owned fixed-size memory buffers for the buffer layer of a client
//! communications library. Provides the buffer type and its handle API,
//! allocation backends, YAML configuration parsing, and a named buffer registry.

pub mod buffer;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use buffer::{Backend, BackendKind, Buffer, HeapBackend};
pub use config::{BufferConfig, Config, ConfigLoader, LimitsConfig};
pub use error::{BufferError, HardValidationError, ShmBufError, ShmBufResult};
pub use registry::BufferRegistry;
pub use types::{BufferName, BufferSize};
