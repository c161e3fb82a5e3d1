//! Allocation backends for buffers.
//!
//! A backend hands out owned byte regions and implements the attach/detach
//! hooks. Buffers are generic over the backend so callers never depend on
//! where the bytes come from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BufferError;
use crate::types::BufferSize;

/// Kinds of backend a buffer can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Process-local heap memory. Attach/detach are no-ops.
    #[default]
    LocalHeap,
    /// Memory mapped into several address spaces.
    MappedShared,
}

impl BackendKind {
    /// Whether regions of this kind are visible to other processes.
    pub const fn is_cross_process(&self) -> bool {
        matches!(self, Self::MappedShared)
    }

    /// Get the kind name for error messages and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LocalHeap => "local_heap",
            Self::MappedShared => "mapped_shared",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of buffer regions.
///
/// `allocate` must return a region exactly `size` bytes long or fail with
/// `BufferError::AllocationFailure`; it must not leak on the failure path.
/// Dropping the region releases it.
pub trait Backend {
    /// Owned region handed to the buffer.
    type Region: AsRef<[u8]> + AsMut<[u8]>;

    /// Kind of memory this backend produces.
    fn kind(&self) -> BackendKind;

    /// Allocate a zeroed region of `size` bytes.
    fn allocate(&self, size: BufferSize) -> Result<Self::Region, BufferError>;

    /// Make the region visible to a peer. Returns `true` on success.
    fn attach(&self, region: &mut Self::Region) -> bool;

    /// Tear down the visibility set up by `attach`. Returns `true` on success.
    fn detach(&self, region: &mut Self::Region) -> bool;
}
