//! Process-local heap backend.

use crate::buffer::backend::{Backend, BackendKind};
use crate::error::BufferError;
use crate::types::BufferSize;

/// Backend that allocates regions on the process heap.
///
/// Regions are private to this process. `attach` and `detach` do nothing
/// and always succeed.
///
/// Regions are zero-filled at allocation, which touches every page up
/// front. `AllocationFailure` only covers a refused reservation: on a host
/// that overcommits memory the reservation can succeed and the process can
/// still be killed by the OOM killer while the region is being zeroed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapBackend;

impl Backend for HeapBackend {
    type Region = Box<[u8]>;

    fn kind(&self) -> BackendKind {
        BackendKind::LocalHeap
    }

    fn allocate(&self, size: BufferSize) -> Result<Self::Region, BufferError> {
        let bytes = size.bytes();

        // try_reserve_exact reports exhaustion instead of aborting the process
        let mut data: Vec<u8> = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|e| BufferError::AllocationFailure {
                size: bytes as u64,
                reason: e.to_string(),
            })?;
        data.resize(bytes, 0);

        Ok(data.into_boxed_slice())
    }

    fn attach(&self, _region: &mut Self::Region) -> bool {
        true
    }

    fn detach(&self, _region: &mut Self::Region) -> bool {
        true
    }
}
