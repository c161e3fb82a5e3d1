//! Named buffer registry using DashMap.
//!
//! Owns the buffers provisioned from a configuration. The map is safe to share
//! across threads; each buffer is still handed to one caller at a time.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::buffer::{Buffer, HeapBackend};
use crate::config::Config;
use crate::error::{ShmBufError, ShmBufResult};
use crate::types::{BufferName, BufferSize};

/// Registry of named heap buffers.
#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: DashMap<BufferName, Buffer>,
}

impl BufferRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            buffers: DashMap::new(),
        }
    }

    /// Create a registry wrapped in an Arc for sharing across threads.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Allocate a buffer under `name`.
    /// Fails if the name is taken or the allocation fails.
    ///
    /// The region is allocated and zeroed without holding the map's shard
    /// lock. If another caller claims the name in the meantime, the fresh
    /// buffer is released and `BufferAlreadyExists` is returned.
    pub fn allocate(&self, name: BufferName, size: BufferSize) -> ShmBufResult<()> {
        if self.buffers.contains_key(&name) {
            return Err(ShmBufError::BufferAlreadyExists(name));
        }

        let buffer = Buffer::allocate(HeapBackend, size)?;

        match self.buffers.entry(name) {
            Entry::Occupied(entry) => {
                let existing = entry.key().clone();
                drop(entry);
                drop(buffer);
                Err(ShmBufError::BufferAlreadyExists(existing))
            }
            Entry::Vacant(entry) => {
                tracing::debug!(name = %entry.key(), size = size.bytes(), "Registered buffer");
                entry.insert(buffer);
                Ok(())
            }
        }
    }

    /// Allocate every buffer in `config`.
    ///
    /// All-or-nothing: if any buffer fails, the ones allocated by this call
    /// are released before the error is returned.
    pub fn provision(&self, config: &Config) -> ShmBufResult<()> {
        let mut allocated = Vec::with_capacity(config.buffers.len());

        for buffer in &config.buffers {
            if let Err(e) = self.allocate(buffer.name.clone(), buffer.size) {
                for name in &allocated {
                    self.buffers.remove(name);
                }
                tracing::warn!(name = %buffer.name, error = %e, "Provisioning aborted");
                return Err(e);
            }
            allocated.push(buffer.name.clone());
        }

        tracing::debug!(
            count = allocated.len(),
            total_bytes = config.total_bytes(),
            "Provisioned buffers"
        );
        Ok(())
    }

    /// Remove a buffer from the registry and hand it back.
    /// Dropping the returned buffer releases its memory.
    pub fn release(&self, name: &BufferName) -> ShmBufResult<Buffer> {
        self.buffers
            .remove(name)
            .map(|(_, buffer)| buffer)
            .ok_or_else(|| ShmBufError::BufferNotFound(name.clone()))
    }

    /// Check if a buffer exists.
    pub fn contains(&self, name: &BufferName) -> bool {
        self.buffers.contains_key(name)
    }

    /// Get the size of a buffer.
    pub fn size_of(&self, name: &BufferName) -> ShmBufResult<usize> {
        self.buffers
            .get(name)
            .map(|entry| entry.size())
            .ok_or_else(|| ShmBufError::BufferNotFound(name.clone()))
    }

    /// Run `f` with shared access to a buffer.
    pub fn with_buffer<R>(&self, name: &BufferName, f: impl FnOnce(&Buffer) -> R) -> ShmBufResult<R> {
        self.buffers
            .get(name)
            .map(|entry| f(entry.value()))
            .ok_or_else(|| ShmBufError::BufferNotFound(name.clone()))
    }

    /// Run `f` with exclusive access to a buffer.
    pub fn with_buffer_mut<R>(
        &self,
        name: &BufferName,
        f: impl FnOnce(&mut Buffer) -> R,
    ) -> ShmBufResult<R> {
        self.buffers
            .get_mut(name)
            .map(|mut entry| f(entry.value_mut()))
            .ok_or_else(|| ShmBufError::BufferNotFound(name.clone()))
    }

    /// Attach every buffer. Returns the number of buffers that reported success.
    pub fn attach_all(&self) -> usize {
        self.buffers
            .iter_mut()
            .map(|mut entry| entry.value_mut().attach())
            .filter(|attached| *attached)
            .count()
    }

    /// Detach every buffer. Returns the number of buffers that reported success.
    pub fn detach_all(&self) -> usize {
        self.buffers
            .iter_mut()
            .map(|mut entry| entry.value_mut().detach())
            .filter(|detached| *detached)
            .count()
    }

    /// Get a sorted list of all buffer names.
    pub fn names(&self) -> Vec<BufferName> {
        let mut names: Vec<_> = self.buffers.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Get the number of registered buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Sum of all registered buffer sizes.
    pub fn total_bytes(&self) -> u64 {
        self.buffers.iter().map(|r| u64::from(r.buffer_size())).sum()
    }
}
