//! Buffer - owned fixed-size memory region.
//!
//! Wraps a region handed out by a [`Backend`] together with its size.
//! The region is released when the buffer is dropped, on every exit path.

use std::fmt;
use std::ptr::NonNull;

use crate::buffer::backend::{Backend, BackendKind};
use crate::buffer::heap::HeapBackend;
use crate::error::BufferError;
use crate::types::BufferSize;

/// A fixed-size memory region with exclusive ownership.
///
/// The region length always equals `size`; both are set at construction and
/// never modified. No internal locking: a buffer belongs to one owner.
pub struct Buffer<B: Backend = HeapBackend> {
    /// Backend the region came from.
    backend: B,
    /// Owned bytes.
    region: B::Region,
    /// Capacity requested at creation.
    size: BufferSize,
}

impl Buffer<HeapBackend> {
    /// Create a heap-backed buffer of `size` bytes.
    ///
    /// # Errors
    /// `InvalidArgument` if `size` is not positive, `AllocationFailure` if the
    /// heap cannot satisfy the request.
    pub fn create(size: i64) -> Result<Self, BufferError> {
        Self::with_backend(HeapBackend, size)
    }
}

impl<B: Backend> Buffer<B> {
    /// Create a buffer of `size` bytes drawn from `backend`.
    pub fn with_backend(backend: B, size: i64) -> Result<Self, BufferError> {
        let size = BufferSize::new(size)?;
        Self::allocate(backend, size)
    }

    /// Create a buffer from an already validated size.
    pub fn allocate(backend: B, size: BufferSize) -> Result<Self, BufferError> {
        let region = match backend.allocate(size) {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!(size = size.bytes(), backend = %backend.kind(), error = %e, "Buffer allocation failed");
                return Err(e);
            }
        };

        if region.as_ref().len() != size.bytes() {
            return Err(BufferError::AllocationFailure {
                size: size.into(),
                reason: format!(
                    "backend returned {} bytes instead of {}",
                    region.as_ref().len(),
                    size.bytes()
                ),
            });
        }

        tracing::debug!(size = size.bytes(), backend = %backend.kind(), "Created buffer");

        Ok(Self {
            backend,
            region,
            size,
        })
    }

    /// Get the size of this buffer in bytes.
    pub fn size(&self) -> usize {
        self.size.bytes()
    }

    /// Get the validated size.
    pub fn buffer_size(&self) -> BufferSize {
        self.size
    }

    /// Kind of backend holding the bytes.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Get a raw pointer to the start of the region.
    ///
    /// The pointer carries no bounds; pair it with [`Buffer::size`]. It is
    /// valid for reads until the buffer is dropped or mutably borrowed.
    pub fn as_ptr(&self) -> NonNull<u8> {
        NonNull::from(self.region.as_ref()).cast()
    }

    /// Get a raw mutable pointer to the start of the region.
    ///
    /// Writes through the pointer must stay within `size()` bytes and end
    /// before the buffer is dropped or borrowed again.
    pub fn as_mut_ptr(&mut self) -> NonNull<u8> {
        NonNull::from(self.region.as_mut()).cast()
    }

    /// Get a slice view of the region.
    pub fn as_slice(&self) -> &[u8] {
        self.region.as_ref()
    }

    /// Get a mutable slice view of the region.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.region.as_mut()
    }

    /// Run the backend's attach hook.
    pub fn attach(&mut self) -> bool {
        let attached = self.backend.attach(&mut self.region);
        tracing::trace!(size = self.size(), backend = %self.backend.kind(), attached, "Attach");
        attached
    }

    /// Run the backend's detach hook.
    pub fn detach(&mut self) -> bool {
        let detached = self.backend.detach(&mut self.region);
        tracing::trace!(size = self.size(), backend = %self.backend.kind(), detached, "Detach");
        detached
    }

    /// CRC32 of the current contents.
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(self.as_slice())
    }
}

impl<B: Backend> fmt::Debug for Buffer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.size())
            .field("backend", &self.backend.kind())
            .finish_non_exhaustive()
    }
}

impl<B: Backend> Drop for Buffer<B> {
    fn drop(&mut self) {
        tracing::debug!(size = self.size(), backend = %self.backend.kind(), "Released buffer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_records_size() {
        for n in [1i64, 2, 63, 64, 4096, 1 << 20] {
            let buffer = Buffer::create(n).unwrap();
            assert_eq!(buffer.size() as i64, n);
            assert_eq!(buffer.as_slice().len() as i64, n);
            assert_eq!(buffer.buffer_size(), BufferSize::new(n).unwrap());
        }
    }

    #[test]
    fn test_create_rejects_non_positive() {
        assert_eq!(
            Buffer::create(0).unwrap_err(),
            BufferError::InvalidArgument { requested: 0 }
        );
        assert_eq!(
            Buffer::create(-5).unwrap_err(),
            BufferError::InvalidArgument { requested: -5 }
        );
    }

    #[test]
    fn test_write_read_through_slice() {
        let mut buffer = Buffer::create(16).unwrap();
        buffer.as_mut_slice().copy_from_slice(b"0123456789abcdef");
        assert_eq!(buffer.as_slice(), b"0123456789abcdef");
    }

    #[test]
    fn test_pointers_agree() {
        let mut buffer = Buffer::create(32).unwrap();
        let mut_ptr = buffer.as_mut_ptr();
        assert_eq!(mut_ptr, buffer.as_ptr());
    }

    #[test]
    fn test_attach_detach_preserve_contents() {
        let mut buffer = Buffer::create(128).unwrap();
        buffer.as_mut_slice().fill(0x5A);
        let before = buffer.checksum();

        assert!(buffer.attach());
        assert!(buffer.detach());

        assert_eq!(buffer.checksum(), before);
        assert_eq!(buffer.size(), 128);
        assert_eq!(buffer.backend_kind(), BackendKind::LocalHeap);
    }

    #[test]
    fn test_debug_omits_contents() {
        let buffer = Buffer::create(4).unwrap();
        let debug = format!("{:?}", buffer);
        assert!(debug.contains("size: 4"));
        assert!(debug.contains("LocalHeap"));
    }

    /// Backend that returns a region shorter than requested.
    struct ShortBackend;

    impl Backend for ShortBackend {
        type Region = Vec<u8>;

        fn kind(&self) -> BackendKind {
            BackendKind::LocalHeap
        }

        fn allocate(&self, size: BufferSize) -> Result<Self::Region, BufferError> {
            Ok(vec![0; size.bytes() - 1])
        }

        fn attach(&self, _region: &mut Self::Region) -> bool {
            true
        }

        fn detach(&self, _region: &mut Self::Region) -> bool {
            true
        }
    }

    #[test]
    fn test_short_region_rejected() {
        let err = Buffer::with_backend(ShortBackend, 8).unwrap_err();
        assert!(matches!(err, BufferError::AllocationFailure { size: 8, .. }));
    }
}
