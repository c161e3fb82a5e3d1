//! Handle-style buffer API.
//!
//! Free functions over optional buffer handles, for callers that pass buffers
//! around as "maybe empty" values. `None` is the empty handle; every function
//! accepts it without failing.

use std::ptr::NonNull;

use crate::buffer::backend::Backend;
use crate::buffer::heap::HeapBackend;
use crate::buffer::region::Buffer;
use crate::error::BufferError;

/// Create a heap-backed buffer of `size` bytes.
pub fn create(size: i64) -> Result<Buffer<HeapBackend>, BufferError> {
    Buffer::create(size)
}

/// Release a buffer and everything it owns.
///
/// The handle is consumed, so the same buffer cannot be released twice.
/// Releasing the empty handle does nothing.
pub fn release<B: Backend>(handle: Option<Buffer<B>>) {
    drop(handle);
}

/// Raw pointer to the buffer's bytes, or `None` for the empty handle.
///
/// No bounds are attached; use [`get_size`].
pub fn get_pointer<B: Backend>(handle: Option<&mut Buffer<B>>) -> Option<NonNull<u8>> {
    handle.map(Buffer::as_mut_ptr)
}

/// Size recorded at creation, or `None` for the empty handle.
pub fn get_size<B: Backend>(handle: Option<&Buffer<B>>) -> Option<usize> {
    handle.map(Buffer::size)
}

/// Run the attach hook. Always reports success, including for the empty handle.
pub fn attach<B: Backend>(handle: Option<&mut Buffer<B>>) -> bool {
    handle.map_or(true, |buffer| buffer.attach())
}

/// Run the detach hook. Always reports success, including for the empty handle.
pub fn detach<B: Backend>(handle: Option<&mut Buffer<B>>) -> bool {
    handle.map_or(true, |buffer| buffer.detach())
}
