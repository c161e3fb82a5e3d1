// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Buffer module.
//!
//! Owned fixed-size memory regions behind a backend interface.
//! Only the process-local heap backend ships; its attach/detach hooks are
//! no-ops and nothing here is visible to other processes.

mod backend;
pub mod handle;
mod heap;
mod region;

pub use backend::{Backend, BackendKind};
pub use heap::HeapBackend;
pub use region::Buffer;
