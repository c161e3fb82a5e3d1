// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end integration tests for shmbuf.
//!
//! These tests drive the public API from configuration through provisioned buffers.

use shmbuf_core::buffer::handle;
use shmbuf_core::{BufferError, HeapBackend};
use tempfile::TempDir;

/// Create, write through the raw pointer, read back, release.
#[test]
fn test_handle_scenario_64_bytes() {
    let mut h = handle::create(64).expect("Failed to create buffer");
    assert_eq!(handle::get_size(Some(&h)), Some(64));

    let ptr = handle::get_pointer(Some(&mut h)).expect("Pointer missing");
    // SAFETY: the buffer owns exactly 64 bytes and is not otherwise borrowed
    let bytes = unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), 64) };
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(3);
    }

    let expected: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(3)).collect();
    assert_eq!(h.as_slice(), expected.as_slice());

    handle::release(Some(h));
}

/// Non-positive sizes never produce a handle.
#[test]
fn test_non_positive_sizes_rejected() {
    for n in [0i64, -1, -5, i64::MIN] {
        assert_eq!(
            handle::create(n).unwrap_err(),
            BufferError::InvalidArgument { requested: n }
        );
    }
}

/// The pointer addresses exactly `get_size` bytes.
#[test]
fn test_pointer_span_matches_size() {
    for n in [1i64, 7, 64, 4096, 100_000] {
        let mut h = handle::create(n).expect("Failed to create buffer");
        let size = handle::get_size(Some(&h)).expect("Size missing");
        let ptr = handle::get_pointer(Some(&mut h)).expect("Pointer missing");

        // SAFETY: ptr and size describe the region owned by `h`
        let view = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), size) };
        assert_eq!(view.len() as i64, n);
        assert!(view.iter().all(|&b| b == 0));
    }
}

/// Empty handles are accepted everywhere.
#[test]
fn test_empty_handle_is_noop() {
    handle::release::<HeapBackend>(None);
    assert!(handle::get_pointer::<HeapBackend>(None).is_none());
    assert!(handle::get_size::<HeapBackend>(None).is_none());
    assert!(handle::attach::<HeapBackend>(None));
    assert!(handle::detach::<HeapBackend>(None));
}

/// Attach and detach leave content and size untouched.
#[test]
fn test_attach_detach_have_no_effect() {
    let mut h = handle::create(256).expect("Failed to create buffer");
    h.as_mut_slice()
        .iter_mut()
        .enumerate()
        .for_each(|(i, b)| *b = i as u8);
    let checksum = h.checksum();

    for _ in 0..3 {
        assert!(handle::attach(Some(&mut h)));
        assert!(handle::detach(Some(&mut h)));
    }

    assert_eq!(h.checksum(), checksum);
    assert_eq!(handle::get_size(Some(&h)), Some(256));
}

/// Allocation exhaustion is reported, not fatal.
#[test]
#[cfg(target_pointer_width = "64")]
fn test_allocation_failure_reported() {
    let err = handle::create(i64::MAX).unwrap_err();
    assert!(matches!(err, BufferError::AllocationFailure { .. }));
}

/// Test configuration loading and provisioning
#[test]
fn test_config_provisioning() {
    use shmbuf_core::{BufferName, BufferRegistry, ConfigLoader};

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("shmbuf.yaml");

    std::fs::write(
        &config_path,
        r#"
limits:
  max_buffer_size: 65536

buffers:
  - name: events
    size: 4096
  - name: replies
    size: 1024
"#,
    )
    .expect("Failed to write config");

    let config = ConfigLoader::load_file(&config_path).expect("Failed to load config");
    assert_eq!(config.buffers.len(), 2);

    let registry = BufferRegistry::new();
    registry.provision(&config).expect("Failed to provision");

    let events = BufferName::new("events").unwrap();
    assert_eq!(registry.size_of(&events).unwrap(), 4096);
    assert_eq!(registry.total_bytes(), 5120);
    assert_eq!(registry.attach_all(), 2);
    assert_eq!(registry.detach_all(), 2);

    let released = registry.release(&events).unwrap();
    assert_eq!(released.size(), 4096);
    assert_eq!(registry.len(), 1);
}

/// Test invalid configuration is rejected
#[test]
fn test_invalid_config_rejected() {
    use shmbuf_core::ConfigLoader;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    std::fs::write(
        &config_path,
        r#"
buffers:
  - name: events
    size: 64
  - name: events
    size: 64
"#,
    )
    .expect("Failed to write config");

    let result = ConfigLoader::load_file(&config_path);
    assert!(result.is_err(), "Duplicate names should be rejected");
}

/// Missing file is distinguished from a bad file
#[test]
fn test_missing_config_file() {
    use shmbuf_core::{ConfigLoader, ShmBufError};

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = ConfigLoader::load_file(temp_dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ShmBufError::ConfigNotFound { .. })));
}
