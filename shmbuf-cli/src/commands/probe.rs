// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmbuf probe` command - Exercise one buffer end to end.
//!
//! Creates a buffer, attaches it, fills it through the raw pointer, verifies
//! the contents, detaches and releases it.

use serde::Serialize;
use thiserror::Error;

use shmbuf_core::buffer::handle;
use shmbuf_core::BufferError;

/// Errors that can occur while probing a buffer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to create buffer: {0}")]
    Create(#[from] BufferError),

    #[error("Buffer contents changed across detach: {before:#010x} -> {after:#010x}")]
    ContentChanged { before: u32, after: u32 },

    #[error("Buffer read back {mismatched} byte(s) that differ from pattern {pattern:#04x}")]
    PatternMismatch { pattern: u8, mismatched: usize },
}

/// Outcome of a successful probe.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub size: usize,
    pub backend: String,
    pub cross_process: bool,
    pub pattern: u8,
    pub attached: bool,
    pub detached: bool,
    pub checksum: u32,
}

/// Parse a byte given in decimal or `0x` hex.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte '{}': {}", s, e))
}

/// Run the probe without printing anything.
pub fn run(size: i64, pattern: u8) -> Result<ProbeReport, ProbeError> {
    let mut buffer = handle::create(size)?;
    let attached = handle::attach(Some(&mut buffer));

    let len = buffer.size();
    let ptr = buffer.as_mut_ptr();
    // SAFETY: ptr addresses `len` bytes owned by `buffer`, which outlives this write
    unsafe { std::ptr::write_bytes(ptr.as_ptr(), pattern, len) };

    let mismatched = buffer.as_slice().iter().filter(|&&b| b != pattern).count();
    if mismatched > 0 {
        return Err(ProbeError::PatternMismatch {
            pattern,
            mismatched,
        });
    }

    let before = buffer.checksum();
    let detached = handle::detach(Some(&mut buffer));
    let after = buffer.checksum();
    if before != after {
        return Err(ProbeError::ContentChanged { before, after });
    }

    let report = ProbeReport {
        size: len,
        backend: buffer.backend_kind().to_string(),
        cross_process: buffer.backend_kind().is_cross_process(),
        pattern,
        attached,
        detached,
        checksum: after,
    };

    handle::release(Some(buffer));
    Ok(report)
}

pub async fn execute(size: i64, pattern: u8, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(size, pattern, "Probing buffer");

    let report = run(size, pattern)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("✓ Probe passed");
    println!("  Size:          {} bytes", report.size);
    println!(
        "  Backend:       {} (cross-process: {})",
        report.backend,
        if report.cross_process { "yes" } else { "no" }
    );
    println!("  Pattern:       {:#04x}", report.pattern);
    println!("  Attach/Detach: {}/{}", report.attached, report.detached);
    println!("  CRC32:         {:#010x}", report.checksum);

    Ok(())
}
