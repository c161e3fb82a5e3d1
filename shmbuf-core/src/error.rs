//! Custom error types for shmbuf.
//!
//! This module defines explicit enum error types.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::BufferName;

/// Top-level error type for shmbuf.
/// All errors are explicit variants - no catch-all or generic handling.
#[derive(Debug, Error)]
pub enum ShmBufError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Buffer Errors - Reported to the caller, never retried
    // =========================================================================
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Buffer not found: {0}")]
    BufferNotFound(BufferName),

    #[error("Buffer already exists: {0}")]
    BufferAlreadyExists(BufferName),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while creating a buffer.
///
/// Both kinds are detected inside the create call and no handle is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Invalid buffer size: {requested} (must be a positive number of bytes)")]
    InvalidArgument { requested: i64 },

    #[error("Failed to allocate {size} bytes: {reason}")]
    AllocationFailure { size: u64, reason: String },
}

/// Hard validation errors reject a configuration outright.
/// Used when configuration is invalid and no buffer may be provisioned.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Buffer size out of bounds: {size} bytes (min: 1, max: {max})")]
    BufferSizeOutOfBounds { size: i64, max: u64 },

    #[error("Total buffer bytes {total} exceed limit {limit}")]
    TotalBytesExceeded { total: u64, limit: u64 },

    #[error("Duplicate buffer name: {name}")]
    DuplicateBufferName { name: String },

    #[error("Schema validation failed: {message}")]
    SchemaValidation { message: String },
}

/// Result type alias using ShmBufError.
pub type ShmBufResult<T> = Result<T, ShmBufError>;
