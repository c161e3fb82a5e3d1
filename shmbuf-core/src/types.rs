// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{BufferError, HardValidationError};

/// Maximum length of a buffer name.
const MAX_NAME_LEN: usize = 64;

/// Validated buffer capacity in bytes.
/// Always non-zero and addressable on the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct BufferSize(NonZeroUsize);

impl BufferSize {
    /// Create a new BufferSize from a signed request.
    ///
    /// Non-positive requests are rejected with `InvalidArgument` before any
    /// allocation is attempted.
    pub fn new(requested: i64) -> Result<Self, BufferError> {
        if requested <= 0 {
            return Err(BufferError::InvalidArgument { requested });
        }

        let bytes = usize::try_from(requested).map_err(|_| BufferError::AllocationFailure {
            size: requested as u64,
            reason: "size exceeds the address space of this target".to_string(),
        })?;

        NonZeroUsize::new(bytes)
            .map(Self)
            .ok_or(BufferError::InvalidArgument { requested })
    }

    /// Get the size in bytes.
    pub fn bytes(&self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for BufferSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

impl TryFrom<i64> for BufferSize {
    type Error = BufferError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BufferSize> for u64 {
    fn from(size: BufferSize) -> Self {
        size.bytes() as u64
    }
}

/// Validated buffer name.
/// Must be non-empty, alphanumeric with hyphens/underscores, max 64 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BufferName(String);

impl BufferName {
    /// Create a new BufferName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Buffer name cannot be empty".to_string(),
            });
        }

        if name.len() > MAX_NAME_LEN {
            let len = name.len();
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: format!("Buffer name too long: {} chars (max {})", len, MAX_NAME_LEN),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason:
                    "Buffer name must contain only alphanumeric characters, hyphens, and underscores"
                        .to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BufferName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BufferName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BufferName> for String {
    fn from(name: BufferName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_valid() {
        assert_eq!(BufferSize::new(1).unwrap().bytes(), 1);
        assert_eq!(BufferSize::new(64).unwrap().bytes(), 64);
        assert_eq!(BufferSize::new(4096).unwrap().bytes(), 4096);
    }

    #[test]
    fn test_buffer_size_non_positive() {
        assert_eq!(
            BufferSize::new(0),
            Err(BufferError::InvalidArgument { requested: 0 })
        );
        assert_eq!(
            BufferSize::new(-5),
            Err(BufferError::InvalidArgument { requested: -5 })
        );
        assert_eq!(
            BufferSize::new(i64::MIN),
            Err(BufferError::InvalidArgument { requested: i64::MIN })
        );
    }

    #[test]
    fn test_buffer_size_display() {
        assert_eq!(BufferSize::new(64).unwrap().to_string(), "64 bytes");
    }

    #[test]
    fn test_buffer_size_deserialize() {
        let size: BufferSize = serde_yaml::from_str("128").unwrap();
        assert_eq!(size.bytes(), 128);
        assert!(serde_yaml::from_str::<BufferSize>("-1").is_err());
    }

    #[test]
    fn test_buffer_name_valid() {
        assert!(BufferName::new("events").is_ok());
        assert!(BufferName::new("event_ring-0").is_ok());
        assert!(BufferName::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn test_buffer_name_invalid() {
        assert!(BufferName::new("").is_err());
        assert!(BufferName::new("a".repeat(65)).is_err());
        assert!(BufferName::new("events/0").is_err());
        assert!(BufferName::new("two words").is_err());
    }
}
