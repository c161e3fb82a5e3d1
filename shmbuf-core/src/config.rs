// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Describes the named buffers to provision and the limits they must fit in.
//! Any invalid field results in a HardValidationError before anything is allocated.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::buffer::BackendKind;
use crate::error::{HardValidationError, ShmBufError, ShmBufResult};
use crate::types::{BufferName, BufferSize};

/// Raw buffer entry as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawBufferConfig {
    name: String,
    size: i64,
    #[serde(default)]
    backend: BackendKind,
}

/// Raw limits section.
#[derive(Debug, Deserialize)]
struct RawLimitsConfig {
    #[serde(default = "default_max_buffer_size")]
    max_buffer_size: u64,
    #[serde(default = "default_max_total_bytes")]
    max_total_bytes: u64,
}

fn default_max_buffer_size() -> u64 {
    1024 * 1024 * 1024 // 1 GiB
}

fn default_max_total_bytes() -> u64 {
    4 * 1024 * 1024 * 1024 // 4 GiB
}

impl Default for RawLimitsConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: default_max_buffer_size(),
            max_total_bytes: default_max_total_bytes(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    limits: RawLimitsConfig,
    buffers: Vec<RawBufferConfig>,
}

/// Validated buffer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    pub name: BufferName,
    pub size: BufferSize,
    pub backend: BackendKind,
}

/// Validated limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitsConfig {
    pub max_buffer_size: u64,
    pub max_total_bytes: u64,
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub limits: LimitsConfig,
    pub buffers: Vec<BufferConfig>,
}

impl Config {
    /// Sum of all configured buffer sizes.
    pub fn total_bytes(&self) -> u64 {
        self.buffers.iter().map(|b| u64::from(b.size)).sum()
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> ShmBufResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ShmBufError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ShmBufError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> ShmBufResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ShmBufError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> ShmBufResult<Config> {
        let limits = Self::validate_limits(raw.limits)?;

        let mut buffers = Vec::with_capacity(raw.buffers.len());
        let mut seen_names = HashSet::new();
        let mut total: u64 = 0;

        for raw_buffer in raw.buffers {
            let buffer = Self::validate_buffer(raw_buffer, &limits)?;

            if !seen_names.insert(buffer.name.clone()) {
                return Err(HardValidationError::DuplicateBufferName {
                    name: buffer.name.to_string(),
                }
                .into());
            }

            total = total.saturating_add(buffer.size.into());
            buffers.push(buffer);
        }

        if buffers.is_empty() {
            return Err(HardValidationError::SchemaValidation {
                message: "At least one buffer must be defined".to_string(),
            }
            .into());
        }

        if total > limits.max_total_bytes {
            return Err(HardValidationError::TotalBytesExceeded {
                total,
                limit: limits.max_total_bytes,
            }
            .into());
        }

        Ok(Config { limits, buffers })
    }

    fn validate_limits(raw: RawLimitsConfig) -> ShmBufResult<LimitsConfig> {
        if raw.max_buffer_size == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_buffer_size",
                value: "0".to_string(),
                reason: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if raw.max_total_bytes < raw.max_buffer_size {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_total_bytes",
                value: raw.max_total_bytes.to_string(),
                reason: format!(
                    "Must be at least max_buffer_size ({})",
                    raw.max_buffer_size
                ),
            }
            .into());
        }

        Ok(LimitsConfig {
            max_buffer_size: raw.max_buffer_size,
            max_total_bytes: raw.max_total_bytes,
        })
    }

    fn validate_buffer(raw: RawBufferConfig, limits: &LimitsConfig) -> ShmBufResult<BufferConfig> {
        let name = BufferName::new(raw.name)?;

        if raw.size <= 0 || raw.size as u64 > limits.max_buffer_size {
            return Err(HardValidationError::BufferSizeOutOfBounds {
                size: raw.size,
                max: limits.max_buffer_size,
            }
            .into());
        }
        let size = BufferSize::new(raw.size)?;

        if raw.backend != BackendKind::LocalHeap {
            return Err(HardValidationError::InvalidFieldValue {
                field: "backend",
                value: raw.backend.to_string(),
                reason: format!("No {} backend is available in this build", raw.backend),
            }
            .into());
        }

        Ok(BufferConfig {
            name,
            size,
            backend: raw.backend,
        })
    }
}
