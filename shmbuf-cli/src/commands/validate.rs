// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmbuf validate` command - Validate configuration file.

use shmbuf_core::ConfigLoader;

pub async fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Limits:");
            println!(
                "  Max Buffer Size:    {} bytes",
                config.limits.max_buffer_size
            );
            println!(
                "  Max Total Bytes:    {} bytes",
                config.limits.max_total_bytes
            );
            println!();
            println!(
                "Buffers ({}, {} bytes total):",
                config.buffers.len(),
                config.total_bytes()
            );
            for buffer in &config.buffers {
                println!(
                    "  - {} (size: {}, backend: {})",
                    buffer.name, buffer.size, buffer.backend
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
