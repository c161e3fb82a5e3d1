// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmbuf list` command - List buffers from configuration.

use shmbuf_core::ConfigLoader;

pub async fn execute(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_file(config_path)?;

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                     CONFIGURED BUFFERS                       ║");
    println!("╠═════════════════════════╦═══════════════════╦════════════════╣");
    println!("║ Name                    ║ Size (bytes)      ║ Backend        ║");
    println!("╠═════════════════════════╬═══════════════════╬════════════════╣");

    for buffer in &config.buffers {
        println!(
            "║ {:<23} ║ {:<17} ║ {:<14} ║",
            buffer.name.as_str(),
            buffer.size.bytes(),
            buffer.backend.name()
        );
    }

    println!("╚═════════════════════════╩═══════════════════╩════════════════╝");
    println!();
    println!(
        "Total: {} buffer(s), {} bytes",
        config.buffers.len(),
        config.total_bytes()
    );

    Ok(())
}
