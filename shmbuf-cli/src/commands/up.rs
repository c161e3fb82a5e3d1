//! `shmbuf up` command - Provision configured buffers.
//!
//! Allocates every buffer in the configuration into a registry, attaches
//! them and prints a status table. With `--hold` the buffers stay allocated
//! until Ctrl-C.

use std::path::Path;

use shmbuf_core::{BufferRegistry, ConfigLoader};

/// Load a configuration and provision all of its buffers.
pub fn provision(config_path: impl AsRef<Path>) -> Result<BufferRegistry, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_file(config_path)?;

    tracing::info!(
        buffers = config.buffers.len(),
        total_bytes = config.total_bytes(),
        "Configuration validated successfully"
    );

    let registry = BufferRegistry::new();
    registry.provision(&config)?;
    Ok(registry)
}

pub async fn execute(config_path: &str, hold: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(config = %config_path, hold, "Provisioning buffers");

    let registry = provision(config_path)?;
    let attached = registry.attach_all();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    SHMBUF BUFFERS                            ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    for name in registry.names() {
        let size = registry.size_of(&name)?;
        let backend = registry.with_buffer(&name, |b| b.backend_kind())?;
        println!("║ ● {:<24} {:>14} bytes  [{}]", name.as_str(), size, backend);
    }
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!(
        "║ {} of {} attached, {} bytes total",
        attached,
        registry.len(),
        registry.total_bytes()
    );
    println!("╚══════════════════════════════════════════════════════════════╝");

    if hold {
        println!();
        println!("Holding buffers. Press Ctrl+C to release.");

        // Wait for shutdown signal
        tokio::signal::ctrl_c().await?;
        println!();
    }

    let detached = registry.detach_all();
    let released = release_all(&registry);

    tracing::info!(detached, released, "Released all buffers");
    println!("✓ Released {} buffer(s)", released);
    Ok(())
}

/// Release every buffer in the registry. Returns how many were released.
pub fn release_all(registry: &BufferRegistry) -> usize {
    registry
        .names()
        .iter()
        .filter_map(|name| registry.release(name).ok())
        .count()
}
