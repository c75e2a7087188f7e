use anyhow::Result;
use serde::Serialize;

use jad_core::services::decompile::default_decompiler_registry;

#[derive(Debug, Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub description: String,
}

/// List available decompiler backends known to this binary.
pub fn list_backends_command(json: bool) -> Result<()> {
    let registry = default_decompiler_registry();
    let entries: Vec<BackendInfo> = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            registry.get(&name).map(|backend| BackendInfo {
                name: name.clone(),
                description: backend.description().to_string(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Backends: (none)");
        return Ok(());
    }

    println!("Backends:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
