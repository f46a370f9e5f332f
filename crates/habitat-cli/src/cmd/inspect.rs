use std::path::Path;

use anyhow::Context;

use habitat_core::manifest::{normalize_command, Manifest};
use habitat_core::selection::effective_version;

use crate::output::{print_json, print_table, truncate};

/// Show what a manifest contains, normalized but unresolved: no backend
/// call, no cart change. Useful for checking a file before importing it.
pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let manifest = Manifest::load(file)
        .with_context(|| format!("failed to read manifest {}", file.display()))?;

    if json {
        let items: Vec<serde_json::Value> = manifest
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "section": item.section,
                    "name": item.name,
                    "version": effective_version(item.entry.version.as_deref()),
                    "command": normalize_command(item.entry.install_command.as_ref()),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if manifest.is_empty() {
        println!("No entries in {}", file.display());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = manifest
        .items
        .iter()
        .map(|item| {
            vec![
                item.section.to_string(),
                item.name.clone(),
                effective_version(item.entry.version.as_deref()),
                truncate(&normalize_command(item.entry.install_command.as_ref()), 60),
            ]
        })
        .collect();
    print_table(&["SECTION", "NAME", "VERSION", "COMMAND"], rows);
    Ok(())
}
