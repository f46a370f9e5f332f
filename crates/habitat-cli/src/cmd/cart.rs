use std::path::Path;

use anyhow::Context;

use habitat_core::manifest::COMMAND_JOINER;
use habitat_core::selection::{effective_version, Selection, SelectionEntry};

use crate::backend;
use crate::config::CliConfig;
use crate::output::{print_json, print_table, truncate};
use crate::session;

/// Stage one item. With an explicit command it goes straight into the
/// cart; otherwise the backend synthesizes one for the current platform.
pub fn add(
    root: &Path,
    name: &str,
    version: Option<&str>,
    command: Option<&str>,
    package_manager: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = CliConfig::load(root)?;
    let mut selection = session::load(root)?;

    let version = effective_version(version);
    let command = match command {
        Some(c) => c.to_string(),
        None => {
            let ctx = config.platform_context(package_manager);
            let generator = backend::generator(&config, false);
            let commands = generator
                .generate_install_commands(ctx.host, name, &ctx.package_manager, &version)
                .with_context(|| format!("failed to generate an install command for {name}"))?;
            commands.join(COMMAND_JOINER)
        }
    };

    let entry = SelectionEntry::new(name, version, command);
    match selection.add(entry.clone()) {
        Ok(()) => {
            session::save(root, &selection)?;
            if json {
                print_json(&serde_json::json!({ "added": entry, "total": selection.len() }))?;
            } else {
                println!("Added {} {}", entry.name, entry.version);
            }
            Ok(())
        }
        Err(e) if e.is_advisory() => {
            advisory(&e.to_string(), selection.len(), json)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let selection = session::load(root)?;
    if json {
        print_json(&selection.entries())?;
        return Ok(());
    }
    if selection.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = selection
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                (i + 1).to_string(),
                e.name.clone(),
                e.version.clone(),
                truncate(&e.command, 60),
            ]
        })
        .collect();
    print_table(&["#", "NAME", "VERSION", "COMMAND"], rows);
    Ok(())
}

/// Remove the 1-based entry shown by `list`.
pub fn remove(root: &Path, index: usize, json: bool) -> anyhow::Result<()> {
    let mut selection = session::load(root)?;
    let Some(entry) = entry_at(&selection, index) else {
        return advisory(
            &format!("no cart entry at {index}; run 'habitat list'"),
            selection.len(),
            json,
        );
    };
    selection.remove(&entry)?;
    session::save(root, &selection)?;
    if json {
        print_json(&serde_json::json!({ "removed": entry, "total": selection.len() }))?;
    } else {
        println!("Removed {} {}", entry.name, entry.version);
    }
    Ok(())
}

/// Change the version of the 1-based entry shown by `list`.
pub fn update_version(root: &Path, index: usize, version: &str, json: bool) -> anyhow::Result<()> {
    let mut selection = session::load(root)?;
    let Some(entry) = entry_at(&selection, index) else {
        return advisory(
            &format!("no cart entry at {index}; run 'habitat list'"),
            selection.len(),
            json,
        );
    };
    match selection.update_version(&entry, version) {
        Ok(updated) => {
            session::save(root, &selection)?;
            if json {
                print_json(&serde_json::json!({ "updated": updated, "total": selection.len() }))?;
            } else {
                println!(
                    "Updated {} {} -> {}",
                    updated.name, entry.version, updated.version
                );
            }
            Ok(())
        }
        Err(e) if e.is_advisory() => advisory(&e.to_string(), selection.len(), json),
        Err(e) => Err(e.into()),
    }
}

pub fn clear(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut selection = session::load(root)?;
    let removed = selection.len();
    selection.clear();
    session::save(root, &selection)?;
    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else {
        println!("Removed {removed} entries.");
    }
    Ok(())
}

fn entry_at(selection: &Selection, index: usize) -> Option<SelectionEntry> {
    index
        .checked_sub(1)
        .and_then(|i| selection.get(i))
        .cloned()
}

/// Advisory outcomes leave the cart untouched and exit successfully.
fn advisory(message: &str, total: usize, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&serde_json::json!({ "warning": message, "total": total }))?;
    } else {
        eprintln!("warning: {message}");
    }
    Ok(())
}
