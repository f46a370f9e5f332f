use std::path::Path;

use anyhow::Context;

use habitat_core::manifest;

use crate::output::print_json;
use crate::session;

pub fn run(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let selection = session::load(root)?;
    manifest::save(selection.entries(), file)
        .with_context(|| format!("failed to write {}", file.display()))?;

    if json {
        print_json(&serde_json::json!({
            "exported": selection.len(),
            "file": file,
        }))?;
    } else {
        println!("Exported {} entries to {}", selection.len(), file.display());
    }
    Ok(())
}
