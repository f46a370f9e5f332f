use std::path::Path;

use anyhow::Context;

use habitat_core::manifest::Manifest;
use habitat_core::resolver;
use habitat_core::selection::Selection;

use crate::backend;
use crate::config::CliConfig;
use crate::output::print_json;
use crate::session;

pub fn run(
    root: &Path,
    file: &Path,
    offline: bool,
    package_manager: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = CliConfig::load(root)?;
    let manifest = Manifest::load(file)
        .with_context(|| format!("failed to read manifest {}", file.display()))?;

    let ctx = config.platform_context(package_manager);
    let generator = backend::generator(&config, offline);
    tracing::debug!(entries = manifest.len(), host = %ctx.host, "resolving manifest");
    let (resolved, skipped) = resolver::resolve_manifest(&manifest, &ctx, generator.as_ref());

    // import replaces the cart wholesale
    let mut selection = Selection::new();
    let mut duplicates = 0;
    for entry in resolved {
        if selection.add(entry).is_err() {
            duplicates += 1;
        }
    }
    session::save(root, &selection)?;

    if json {
        print_json(&serde_json::json!({
            "staged": selection.len(),
            "duplicates": duplicates,
            "skipped": skipped
                .iter()
                .map(|s| serde_json::json!({ "name": s.name, "reason": s.reason }))
                .collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    for skip in &skipped {
        eprintln!("warning: skipped {}: {}", skip.name, skip.reason);
    }
    if duplicates > 0 {
        eprintln!("warning: ignored {duplicates} duplicate entries");
    }
    println!(
        "Staged {} entries from {}",
        selection.len(),
        file.display()
    );
    Ok(())
}
