use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use habitat_core::selection::{Selection, SelectionEntry};

use crate::paths;

/// On-disk form of the cart. A CLI process ends after every command, so the
/// working selection is carried in `.habitat/cart.yaml` between
/// invocations. Raw entry list, never manifest form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSession {
    #[serde(default = "default_version")]
    pub version: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub entries: Vec<SelectionEntry>,
}

fn default_version() -> u32 {
    1
}

/// Load the cart, or an empty one when no session exists yet.
pub fn load(root: &Path) -> anyhow::Result<Selection> {
    let path = paths::cart_path(root);
    if !path.exists() {
        return Ok(Selection::new());
    }
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let session: CartSession = serde_yaml::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(entries = session.entries.len(), "loaded cart session");
    Ok(Selection::from_entries(session.entries))
}

/// Write the cart back, atomically.
pub fn save(root: &Path, selection: &Selection) -> anyhow::Result<()> {
    let session = CartSession {
        version: 1,
        updated_at: Utc::now(),
        entries: selection.entries().to_vec(),
    };
    let data = serde_yaml::to_string(&session)?;
    let path = paths::cart_path(root);
    habitat_core::io::atomic_write(&path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
