use std::path::{Path, PathBuf};

use crate::paths::HABITAT_DIR;

/// Resolve the habitat root directory.
///
/// Priority:
/// 1. `--root` flag / `HABITAT_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of `cwd` containing `.habitat/`
/// 3. Nearest ancestor of `cwd` containing `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    nearest_with(&cwd, HABITAT_DIR)
        .or_else(|| nearest_with(&cwd, ".git"))
        .unwrap_or(cwd)
}

fn nearest_with(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
