use std::path::{Path, PathBuf};

/// Directory under the project root holding CLI state.
pub const HABITAT_DIR: &str = ".habitat";

pub fn habitat_dir(root: &Path) -> PathBuf {
    root.join(HABITAT_DIR)
}

/// The cart carried between invocations.
pub fn cart_path(root: &Path) -> PathBuf {
    habitat_dir(root).join("cart.yaml")
}

/// Optional configuration (backend endpoint, package manager).
pub fn config_path(root: &Path) -> PathBuf {
    habitat_dir(root).join("config.yaml")
}
