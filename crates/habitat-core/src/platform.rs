use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// HostOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOs {
    Windows,
    Darwin,
    Linux,
    Other,
}

impl HostOs {
    /// The operating system this process is running on.
    pub fn current() -> HostOs {
        match std::env::consts::OS {
            "windows" => HostOs::Windows,
            "macos" => HostOs::Darwin,
            "linux" => HostOs::Linux,
            _ => HostOs::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::Windows => "windows",
            HostOs::Darwin => "darwin",
            HostOs::Linux => "linux",
            HostOs::Other => "other",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PlatformContext
// ---------------------------------------------------------------------------

/// What resolution needs to know about the machine it runs on.
/// Resolved once per pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    pub host: HostOs,
    /// Package manager generated commands should target, e.g. "brew".
    pub package_manager: String,
}

impl PlatformContext {
    pub fn new(host: HostOs, package_manager: impl Into<String>) -> Self {
        PlatformContext {
            host,
            package_manager: package_manager.into(),
        }
    }

    /// Detect the current host and its preferred package manager.
    pub fn detect() -> Self {
        let host = HostOs::current();
        PlatformContext {
            host,
            package_manager: detect_package_manager(host),
        }
    }
}

/// Probe PATH for the host's package manager, in priority order.
/// Falls back to a neutral phrase the backend can still act on.
pub fn detect_package_manager(host: HostOs) -> String {
    let candidates: &[&str] = match host {
        HostOs::Darwin => &["brew", "port"],
        HostOs::Windows => &["winget", "choco", "scoop"],
        HostOs::Linux => &["apt", "dnf", "pacman", "zypper"],
        HostOs::Other => &[],
    };
    for name in candidates {
        if which::which(name).is_ok() {
            return (*name).to_string();
        }
    }
    "any package manager".to_string()
}
