//! Prompt construction and reply parsing.
//!
//! The model is told to mark every command line with a sentinel prefix.
//! Parsing then keeps exactly the marked lines, which makes the client
//! robust against models that explain themselves anyway.

/// Marks a line of model output as a command. Only lines carrying this
/// prefix survive parsing.
pub const COMMAND_SENTINEL: &str = "$ ";

/// Build the instruction sent to the model.
///
/// Pins the OS, package manager, library, and version so the model cannot
/// wander, and demands sentinel-prefixed one-command-per-line output so
/// chatter can be filtered out mechanically.
pub fn build_prompt(host_os: &str, library: &str, package_manager: &str, version: &str) -> String {
    format!(
        "You generate terminal commands. Reply with only the exact commands needed to \
         install {library} version {version} on {host_os} using {package_manager}, \
         one command per line, and prefix every command line with '{COMMAND_SENTINEL}'. \
         Do not number the commands. Do not add explanations, steps, or any text that \
         is not a command line. Use only {package_manager} as the package manager, \
         target only {host_os}, and install only {library}. If the version is \
         'latest', install the latest available version."
    )
}

/// Keep only sentinel-prefixed lines, stripped of the sentinel.
pub fn parse_commands(reply: &str) -> Vec<String> {
    reply
        .lines()
        .filter_map(|line| line.strip_prefix(COMMAND_SENTINEL))
        .map(str::to_string)
        .collect()
}
