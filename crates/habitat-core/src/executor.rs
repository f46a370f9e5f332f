use std::process::Command;
use std::time::Instant;

use serde::Serialize;

use crate::selection::{Selection, SelectionEntry};

/// Outcome of executing one staged entry. Produced per run, reported,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub name: String,
    pub version: String,
    pub command: String,
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

/// Execute one entry's command as a single shell line.
///
/// An empty command is a successful no-op: nothing is spawned. A shell
/// that cannot be spawned is recorded as a failure with the error text in
/// stderr. Every entry always yields a result.
pub fn run_entry(entry: &SelectionEntry) -> ExecutionResult {
    if entry.command.is_empty() {
        return ExecutionResult {
            name: entry.name.clone(),
            version: entry.version.clone(),
            command: String::new(),
            succeeded: true,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
        };
    }

    execute(shell_command(&entry.command), entry)
}

fn execute(mut shell: Command, entry: &SelectionEntry) -> ExecutionResult {
    let start = Instant::now();
    let output = shell.output();
    let duration_ms = start.elapsed().as_millis() as u64;

    match output {
        Ok(output) => ExecutionResult {
            name: entry.name.clone(),
            version: entry.version.clone(),
            command: entry.command.clone(),
            succeeded: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms,
        },
        Err(e) => ExecutionResult {
            name: entry.name.clone(),
            version: entry.version.clone(),
            command: entry.command.clone(),
            succeeded: false,
            stdout: String::new(),
            stderr: format!("failed to spawn shell: {e}"),
            duration_ms,
        },
    }
}

/// Run every entry in order, one subprocess at a time, to completion.
///
/// Strictly sequential: later entries may depend on state established by
/// earlier ones. A failing entry never stops the run; the joiner inside a
/// single entry short-circuits that entry's steps, the outer loop never
/// short-circuits.
pub fn run(selection: &Selection) -> Vec<ExecutionResult> {
    selection.iter().map(run_entry).collect()
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}
