use std::path::Path;

use habitat_core::executor::{self, ExecutionResult};

use crate::output::print_json;
use crate::session;

/// Execute the cart in order, one subprocess at a time. A failing entry is
/// reported and the run continues; the command itself always exits 0 once
/// every entry has been given its turn.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let selection = session::load(root)?;

    if json {
        let results = executor::run(&selection);
        print_json(&results)?;
        return Ok(());
    }

    if selection.is_empty() {
        println!("Cart is empty; nothing to run.");
        return Ok(());
    }

    let mut results: Vec<ExecutionResult> = Vec::with_capacity(selection.len());
    for entry in selection.iter() {
        if entry.command.is_empty() {
            println!("Nothing to run for {} {}", entry.name, entry.version);
            results.push(executor::run_entry(entry));
            continue;
        }
        println!("Running {} {}: {}", entry.name, entry.version, entry.command);
        let result = executor::run_entry(entry);
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        if !result.succeeded {
            eprintln!("error: {} {} failed", result.name, result.version);
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
        }
        results.push(result);
    }

    let failed = results.iter().filter(|r| !r.succeeded).count();
    println!(
        "Finished: {} succeeded, {} failed.",
        results.len() - failed,
        failed
    );
    Ok(())
}
