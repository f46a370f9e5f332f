mod backend;
mod cmd;
mod config;
mod output;
mod paths;
mod root;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// No propagate_version here: the auto --version flag it pushes into every
// subcommand would collide with the `version` args on `add` and `update-version`.
#[derive(Parser)]
#[command(
    name = "habitat",
    about = "Turn a declarative software manifest into executable install actions",
    version
)]
struct Cli {
    /// Project root (default: auto-detect from .habitat/ or .git/)
    #[arg(long, global = true, env = "HABITAT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the cart with a manifest's resolved entries
    Import {
        /// Manifest file to read
        file: PathBuf,

        /// Never call the generative backend; skip entries that would need it
        #[arg(long)]
        offline: bool,

        /// Package manager for generated commands (default: detect)
        #[arg(long)]
        package_manager: Option<String>,
    },

    /// Stage one item, generating its command unless one is given
    Add {
        /// Item to install
        name: String,

        /// Version to pin (default: latest)
        #[arg(long)]
        version: Option<String>,

        /// Use this install command instead of generating one
        #[arg(long)]
        command: Option<String>,

        /// Package manager for generated commands (default: detect)
        #[arg(long)]
        package_manager: Option<String>,
    },

    /// Show the cart
    List,

    /// Remove the cart entry at INDEX (as shown by 'habitat list')
    Remove { index: usize },

    /// Change the version of the cart entry at INDEX
    UpdateVersion { index: usize, version: String },

    /// Empty the cart
    Clear,

    /// Execute every cart entry, one subprocess at a time
    Run,

    /// Write the cart back out as a manifest
    Export {
        /// Output file
        #[arg(default_value = "habitat.yaml")]
        file: PathBuf,
    },

    /// Show a manifest's entries without resolving or staging them
    Inspect {
        /// Manifest file to read
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Import {
            file,
            offline,
            package_manager,
        } => cmd::import::run(&root, &file, offline, package_manager.as_deref(), cli.json),
        Commands::Add {
            name,
            version,
            command,
            package_manager,
        } => cmd::cart::add(
            &root,
            &name,
            version.as_deref(),
            command.as_deref(),
            package_manager.as_deref(),
            cli.json,
        ),
        Commands::List => cmd::cart::list(&root, cli.json),
        Commands::Remove { index } => cmd::cart::remove(&root, index, cli.json),
        Commands::UpdateVersion { index, version } => {
            cmd::cart::update_version(&root, index, &version, cli.json)
        }
        Commands::Clear => cmd::cart::clear(&root, cli.json),
        Commands::Run => cmd::run::run(&root, cli.json),
        Commands::Export { file } => cmd::export::run(&root, &file, cli.json),
        Commands::Inspect { file } => cmd::inspect::run(&file, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Runs clap's definition assertions, which otherwise only fire inside
    // parse() in debug builds. Catches arg id collisions such as a subcommand
    // `version` arg against an inherited auto --version flag.
    #[test]
    fn cli_definition_passes_claps_assertions() {
        Cli::command().debug_assert();
    }
}
