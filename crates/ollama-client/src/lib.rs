//! `ollama-client` is a blocking driver for a locally running Ollama chat model.
//!
//! Habitat uses one narrow slice of the Ollama API: send a single
//! instruction to `/api/chat`, read back one reply, and keep only the lines
//! the model marked as commands.
//!
//! # Architecture
//!
//! ```text
//! build_prompt     ← pins OS, package manager, library, version
//!     │
//!     ▼
//! OllamaClient     ← one blocking POST /api/chat round trip, stream: false
//!     │
//!     ▼
//! parse_commands   ← keeps "$ "-prefixed lines, drops everything else
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ollama_client::OllamaClient;
//!
//! let client = OllamaClient::from_env();
//! let commands = client.generate_install_commands("darwin", "git", "brew", "latest")?;
//! for command in commands {
//!     println!("{command}");
//! }
//! ```

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{OllamaClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::OllamaError;
pub use prompt::{build_prompt, parse_commands, COMMAND_SENTINEL};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, OllamaError>;
