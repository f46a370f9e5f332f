use thiserror::Error;

#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("cannot reach ollama at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("ollama returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed reply from ollama: {0}")]
    Malformed(#[source] reqwest::Error),

    #[error("empty reply from model {model}")]
    EmptyReply { model: String },

    #[error("no command lines in reply for {library}")]
    NoCommands { library: String },
}

impl OllamaError {
    /// True when the reply arrived but contained nothing usable: a blank
    /// message body, or one with no command lines in it. A blank reply is
    /// the degenerate case of "no command lines", so both sit on this side
    /// of the split; `Unreachable`, `Api`, and `Malformed` mean the backend
    /// itself is down or broken.
    pub fn is_empty_generation(&self) -> bool {
        matches!(
            self,
            OllamaError::EmptyReply { .. } | OllamaError::NoCommands { .. }
        )
    }
}
