use serde::{Deserialize, Serialize};

use crate::error::OllamaError;
use crate::prompt::{build_prompt, parse_commands};
use crate::Result;

/// Where a default Ollama install listens.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "deepseek-coder:6.7b";

// ─── Wire types ───────────────────────────────────────────────────────────

/// `POST /api/chat` request body. `stream: false` keeps the exchange to a
/// single round trip with one complete reply.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

// ─── Client ───────────────────────────────────────────────────────────────

/// Blocking client for one locally reachable Ollama endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> OllamaClient {
        let base_url = base_url.into();
        OllamaClient {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Honors `OLLAMA_HOST` for the endpoint, falling back to the local
    /// default install, with the default model.
    pub fn from_env() -> OllamaClient {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        OllamaClient::new(base_url, DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the shell commands that install `library` at `version` on
    /// `host_os` through `package_manager`, one command per element.
    ///
    /// Fails with `EmptyReply`/`NoCommands` when the model answered but
    /// produced nothing usable; callers must not substitute a placeholder.
    pub fn generate_install_commands(
        &self,
        host_os: &str,
        library: &str,
        package_manager: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        let prompt = build_prompt(host_os, library, package_manager, version);
        let reply = self.chat(&prompt)?;
        let commands = parse_commands(&reply);
        if commands.is_empty() {
            tracing::warn!(library, "model reply contained no command lines");
            return Err(OllamaError::NoCommands {
                library: library.to_string(),
            });
        }
        tracing::debug!(library, count = commands.len(), "generated install commands");
        Ok(commands)
    }

    /// One blocking chat round trip. Returns the assistant's raw reply.
    fn chat(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        tracing::debug!(model = %self.model, %url, "sending chat request");
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .map_err(|source| OllamaError::Unreachable {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().map_err(OllamaError::Malformed)?;
        let content = reply.message.map(|m| m.content).unwrap_or_default();
        if content.trim().is_empty() {
            return Err(OllamaError::EmptyReply {
                model: self.model.clone(),
            });
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> OllamaClient {
        OllamaClient::new(server.url(), DEFAULT_MODEL)
    }

    #[test]
    fn chat_round_trip_parses_sentinel_lines() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": DEFAULT_MODEL,
                "stream": false,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": {"role": "assistant", "content": "$ brew install git\nSome explanation\n$ brew link git"}}"#,
            )
            .create();

        let commands = client_for(&server)
            .generate_install_commands("darwin", "git", "brew", "latest")
            .unwrap();
        assert_eq!(commands, ["brew install git", "brew link git"]);
        mock.assert();
    }

    #[test]
    fn prompt_is_sent_as_a_single_user_message() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "messages": [{"role": "user"}],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "$ brew install jq"}}"#)
            .create();

        client_for(&server)
            .generate_install_commands("darwin", "jq", "brew", "latest")
            .unwrap();
        mock.assert();
    }

    #[test]
    fn reply_without_command_lines_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "I cannot help with that."}}"#)
            .create();

        let err = client_for(&server)
            .generate_install_commands("darwin", "git", "brew", "latest")
            .unwrap_err();
        assert!(matches!(err, OllamaError::NoCommands { .. }));
        assert!(err.is_empty_generation());
    }

    #[test]
    fn empty_reply_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "  "}}"#)
            .create();

        let err = client_for(&server)
            .generate_install_commands("darwin", "git", "brew", "latest")
            .unwrap_err();
        assert!(matches!(err, OllamaError::EmptyReply { .. }));
    }

    #[test]
    fn http_error_status_surfaces_as_api_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .create();

        let err = client_for(&server)
            .generate_install_commands("darwin", "git", "brew", "latest")
            .unwrap_err();
        match err {
            OllamaError::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("model not loaded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(!OllamaError::Api {
            status: 500,
            body: String::new()
        }
        .is_empty_generation());
    }

    #[test]
    fn unreachable_endpoint_is_an_error() {
        // nothing listens on this port
        let client = OllamaClient::new("http://127.0.0.1:1", DEFAULT_MODEL);
        let err = client
            .generate_install_commands("darwin", "git", "brew", "latest")
            .unwrap_err();
        assert!(matches!(err, OllamaError::Unreachable { .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://127.0.0.1:11434/", DEFAULT_MODEL);
        assert_eq!(client.base_url(), "http://127.0.0.1:11434");
    }
}
