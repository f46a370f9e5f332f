use habitat_core::error::HabitatError;
use habitat_core::platform::HostOs;
use habitat_core::resolver::CommandGenerator;
use ollama_client::{OllamaClient, OllamaError};

use crate::config::CliConfig;

/// Adapts the Ollama client to the resolver's generator seam, translating
/// client errors into the core taxonomy.
pub struct OllamaGenerator {
    client: OllamaClient,
}

impl OllamaGenerator {
    pub fn new(client: OllamaClient) -> OllamaGenerator {
        OllamaGenerator { client }
    }
}

impl CommandGenerator for OllamaGenerator {
    fn generate_install_commands(
        &self,
        host: HostOs,
        library: &str,
        package_manager: &str,
        version: &str,
    ) -> habitat_core::Result<Vec<String>> {
        self.client
            .generate_install_commands(host.as_str(), library, package_manager, version)
            .map_err(|e| to_core_error(e, library))
    }
}

/// An answered-but-useless reply and an unreachable backend are distinct
/// outcomes upstream; the mapping keeps that split across the boundary.
fn to_core_error(e: OllamaError, library: &str) -> HabitatError {
    if e.is_empty_generation() {
        HabitatError::EmptyGeneration(library.to_string())
    } else {
        HabitatError::BackendUnavailable(e.to_string())
    }
}

/// Backs `--offline`: every entry that would need regeneration is skipped
/// instead of reaching for the network.
pub struct OfflineGenerator;

impl CommandGenerator for OfflineGenerator {
    fn generate_install_commands(
        &self,
        _host: HostOs,
        library: &str,
        _package_manager: &str,
        _version: &str,
    ) -> habitat_core::Result<Vec<String>> {
        Err(HabitatError::BackendUnavailable(format!(
            "offline mode: cannot generate a command for {library}"
        )))
    }
}

pub fn generator(config: &CliConfig, offline: bool) -> Box<dyn CommandGenerator> {
    if offline {
        Box::new(OfflineGenerator)
    } else {
        Box::new(OllamaGenerator::new(config.backend_client()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_generator_refuses_with_backend_unavailable() {
        let err = OfflineGenerator
            .generate_install_commands(HostOs::Darwin, "git", "brew", "latest")
            .unwrap_err();
        assert!(matches!(err, HabitatError::BackendUnavailable(_)));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn empty_generation_keeps_its_identity_across_the_boundary() {
        let err = to_core_error(
            OllamaError::NoCommands {
                library: "git".into(),
            },
            "git",
        );
        assert!(matches!(err, HabitatError::EmptyGeneration(_)));
    }

    #[test]
    fn blank_reply_counts_as_empty_generation_not_an_outage() {
        let err = to_core_error(
            OllamaError::EmptyReply {
                model: "deepseek-coder:6.7b".into(),
            },
            "git",
        );
        assert!(matches!(err, HabitatError::EmptyGeneration(_)));
    }

    #[test]
    fn transport_failures_become_backend_unavailable() {
        let err = to_core_error(
            OllamaError::Api {
                status: 500,
                body: "model not loaded".into(),
            },
            "git",
        );
        match err {
            HabitatError::BackendUnavailable(message) => {
                assert!(message.contains("500"));
            }
            other => panic!("expected BackendUnavailable, got {other:?}"),
        }
    }
}
