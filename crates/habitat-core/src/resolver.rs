use crate::error::Result;
use crate::manifest::{normalize_command, Manifest, ManifestItem, COMMAND_JOINER};
use crate::platform::{HostOs, PlatformContext};
use crate::selection::{effective_version, SelectionEntry};

// ---------------------------------------------------------------------------
// CommandGenerator
// ---------------------------------------------------------------------------

/// Source of synthesized install commands. The CLI backs this with the
/// generative backend; tests use stubs. Core logic never sees a transport.
pub trait CommandGenerator {
    /// Produce the shell commands that install `library` at `version` on
    /// `host` through `package_manager`, one command per element, in
    /// execution order.
    fn generate_install_commands(
        &self,
        host: HostOs,
        library: &str,
        package_manager: &str,
        version: &str,
    ) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Turn one manifest item into a staged install action.
///
/// Manifests are assumed to be authored for a non-darwin platform. On a
/// darwin host the authored command is discarded and regenerated through
/// `generator`; on every other host the normalized command is used as-is.
/// The generator is never consulted when the authored command is usable.
pub fn resolve(
    item: &ManifestItem,
    ctx: &PlatformContext,
    generator: &dyn CommandGenerator,
) -> Result<SelectionEntry> {
    let version = effective_version(item.entry.version.as_deref());
    let command = if ctx.host == HostOs::Darwin {
        let commands = generator.generate_install_commands(
            ctx.host,
            &item.name,
            &ctx.package_manager,
            &version,
        )?;
        commands.join(COMMAND_JOINER)
    } else {
        normalize_command(item.entry.install_command.as_ref())
    };
    Ok(SelectionEntry {
        name: item.name.clone(),
        version,
        command,
    })
}

/// A manifest entry that could not be resolved, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: String,
}

/// Resolve every manifest item in order. An item whose resolution fails is
/// collected as a skip; one bad entry never aborts the pass.
pub fn resolve_manifest(
    manifest: &Manifest,
    ctx: &PlatformContext,
    generator: &dyn CommandGenerator,
) -> (Vec<SelectionEntry>, Vec<SkippedEntry>) {
    let mut resolved = Vec::new();
    let mut skipped = Vec::new();
    for item in &manifest.items {
        match resolve(item, ctx, generator) {
            Ok(entry) => resolved.push(entry),
            Err(e) => skipped.push(SkippedEntry {
                name: item.name.clone(),
                reason: e.to_string(),
            }),
        }
    }
    (resolved, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HabitatError;
    use crate::manifest::{to_yaml, ManifestEntry, RawCommand, Section};

    struct StubGenerator {
        commands: Vec<String>,
    }

    impl CommandGenerator for StubGenerator {
        fn generate_install_commands(
            &self,
            _host: HostOs,
            _library: &str,
            _package_manager: &str,
            _version: &str,
        ) -> Result<Vec<String>> {
            Ok(self.commands.clone())
        }
    }

    struct FailingGenerator;

    impl CommandGenerator for FailingGenerator {
        fn generate_install_commands(
            &self,
            _host: HostOs,
            library: &str,
            _package_manager: &str,
            _version: &str,
        ) -> Result<Vec<String>> {
            Err(HabitatError::BackendUnavailable(format!(
                "no backend for {library}"
            )))
        }
    }

    fn item(name: &str, version: Option<&str>, command: Option<RawCommand>) -> ManifestItem {
        ManifestItem {
            section: Section::Environment,
            name: name.to_string(),
            entry: ManifestEntry {
                name: None,
                version: version.map(str::to_string),
                install_command: command,
            },
        }
    }

    fn linux_ctx() -> PlatformContext {
        PlatformContext::new(HostOs::Linux, "apt")
    }

    fn darwin_ctx() -> PlatformContext {
        PlatformContext::new(HostOs::Darwin, "brew")
    }

    #[test]
    fn matching_host_uses_the_authored_command() {
        let item = item(
            "git",
            Some("2.40"),
            Some(RawCommand::Scalar("apt install git".into())),
        );
        // a failing generator proves the backend is never consulted
        let entry = resolve(&item, &linux_ctx(), &FailingGenerator).unwrap();
        assert_eq!(entry.command, "apt install git");
        assert_eq!(entry.version, "2.40");
    }

    #[test]
    fn darwin_host_discards_authored_command_and_regenerates() {
        let item = item(
            "git",
            None,
            Some(RawCommand::Scalar("winget install git".into())),
        );
        let generator = StubGenerator {
            commands: vec!["brew install git".into(), "brew link git".into()],
        };
        let entry = resolve(&item, &darwin_ctx(), &generator).unwrap();
        assert_eq!(entry.command, "brew install git && brew link git");
    }

    #[test]
    fn version_defaults_to_latest() {
        let absent = item("git", None, None);
        let blank = item("git", Some("   "), None);
        assert_eq!(resolve(&absent, &linux_ctx(), &FailingGenerator).unwrap().version, "latest");
        assert_eq!(resolve(&blank, &linux_ctx(), &FailingGenerator).unwrap().version, "latest");
    }

    #[test]
    fn backend_failure_surfaces_when_regeneration_is_needed() {
        let item = item("git", None, Some(RawCommand::Scalar("x".into())));
        let err = resolve(&item, &darwin_ctx(), &FailingGenerator).unwrap_err();
        assert!(matches!(err, HabitatError::BackendUnavailable(_)));
    }

    #[test]
    fn resolve_manifest_skips_failures_and_continues() {
        let manifest = Manifest {
            items: vec![
                item("git", None, Some(RawCommand::Scalar("a".into()))),
                item("curl", None, Some(RawCommand::Scalar("b".into()))),
            ],
        };
        // every entry needs the backend on darwin and the backend is down
        let (resolved, skipped) = resolve_manifest(&manifest, &darwin_ctx(), &FailingGenerator);
        assert!(resolved.is_empty());
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].name, "git");
        assert!(skipped[0].reason.contains("backend"));
    }

    #[test]
    fn resolve_manifest_keeps_manifest_order() {
        let manifest = Manifest {
            items: vec![
                item("zsh", None, Some(RawCommand::Scalar("install zsh".into()))),
                item("git", None, Some(RawCommand::Scalar("install git".into()))),
            ],
        };
        let (resolved, skipped) = resolve_manifest(&manifest, &linux_ctx(), &FailingGenerator);
        assert!(skipped.is_empty());
        let names: Vec<&str> = resolved.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zsh", "git"]);
    }

    #[test]
    fn serialize_parse_resolve_round_trip() {
        let staged = vec![SelectionEntry::new("Git", "2.40", "apt install git")];
        let text = to_yaml(&staged).unwrap();
        let manifest = Manifest::parse(&text).unwrap();
        let (resolved, skipped) = resolve_manifest(&manifest, &linux_ctx(), &FailingGenerator);
        assert!(skipped.is_empty());
        assert_eq!(resolved, staged);
    }
}
