use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{HabitatError, Result};
use crate::selection::SelectionEntry;

/// Joins the steps of a multi-step install command into one shell line.
/// Later steps only run when the earlier ones succeed.
pub const COMMAND_JOINER: &str = " && ";

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PackageManagers,
    Environment,
    DeveloperTools,
}

impl Section {
    /// Reading order. Sections are visited in this order no matter how the
    /// document lays them out; entries keep their in-section order.
    pub fn all() -> &'static [Section] {
        &[
            Section::PackageManagers,
            Section::Environment,
            Section::DeveloperTools,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::PackageManagers => "package_managers",
            Section::Environment => "environment",
            Section::DeveloperTools => "developer_tools",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Manifest entries
// ---------------------------------------------------------------------------

/// An install command as a manifest may spell it: one string (possibly
/// multi-line) or a list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCommand {
    Scalar(String),
    Sequence(Vec<String>),
}

/// One item as read from a manifest. Immutable once parsed. Identity comes
/// from the entry's key; the inner `name` field is accepted but never wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_command: Option<RawCommand>,
}

/// A manifest entry together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestItem {
    pub section: Section,
    pub name: String,
    pub entry: ManifestEntry,
}

/// A parsed manifest: every entry in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub items: Vec<ManifestItem>,
}

impl Manifest {
    /// Parse a manifest document.
    ///
    /// Unknown top-level sections are ignored; a document missing all three
    /// known sections parses to an empty manifest. Anything that is not a
    /// mapping where a mapping is required is `MalformedManifest`.
    pub fn parse(text: &str) -> Result<Manifest> {
        if text.trim().is_empty() {
            return Ok(Manifest::default());
        }
        let doc: Value = serde_yaml::from_str(text)
            .map_err(|e| HabitatError::MalformedManifest(e.to_string()))?;
        if matches!(doc, Value::Null) {
            return Ok(Manifest::default());
        }
        let Value::Mapping(doc) = doc else {
            return Err(HabitatError::MalformedManifest(
                "top level must be a mapping of sections".into(),
            ));
        };

        let mut items = Vec::new();
        for &section in Section::all() {
            let Some(value) = mapping_get(&doc, section.as_str()) else {
                continue;
            };
            let Value::Mapping(section_items) = value else {
                return Err(HabitatError::MalformedManifest(format!(
                    "section '{section}' must be a mapping of entries"
                )));
            };
            for (key, item) in section_items {
                let Some(name) = key.as_str() else {
                    return Err(HabitatError::MalformedManifest(format!(
                        "entry names in '{section}' must be strings"
                    )));
                };
                if !item.is_mapping() {
                    return Err(HabitatError::MalformedManifest(format!(
                        "entry '{name}' must be a mapping"
                    )));
                }
                let entry: ManifestEntry = serde_yaml::from_value(item.clone())
                    .map_err(|e| HabitatError::MalformedManifest(format!("entry '{name}': {e}")))?;
                items.push(ManifestItem {
                    section,
                    name: name.to_string(),
                    entry,
                });
            }
        }
        Ok(Manifest { items })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Manifest> {
        let text = std::fs::read_to_string(path)?;
        Manifest::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// serde_yaml mappings keep document order; this lookup does not disturb it.
fn mapping_get<'a>(doc: &'a Mapping, key: &str) -> Option<&'a Value> {
    doc.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

// ---------------------------------------------------------------------------
// Command normalization
// ---------------------------------------------------------------------------

/// Collapse any accepted command shape into a single executable string.
///
/// Strings are split on line breaks, each line trimmed, blank lines
/// dropped, and the steps joined with [`COMMAND_JOINER`]. Lists are joined
/// as-is, without per-step trimming. A missing command becomes the empty
/// string. Idempotent: joined output normalizes to itself.
pub fn normalize_command(raw: Option<&RawCommand>) -> String {
    match raw {
        None => String::new(),
        Some(RawCommand::Scalar(s)) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(COMMAND_JOINER),
        Some(RawCommand::Sequence(steps)) => steps.join(COMMAND_JOINER),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Serialize selection entries back to manifest form.
///
/// Entries land under a single `environment` section; section membership
/// carries no meaning elsewhere, so the export flattens it. Multi-step
/// commands are split back into lists on [`COMMAND_JOINER`]; single steps
/// stay scalar. Same-name entries collapse to the last one, a constraint
/// of the mapping-keyed document format.
pub fn to_yaml(entries: &[SelectionEntry]) -> Result<String> {
    let mut items = Mapping::new();
    for entry in entries {
        let command = if entry.command.contains(COMMAND_JOINER) {
            Value::Sequence(
                entry
                    .command
                    .split(COMMAND_JOINER)
                    .map(|step| Value::String(step.to_string()))
                    .collect(),
            )
        } else {
            Value::String(entry.command.clone())
        };
        let mut fields = Mapping::new();
        fields.insert(
            Value::String("version".into()),
            Value::String(entry.version.clone()),
        );
        fields.insert(Value::String("install_command".into()), command);
        items.insert(Value::String(entry.name.clone()), Value::Mapping(fields));
    }

    let mut doc = Mapping::new();
    doc.insert(
        Value::String(Section::Environment.as_str().into()),
        Value::Mapping(items),
    );
    Ok(serde_yaml::to_string(&Value::Mapping(doc))?)
}

/// Serialize entries and write them atomically to `path`.
pub fn save(entries: &[SelectionEntry], path: &Path) -> Result<()> {
    let text = to_yaml(entries)?;
    crate::io::atomic_write(path, text.as_bytes())
}
