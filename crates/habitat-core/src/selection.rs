use serde::{Deserialize, Serialize};

use crate::error::{HabitatError, Result};

/// Version used whenever a manifest or user leaves one unspecified.
pub const DEFAULT_VERSION: &str = "latest";

/// Apply the default to a missing or blank version.
pub fn effective_version(version: Option<&str>) -> String {
    match version {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => DEFAULT_VERSION.to_string(),
    }
}

// ---------------------------------------------------------------------------
// SelectionEntry
// ---------------------------------------------------------------------------

/// One staged install action. Identity is the whole tuple: two entries
/// sharing a name but differing in version or command are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub name: String,
    pub version: String,
    pub command: String,
}

impl SelectionEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        SelectionEntry {
            name: name.into(),
            version: version.into(),
            command: command.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The insertion-ordered working set of install actions (the cart).
///
/// Each distinct tuple occurs at most once. The selection itself is never
/// written to disk by this crate; persistence happens only through an
/// explicit manifest export or a caller-owned session file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Rebuild a selection from stored entries, dropping any duplicate
    /// tuples a hand-edited file may have introduced.
    pub fn from_entries(entries: Vec<SelectionEntry>) -> Selection {
        let mut selection = Selection::default();
        for entry in entries {
            let _ = selection.add(entry);
        }
        selection
    }

    /// Append an entry. Signals `DuplicateEntry` and leaves the selection
    /// unchanged when the identical tuple is already staged.
    pub fn add(&mut self, entry: SelectionEntry) -> Result<()> {
        if self.entries.contains(&entry) {
            return Err(HabitatError::DuplicateEntry {
                name: entry.name,
                version: entry.version,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the matching tuple. Signals `NotFound` when it is not staged.
    pub fn remove(&mut self, entry: &SelectionEntry) -> Result<()> {
        match self.entries.iter().position(|e| e == entry) {
            Some(index) => {
                self.entries.remove(index);
                Ok(())
            }
            None => Err(HabitatError::NotFound {
                name: entry.name.clone(),
                version: entry.version.clone(),
            }),
        }
    }

    /// Replace the entry's version in place, keeping its position. A blank
    /// version falls back to the default. Refuses the change when the new
    /// tuple would collide with a different staged entry.
    pub fn update_version(
        &mut self,
        entry: &SelectionEntry,
        new_version: &str,
    ) -> Result<SelectionEntry> {
        let index =
            self.entries
                .iter()
                .position(|e| e == entry)
                .ok_or_else(|| HabitatError::NotFound {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                })?;
        let updated = SelectionEntry {
            name: entry.name.clone(),
            version: effective_version(Some(new_version)),
            command: entry.command.clone(),
        };
        if updated != self.entries[index] && self.entries.contains(&updated) {
            return Err(HabitatError::DuplicateEntry {
                name: updated.name,
                version: updated.version,
            });
        }
        self.entries[index] = updated.clone();
        Ok(updated)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&SelectionEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
