use thiserror::Error;

#[derive(Debug, Error)]
pub enum HabitatError {
    #[error("malformed manifest: {0}")]
    MalformedManifest(String),

    #[error("duplicate entry: {name} {version}")]
    DuplicateEntry { name: String, version: String },

    #[error("entry not found: {name} {version}")]
    NotFound { name: String, version: String },

    #[error("install backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("backend returned no commands for {0}")]
    EmptyGeneration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization failure on the export path. Manifest text that cannot
    /// be parsed is reported as `MalformedManifest`, not this.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl HabitatError {
    /// Advisory errors leave state untouched and are reported as warnings;
    /// everything else aborts the operation that raised it.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            HabitatError::DuplicateEntry { .. } | HabitatError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HabitatError>;
