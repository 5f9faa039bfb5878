//! Input snapshot loading
//!
//! The polling client hands over plain JSON (or YAML, for hand-written
//! fixtures). Parsing is the only fallible step around the engine.

use std::io::Read;
use std::path::Path;

use crate::models::DeploymentStatusInput;

/// Snapshot loading errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Serialization format of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SnapshotFormat::Yaml
            }
            _ => SnapshotFormat::Json,
        }
    }
}

/// Parse a snapshot from a string
pub fn parse_snapshot(contents: &str, format: SnapshotFormat) -> SnapshotResult<DeploymentStatusInput> {
    let input = match format {
        SnapshotFormat::Json => serde_json::from_str(contents)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(input)
}

/// Read and parse a snapshot from any reader
pub fn read_snapshot_from<R: Read>(
    mut reader: R,
    format: SnapshotFormat,
) -> SnapshotResult<DeploymentStatusInput> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_snapshot(&contents, format)
}

/// Read and parse a snapshot file, picking the format from its extension
pub fn read_snapshot(path: &Path) -> SnapshotResult<DeploymentStatusInput> {
    let file = std::fs::File::open(path)?;
    tracing::debug!("Reading snapshot from {}", path.display());
    read_snapshot_from(file, SnapshotFormat::from_path(path))
}
