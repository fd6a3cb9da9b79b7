use serde::{Deserialize, Serialize};

use crate::error::GoenvError;

/// Pointer value meaning "use whatever `go` is on `PATH`".
pub const SYSTEM_VERSION: &str = "system";

/// Reject version names that would not map to a single directory below
/// `versions/`.
///
/// # Errors
/// Returns [`GoenvError::InvalidVersion`] for empty names, `.`/`..`, or names
/// containing a path separator.
pub fn validate_version(version: &str) -> Result<(), GoenvError> {
    let invalid = version.trim().is_empty()
        || version == "."
        || version == ".."
        || version.contains(['/', '\\']);
    if invalid {
        return Err(GoenvError::InvalidVersion {
            version: version.to_string(),
        });
    }
    Ok(())
}

/// One release as published in the go.dev download catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoRelease {
    pub version: String,
    #[serde(default)]
    pub stable: bool,
    #[serde(default)]
    pub files: Vec<DistFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistFile {
    pub filename: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub size: u64,
    pub kind: FileKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Source,
    Archive,
    Installer,
    #[serde(untagged)]
    Other(String),
}

impl GoRelease {
    /// Find the distribution file with the given name, e.g.
    /// `go1.21.0.linux-amd64.tar.gz`.
    #[must_use]
    pub fn file_named(&self, filename: &str) -> Option<&DistFile> {
        self.files.iter().find(|file| file.filename == filename)
    }
}
