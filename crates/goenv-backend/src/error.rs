use std::path::{Path, PathBuf};

use goenv_platform::{GoenvPathsError, UnsupportedHost};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoenvError {
    #[error("Could not determine home directory")]
    HomeDirectoryUnavailable,

    #[error("Failed to create directory {}: {details}", path.display())]
    DirectoryCreationFailed { path: PathBuf, details: String },

    #[error("Failed to download {url}: {details}")]
    DownloadFailed { url: String, details: String },

    #[error("Failed to extract archive: {details}")]
    ExtractionFailed { details: String },

    #[error("Failed to remove {}: {details}", path.display())]
    RemovalFailed { path: PathBuf, details: String },

    #[error("Failed to fetch version catalog ({stage}): {details}")]
    CatalogFetchFailed { stage: NetworkStage, details: String },

    #[error("Failed to parse version catalog: {details}")]
    CatalogParseFailed { details: String },

    #[error("No local version found in {}", dir.display())]
    NoLocalVersion { dir: PathBuf },

    #[error("No versions found in {}", path.display())]
    NoVersionsDirectory { path: PathBuf },

    #[error("Failed to write version file {}: {details}", path.display())]
    PointerWriteFailed { path: PathBuf, details: String },

    #[error("Failed to read version file {}: {details}", path.display())]
    PointerReadFailed { path: PathBuf, details: String },

    #[error("Failed to remove version file {}: {details}", path.display())]
    PointerRemoveFailed { path: PathBuf, details: String },

    #[error("Go does not publish binaries for {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Checksum mismatch for {filename}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    #[error("No checksum published for {filename}")]
    ChecksumUnavailable { filename: String },

    #[error("Go {version} is not installed")]
    VersionNotInstalled { version: String },

    #[error("Invalid version name: {version:?}")]
    InvalidVersion { version: String },

    #[error("Failed to build HTTP client: {details}")]
    HttpClient { details: String },

    #[error("IO error at {}: {details}", path.display())]
    IoError { path: PathBuf, details: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStage {
    #[error("request")]
    Request,
    #[error("status")]
    Status,
    #[error("body")]
    Body,
}

impl GoenvError {
    pub fn download_failed(url: &str, details: impl std::fmt::Display) -> Self {
        Self::DownloadFailed {
            url: url.to_string(),
            details: details.to_string(),
        }
    }

    pub fn extraction_failed(details: impl std::fmt::Display) -> Self {
        Self::ExtractionFailed {
            details: details.to_string(),
        }
    }

    pub fn catalog_fetch(stage: NetworkStage, details: impl std::fmt::Display) -> Self {
        Self::CatalogFetchFailed {
            stage,
            details: details.to_string(),
        }
    }

    pub fn catalog_parse(details: impl std::fmt::Display) -> Self {
        Self::CatalogParseFailed {
            details: details.to_string(),
        }
    }

    pub fn removal_failed(path: &Path, error: &std::io::Error) -> Self {
        Self::RemovalFailed {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    pub fn pointer_write(path: &Path, error: &std::io::Error) -> Self {
        Self::PointerWriteFailed {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    pub fn pointer_read(path: &Path, error: &std::io::Error) -> Self {
        Self::PointerReadFailed {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    pub fn io_at(path: &Path, error: &std::io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    pub fn pointer_remove(path: &Path, error: &std::io::Error) -> Self {
        Self::PointerRemoveFailed {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}

impl From<GoenvPathsError> for GoenvError {
    fn from(err: GoenvPathsError) -> Self {
        match err {
            GoenvPathsError::HomeDirectoryUnavailable => GoenvError::HomeDirectoryUnavailable,
            GoenvPathsError::DirectoryCreationFailed { path, message, .. } => {
                GoenvError::DirectoryCreationFailed {
                    path,
                    details: message,
                }
            }
        }
    }
}

impl From<UnsupportedHost> for GoenvError {
    fn from(err: UnsupportedHost) -> Self {
        GoenvError::UnsupportedPlatform {
            os: err.os,
            arch: err.arch,
        }
    }
}
