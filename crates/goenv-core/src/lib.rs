//! Core logic for goenv.
//!
//! This crate provides everything below the command line:
//! - Downloading and unpacking Go distributions into the versions directory.
//! - Reading the go.dev release catalog.
//! - Resolving and writing the global and local version pointer files.

mod archive;
mod catalog;
mod installer;
mod resolver;

/// tar.gz extraction with the distribution's leading `go/` stripped.
pub use archive::{ExtractStats, extract_go_archive};
/// Default catalog location and JSON parsing helper.
pub use catalog::{DEFAULT_CATALOG_URL, parse_catalog};
/// Network-backed installer and its configuration.
pub use installer::{DEFAULT_DOWNLOAD_BASE_URL, DistInstaller, InstallOptions, InstallerConfig};
/// Pointer file resolution and the two-phase install-then-point flow.
pub use resolver::{ActiveVersion, GlobalUpdate, PointerOrigin, VersionResolver};
