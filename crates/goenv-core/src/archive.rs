use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use goenv_backend::GoenvError;
use log::{debug, warn};
use tar::{Archive, EntryType};

/// Top-level directory every official Go archive is wrapped in.
const DIST_PREFIX: &str = "go";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub files: usize,
    pub dirs: usize,
    pub symlinks: usize,
    pub skipped: usize,
}

fn io_failure(context: &str, path: &Path, error: &io::Error) -> GoenvError {
    GoenvError::extraction_failed(format!("{context} {}: {error}", path.display()))
}

/// Extract a Go distribution tarball into `target_dir`.
///
/// The leading `go/` component is stripped from every entry and the bare `go`
/// directory entry is skipped, so `target_dir` mirrors the distribution's
/// internal layout. Regular files keep their archive mode, directories are
/// created recursively and symlinks keep their recorded target. Hard links,
/// devices and other entry kinds are skipped. Nothing is rolled back on
/// failure.
///
/// # Errors
/// Returns [`GoenvError::ExtractionFailed`] on any archive read or filesystem
/// write error.
pub fn extract_go_archive(archive_path: &Path, target_dir: &Path) -> Result<ExtractStats, GoenvError> {
    let file = File::open(archive_path)
        .map_err(|error| io_failure("failed to open archive", archive_path, &error))?;
    extract_from_reader(GzDecoder::new(file), target_dir)
}

pub(crate) fn extract_from_reader<R: Read>(
    reader: R,
    target_dir: &Path,
) -> Result<ExtractStats, GoenvError> {
    std::fs::create_dir_all(target_dir)
        .map_err(|error| io_failure("failed to create target directory", target_dir, &error))?;

    let mut archive = Archive::new(reader);
    let mut stats = ExtractStats::default();

    let entries = archive
        .entries()
        .map_err(|error| GoenvError::extraction_failed(format!("failed to read archive: {error}")))?;

    for entry in entries {
        let mut entry = entry.map_err(|error| {
            GoenvError::extraction_failed(format!("failed to read tar header: {error}"))
        })?;

        let raw_path = entry
            .path()
            .map_err(|error| {
                GoenvError::extraction_failed(format!("invalid entry path: {error}"))
            })?
            .into_owned();

        let Some(relative) = strip_dist_prefix(&raw_path) else {
            warn!("Skipping archive entry with unsafe path: {}", raw_path.display());
            stats.skipped += 1;
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = target_dir.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                std::fs::create_dir_all(&target)
                    .map_err(|error| io_failure("failed to create directory", &target, &error))?;
                stats.dirs += 1;
            }
            EntryType::Regular | EntryType::Continuous => {
                let mode = entry.header().mode().ok();
                write_regular_file(&mut entry, &target, mode)?;
                stats.files += 1;
            }
            EntryType::Symlink => {
                let link_target = entry
                    .link_name()
                    .map_err(|error| {
                        GoenvError::extraction_failed(format!(
                            "invalid symlink target for {}: {error}",
                            raw_path.display()
                        ))
                    })?
                    .map(std::borrow::Cow::into_owned);
                let Some(link_target) = link_target else {
                    warn!("Skipping symlink without target: {}", raw_path.display());
                    stats.skipped += 1;
                    continue;
                };
                create_symlink(&link_target, &target)?;
                stats.symlinks += 1;
            }
            other => {
                debug!("Skipping {other:?} entry {}", raw_path.display());
                stats.skipped += 1;
            }
        }
    }

    debug!(
        "Extracted {} files, {} directories, {} symlinks into {} ({} skipped)",
        stats.files,
        stats.dirs,
        stats.symlinks,
        target_dir.display(),
        stats.skipped
    );
    Ok(stats)
}

/// Strip a leading `go` component. Returns `None` for paths that would escape
/// the target directory.
fn strip_dist_prefix(path: &Path) -> Option<PathBuf> {
    let stripped = path.strip_prefix(DIST_PREFIX).unwrap_or(path);

    let mut relative = PathBuf::new();
    for component in stripped.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

fn ensure_parent(target: &Path) -> Result<(), GoenvError> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|error| io_failure("failed to create parent directory for", target, &error))?;
    }
    Ok(())
}

fn write_regular_file<R: Read>(
    reader: &mut R,
    target: &Path,
    mode: Option<u32>,
) -> Result<(), GoenvError> {
    ensure_parent(target)?;

    let mut file = File::create(target)
        .map_err(|error| io_failure("failed to create file", target, &error))?;
    io::copy(reader, &mut file)
        .map_err(|error| io_failure("failed to write file", target, &error))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = mode {
            std::fs::set_permissions(target, std::fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|error| io_failure("failed to set permissions on", target, &error))?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

#[cfg(unix)]
fn create_symlink(link_target: &Path, target: &Path) -> Result<(), GoenvError> {
    ensure_parent(target)?;
    std::os::unix::fs::symlink(link_target, target).map_err(|error| {
        GoenvError::extraction_failed(format!(
            "failed to create symlink {} -> {}: {error}",
            target.display(),
            link_target.display()
        ))
    })
}

#[cfg(not(unix))]
fn create_symlink(link_target: &Path, target: &Path) -> Result<(), GoenvError> {
    warn!(
        "Skipping symlink {} -> {}: not supported on this platform",
        target.display(),
        link_target.display()
    );
    Ok(())
}
