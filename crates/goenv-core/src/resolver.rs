use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use goenv_backend::{GoenvError, Provision, SYSTEM_VERSION, VersionInstaller, validate_version};
use goenv_platform::GoenvPaths;
use log::{debug, info};

/// Where the active version was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOrigin {
    Local(PathBuf),
    Global(PathBuf),
    /// No pointer file exists; the system toolchain applies.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVersion {
    pub version: String,
    pub origin: PointerOrigin,
}

/// Result of [`VersionResolver::set_global_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalUpdate {
    /// The preferred global pointer was removed. `previous` is the version it
    /// named, if there was one.
    ResetToSystem { previous: Option<String> },
    Pinned { provision: Provision },
}

/// Reads and writes version pointer files, installing versions on demand
/// before pointing at them.
pub struct VersionResolver {
    paths: GoenvPaths,
    working_dir: PathBuf,
    installer: Box<dyn VersionInstaller>,
}

impl VersionResolver {
    #[must_use]
    pub fn new(
        paths: GoenvPaths,
        working_dir: impl Into<PathBuf>,
        installer: Box<dyn VersionInstaller>,
    ) -> Self {
        Self {
            paths,
            working_dir: working_dir.into(),
            installer,
        }
    }

    #[must_use]
    pub fn paths(&self) -> &GoenvPaths {
        &self.paths
    }

    #[must_use]
    pub fn local_version_file(&self) -> PathBuf {
        self.paths.local_version_file(&self.working_dir)
    }

    /// Trimmed content of `<working dir>/.go-version`.
    ///
    /// # Errors
    /// Returns [`GoenvError::NoLocalVersion`] when the file is absent.
    pub fn get_local_version(&self) -> Result<String, GoenvError> {
        let path = self.local_version_file();
        if !path.is_file() {
            return Err(GoenvError::NoLocalVersion {
                dir: self.working_dir.clone(),
            });
        }
        read_pointer(&path)
    }

    /// Install `version` if needed, then write it to the local pointer.
    ///
    /// # Errors
    /// Returns installation errors or [`GoenvError::PointerWriteFailed`].
    pub async fn set_local_version(&self, version: &str) -> Result<Provision, GoenvError> {
        let provision = self.ensure_installed(version).await?;
        self.point_local(version)?;
        Ok(provision)
    }

    /// Write `version` verbatim to the local pointer, without checking that
    /// it is installed.
    ///
    /// # Errors
    /// Returns [`GoenvError::PointerWriteFailed`] on IO failure.
    pub fn point_local(&self, version: &str) -> Result<(), GoenvError> {
        write_pointer(&self.local_version_file(), version)
    }

    /// Remove the local pointer.
    ///
    /// # Errors
    /// Returns [`GoenvError::NoLocalVersion`] if there is no local pointer.
    pub fn unset_local_version(&self) -> Result<(), GoenvError> {
        let path = self.local_version_file();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed local version file {}", path.display());
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Err(GoenvError::NoLocalVersion {
                dir: self.working_dir.clone(),
            }),
            Err(error) => Err(GoenvError::pointer_remove(&path, &error)),
        }
    }

    /// First existing global pointer, trimmed, or `system` when none exist.
    ///
    /// # Errors
    /// Returns [`GoenvError::PointerReadFailed`] if a pointer exists but
    /// cannot be read.
    pub fn get_global_version(&self) -> Result<String, GoenvError> {
        Ok(self.resolve_global()?.0)
    }

    fn resolve_global(&self) -> Result<(String, PointerOrigin), GoenvError> {
        for candidate in self.paths.global_version_candidates() {
            if candidate.is_file() {
                debug!("Global version read from {}", candidate.display());
                let version = read_pointer(&candidate)?;
                return Ok((version, PointerOrigin::Global(candidate)));
            }
        }
        Ok((SYSTEM_VERSION.to_string(), PointerOrigin::Default))
    }

    /// Point the global version at `version`.
    ///
    /// `system` removes the preferred global pointer instead. Legacy pointer
    /// files are never written.
    ///
    /// # Errors
    /// Returns installation errors or pointer IO errors.
    pub async fn set_global_version(&self, version: &str) -> Result<GlobalUpdate, GoenvError> {
        if version == SYSTEM_VERSION {
            let previous = self.clear_global_pointer()?;
            return Ok(GlobalUpdate::ResetToSystem { previous });
        }

        let provision = self.ensure_installed(version).await?;
        self.point_global(version)?;
        Ok(GlobalUpdate::Pinned { provision })
    }

    /// Write `version` verbatim to the preferred global pointer, without
    /// checking that it is installed.
    ///
    /// # Errors
    /// Returns [`GoenvError::PointerWriteFailed`] on IO failure.
    pub fn point_global(&self, version: &str) -> Result<(), GoenvError> {
        write_pointer(&self.paths.global_version_file(), version)
    }

    fn clear_global_pointer(&self) -> Result<Option<String>, GoenvError> {
        let path = self.paths.global_version_file();
        let previous = if path.is_file() {
            Some(read_pointer(&path)?)
        } else {
            None
        };

        match std::fs::remove_file(&path) {
            Ok(()) => info!("Removed global version file {}", path.display()),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => return Err(GoenvError::pointer_remove(&path, &error)),
        }
        Ok(previous)
    }

    /// Install `version` unless its directory already exists. `system` is
    /// always considered present.
    ///
    /// # Errors
    /// Returns [`GoenvError::InvalidVersion`] or the installer's error.
    pub async fn ensure_installed(&self, version: &str) -> Result<Provision, GoenvError> {
        validate_version(version)?;
        if version == SYSTEM_VERSION || self.is_version_installed(version) {
            debug!("Go {version} already installed");
            return Ok(Provision::AlreadyInstalled);
        }

        self.installer.install(version).await?;
        Ok(Provision::Installed)
    }

    /// Names of the directories under `versions/`, in directory-listing
    /// order.
    ///
    /// # Errors
    /// Returns [`GoenvError::NoVersionsDirectory`] when `versions/` is absent.
    pub fn list_versions(&self) -> Result<Vec<String>, GoenvError> {
        let versions_dir = self.paths.versions_dir();
        let entries = match std::fs::read_dir(&versions_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(GoenvError::NoVersionsDirectory { path: versions_dir });
            }
            Err(error) => return Err(GoenvError::io_at(&versions_dir, &error)),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| GoenvError::io_at(&versions_dir, &error))?;
            let is_dir = entry
                .file_type()
                .map_err(|error| GoenvError::io_at(&entry.path(), &error))?
                .is_dir();
            if is_dir {
                versions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(versions)
    }

    /// Whether anything exists at `versions/<version>`.
    #[must_use]
    pub fn is_version_installed(&self, version: &str) -> bool {
        if validate_version(version).is_err() {
            return false;
        }
        match std::fs::metadata(self.paths.version_dir(version)) {
            Ok(_) => true,
            Err(error) => error.kind() != ErrorKind::NotFound,
        }
    }

    /// The version in effect for the working directory: the local pointer if
    /// present, otherwise the global resolution.
    ///
    /// # Errors
    /// Returns pointer read errors.
    pub fn active_version(&self) -> Result<ActiveVersion, GoenvError> {
        match self.get_local_version() {
            Ok(version) => {
                return Ok(ActiveVersion {
                    version,
                    origin: PointerOrigin::Local(self.local_version_file()),
                });
            }
            Err(GoenvError::NoLocalVersion { .. }) => {}
            Err(error) => return Err(error),
        }

        let (version, origin) = self.resolve_global()?;
        Ok(ActiveVersion { version, origin })
    }
}

fn read_pointer(path: &Path) -> Result<String, GoenvError> {
    let content =
        std::fs::read_to_string(path).map_err(|error| GoenvError::pointer_read(path, &error))?;
    Ok(content.trim().to_string())
}

fn write_pointer(path: &Path, version: &str) -> Result<(), GoenvError> {
    std::fs::write(path, version).map_err(|error| GoenvError::pointer_write(path, &error))?;
    debug!("Wrote {version} to {}", path.display());
    Ok(())
}
