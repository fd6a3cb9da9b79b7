use std::path::{Path, PathBuf};

use thiserror::Error;

pub const ROOT_DIR_NAME: &str = ".goenv";
pub const VERSIONS_DIR: &str = "versions";
pub const GLOBAL_VERSION_FILE: &str = "version";
/// Older global pointer names, read in this order after [`GLOBAL_VERSION_FILE`].
pub const LEGACY_GLOBAL_VERSION_FILES: [&str; 2] = ["default", "global"];
pub const LOCAL_VERSION_FILE: &str = ".go-version";

const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "debug.log";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoenvPathsError {
    #[error("Could not determine home directory")]
    HomeDirectoryUnavailable,
    #[error("Failed to create directory {}: {message}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl GoenvPathsError {
    fn creation_failed(path: &Path, error: &std::io::Error) -> Self {
        Self::DirectoryCreationFailed {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Resolve the default goenv root, `$HOME/.goenv`.
///
/// # Errors
/// Returns [`GoenvPathsError::HomeDirectoryUnavailable`] when the environment
/// does not provide a home directory.
pub fn root_directory() -> Result<PathBuf, GoenvPathsError> {
    let home = dirs::home_dir().ok_or(GoenvPathsError::HomeDirectoryUnavailable)?;
    Ok(home.join(ROOT_DIR_NAME))
}

/// Well-known locations below a goenv root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoenvPaths {
    root: PathBuf,
}

impl GoenvPaths {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths rooted at [`root_directory`].
    ///
    /// # Errors
    /// Returns an error when the home directory cannot be determined.
    pub fn from_home() -> Result<Self, GoenvPathsError> {
        root_directory().map(Self::new)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    #[must_use]
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(version)
    }

    #[must_use]
    pub fn global_version_file(&self) -> PathBuf {
        self.root.join(GLOBAL_VERSION_FILE)
    }

    #[must_use]
    pub fn legacy_global_version_files(&self) -> Vec<PathBuf> {
        LEGACY_GLOBAL_VERSION_FILES
            .iter()
            .map(|name| self.root.join(name))
            .collect()
    }

    /// Global pointer files in lookup order: the preferred file first, then
    /// the legacy names. The first one that exists wins.
    #[must_use]
    pub fn global_version_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.global_version_file()];
        candidates.extend(self.legacy_global_version_files());
        candidates
    }

    #[must_use]
    pub fn local_version_file(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(LOCAL_VERSION_FILE)
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Ensure the root and versions directories exist.
    ///
    /// Pointer files are never created here. An empty directory squatting on
    /// a pointer file path is removed so later pointer writes can succeed; a
    /// non-empty one is left alone. Both cases are returned in the report for
    /// the caller to log.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    pub fn initialize_layout(&self) -> Result<LayoutReport, GoenvPathsError> {
        for dir in [self.root.clone(), self.versions_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|error| GoenvPathsError::creation_failed(&dir, &error))?;
        }

        let mut report = LayoutReport::default();
        for pointer in [
            self.global_version_file(),
            self.root.join(LOCAL_VERSION_FILE),
        ] {
            if !pointer.is_dir() {
                continue;
            }
            match std::fs::remove_dir(&pointer) {
                Ok(()) => report.cleared.push(pointer),
                Err(error) => report.blocked.push((pointer, error.to_string())),
            }
        }

        Ok(report)
    }
}

/// Pointer paths [`GoenvPaths::initialize_layout`] found occupied by
/// directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Empty directories that were removed.
    pub cleared: Vec<PathBuf>,
    /// Directories that could not be removed, with the reason.
    pub blocked: Vec<(PathBuf, String)>,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{GoenvPaths, GoenvPathsError, LayoutReport};

    #[test]
    fn file_paths_use_expected_names() {
        let paths = GoenvPaths::new("/home/gopher/.goenv");

        assert_eq!(
            paths.versions_dir(),
            Path::new("/home/gopher/.goenv/versions")
        );
        assert_eq!(
            paths.version_dir("1.21.0"),
            Path::new("/home/gopher/.goenv/versions/1.21.0")
        );
        assert_eq!(
            paths.global_version_file(),
            Path::new("/home/gopher/.goenv/version")
        );
        assert_eq!(
            paths.local_version_file(Path::new("/work/project")),
            Path::new("/work/project/.go-version")
        );
        assert!(paths.settings_file().ends_with("settings.json"));
        assert!(paths.log_file().ends_with("debug.log"));
    }

    #[test]
    fn global_candidates_put_preferred_file_before_legacy_names() {
        let paths = GoenvPaths::new("/r");

        let names: Vec<String> = paths
            .global_version_candidates()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["version", "default", "global"]);
    }

    #[test]
    fn initialize_layout_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let paths = GoenvPaths::new(temp.path().join("goenv-test"));

        paths.initialize_layout().expect("first init should succeed");
        let report = paths
            .initialize_layout()
            .expect("second init should succeed");

        assert_eq!(report, LayoutReport::default());

        assert!(paths.root().is_dir());
        assert!(paths.versions_dir().is_dir());
        assert!(!paths.global_version_file().exists());
        assert!(!paths.root().join(".go-version").exists());
    }

    #[test]
    fn initialize_layout_clears_empty_directory_at_pointer_path() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let paths = GoenvPaths::new(temp.path());
        std::fs::create_dir_all(paths.global_version_file()).expect("stale dir");

        let report = paths.initialize_layout().expect("init should succeed");

        assert!(!paths.global_version_file().exists());
        assert_eq!(report.cleared, [paths.global_version_file()]);
        assert!(report.blocked.is_empty());
    }

    #[test]
    fn initialize_layout_reports_non_empty_directory_at_pointer_path() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let paths = GoenvPaths::new(temp.path());
        let squatter = paths.root().join(".go-version");
        std::fs::create_dir_all(squatter.join("keep")).expect("non-empty dir");

        let report = paths.initialize_layout().expect("init should succeed");

        assert!(report.cleared.is_empty());
        assert_eq!(report.blocked.len(), 1);
        assert_eq!(report.blocked[0].0, squatter);
        assert!(squatter.join("keep").is_dir());
    }

    #[test]
    fn initialize_layout_reports_creation_failure() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").expect("blocker file");
        let paths = GoenvPaths::new(blocker.join("root"));

        let result = paths.initialize_layout();

        assert!(matches!(
            result,
            Err(GoenvPathsError::DirectoryCreationFailed { ref path, .. }) if path == &blocker.join("root")
        ));
    }
}
