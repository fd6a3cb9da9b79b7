use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use goenv_backend::{GoRelease, GoenvError, VersionInstaller, validate_version};
use goenv_platform::{GoenvPaths, HostPlatform};
use log::{debug, info};
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::archive::extract_go_archive;
use crate::catalog::{DEFAULT_CATALOG_URL, fetch_catalog};

pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://golang.org/dl";

/// Network settings for [`DistInstaller`].
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    pub download_base_url: String,
    pub catalog_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    /// Parent of the per-install staging directory. `None` uses the system
    /// temporary directory.
    pub staging_dir: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: format!("goenv/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            staging_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Compare the download against the SHA-256 published in the catalog.
    pub verify_checksum: bool,
}

/// Installs official Go binary distributions into the versions directory.
#[derive(Debug, Clone)]
pub struct DistInstaller {
    paths: GoenvPaths,
    client: reqwest::Client,
    config: InstallerConfig,
    host: Option<HostPlatform>,
}

impl DistInstaller {
    /// Build an installer bound to `paths`.
    ///
    /// # Errors
    /// Returns [`GoenvError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(paths: GoenvPaths, config: InstallerConfig) -> Result<Self, GoenvError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|error| GoenvError::HttpClient {
            details: error.to_string(),
        })?;

        Ok(Self {
            paths,
            client,
            config,
            host: None,
        })
    }

    /// Download archives for `host` instead of the platform goenv runs on.
    #[must_use]
    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = Some(host);
        self
    }

    #[must_use]
    pub fn paths(&self) -> &GoenvPaths {
        &self.paths
    }

    fn host(&self) -> Result<HostPlatform, GoenvError> {
        match self.host {
            Some(host) => Ok(host),
            None => Ok(HostPlatform::current()?),
        }
    }

    #[must_use]
    pub fn download_url(&self, archive_name: &str) -> String {
        format!(
            "{}/{archive_name}",
            self.config.download_base_url.trim_end_matches('/')
        )
    }

    /// Download `version` and unpack it into `versions/<version>`.
    ///
    /// The archive is staged in a temporary directory that is removed on
    /// every exit path. A failed extraction leaves whatever was already
    /// written in the version directory.
    ///
    /// # Errors
    /// Returns [`GoenvError::DownloadFailed`] for transport errors and
    /// non-success responses, [`GoenvError::ExtractionFailed`] for archive or
    /// filesystem errors, and checksum errors when verification is requested.
    pub async fn install_with(
        &self,
        version: &str,
        options: InstallOptions,
    ) -> Result<(), GoenvError> {
        validate_version(version)?;
        let host = self.host()?;
        let archive_name = host.archive_name(version);
        let url = self.download_url(&archive_name);
        let version_dir = self.paths.version_dir(version);

        info!("Installing Go {version} for {host}");

        let mut builder = tempfile::Builder::new();
        builder.prefix("goenv-");
        let staging = match &self.config.staging_dir {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|error| {
                GoenvError::download_failed(
                    &url,
                    format!("failed to create temporary directory: {error}"),
                )
            })?;
        let download_path = staging.path().join(&archive_name);

        self.download_file(&url, &download_path).await?;

        if options.verify_checksum {
            let releases = self.fetch_catalog().await?;
            verify_download(&releases, &archive_name, &download_path)?;
        }

        extract_go_archive(&download_path, &version_dir)?;

        info!("Installed Go {version} to {}", version_dir.display());
        Ok(())
    }

    async fn download_file(&self, url: &str, dest: &Path) -> Result<(), GoenvError> {
        use futures_util::StreamExt;

        debug!("Downloading {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| GoenvError::download_failed(url, error))?;

        if !response.status().is_success() {
            return Err(GoenvError::download_failed(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let total = response.content_length().unwrap_or(0);
        let mut downloaded: u64 = 0;

        let mut file = tokio::fs::File::create(dest).await.map_err(|error| {
            GoenvError::download_failed(url, format!("{}: {error}", dest.display()))
        })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|error| GoenvError::download_failed(url, error))?;
            file.write_all(&chunk).await.map_err(|error| {
                GoenvError::download_failed(url, format!("{}: {error}", dest.display()))
            })?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await.map_err(|error| {
            GoenvError::download_failed(url, format!("{}: {error}", dest.display()))
        })?;

        debug!("Download complete: {downloaded} of {total} bytes");
        Ok(())
    }

    /// Recursively remove `versions/<version>`. An absent directory is not an
    /// error.
    ///
    /// # Errors
    /// Returns [`GoenvError::RemovalFailed`] if the directory exists but
    /// cannot be removed.
    pub fn remove_version_dir(&self, version: &str) -> Result<(), GoenvError> {
        validate_version(version)?;
        let version_dir = self.paths.version_dir(version);

        match std::fs::remove_dir_all(&version_dir) {
            Ok(()) => {
                info!("Removed {}", version_dir.display());
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} already absent", version_dir.display());
                Ok(())
            }
            Err(error) => Err(GoenvError::removal_failed(&version_dir, &error)),
        }
    }

    /// Fetch the full release catalog.
    ///
    /// # Errors
    /// Returns catalog fetch or parse errors.
    pub async fn fetch_catalog(&self) -> Result<Vec<GoRelease>, GoenvError> {
        fetch_catalog(&self.client, &self.config.catalog_url).await
    }

    /// Version strings of every published release, in catalog order.
    ///
    /// # Errors
    /// Returns catalog fetch or parse errors.
    pub async fn list_available_versions(&self) -> Result<Vec<String>, GoenvError> {
        let releases = self.fetch_catalog().await?;
        Ok(releases.into_iter().map(|release| release.version).collect())
    }
}

#[async_trait]
impl VersionInstaller for DistInstaller {
    async fn install(&self, version: &str) -> Result<(), GoenvError> {
        self.install_with(version, InstallOptions::default()).await
    }

    async fn uninstall(&self, version: &str) -> Result<(), GoenvError> {
        self.remove_version_dir(version)
    }
}

fn verify_download(
    releases: &[GoRelease],
    archive_name: &str,
    downloaded_path: &Path,
) -> Result<(), GoenvError> {
    let expected = releases
        .iter()
        .find_map(|release| release.file_named(archive_name))
        .map(|file| file.sha256.as_str())
        .filter(|sha| !sha.is_empty())
        .ok_or_else(|| GoenvError::ChecksumUnavailable {
            filename: archive_name.to_string(),
        })?;

    let actual = sha256_file(downloaded_path)?;
    if actual.eq_ignore_ascii_case(expected) {
        info!("Checksum verified for {archive_name}");
        Ok(())
    } else {
        Err(GoenvError::ChecksumMismatch {
            filename: archive_name.to_string(),
            expected: expected.to_ascii_lowercase(),
            actual,
        })
    }
}

fn sha256_file(path: &Path) -> Result<String, GoenvError> {
    let mut file = std::fs::File::open(path).map_err(|error| GoenvError::io_at(path, &error))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|error| GoenvError::io_at(path, &error))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
