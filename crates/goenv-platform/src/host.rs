use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported host platform: {os}/{arch}")]
pub struct UnsupportedHost {
    pub os: String,
    pub arch: String,
}

/// Operating system and architecture spelled the way Go distributions name
/// them, e.g. `darwin` / `arm64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostPlatform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl HostPlatform {
    /// Detect the platform this binary was built for.
    ///
    /// # Errors
    /// Returns an error when Go does not publish binaries for this host.
    pub fn current() -> Result<Self, UnsupportedHost> {
        Self::from_rust(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map Rust target names (`std::env::consts`) onto Go's naming.
    ///
    /// # Errors
    /// Returns an error for an OS or architecture without a Go mapping.
    pub fn from_rust(os: &str, arch: &str) -> Result<Self, UnsupportedHost> {
        let unsupported = || UnsupportedHost {
            os: os.to_string(),
            arch: arch.to_string(),
        };

        let go_os = match os {
            "linux" => "linux",
            "macos" => "darwin",
            "windows" => "windows",
            "freebsd" => "freebsd",
            _ => return Err(unsupported()),
        };

        let go_arch = match arch {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            "arm" => "armv6l",
            "powerpc64" => "ppc64le",
            "s390x" => "s390x",
            "riscv64" => "riscv64",
            "loongarch64" => "loong64",
            _ => return Err(unsupported()),
        };

        Ok(Self {
            os: go_os,
            arch: go_arch,
        })
    }

    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        format!("go{version}.{}-{}.tar.gz", self.os, self.arch)
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
