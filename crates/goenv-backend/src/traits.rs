use async_trait::async_trait;

use crate::error::GoenvError;

/// Outcome of making sure a version exists on disk before pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provision {
    AlreadyInstalled,
    Installed,
}

/// Materializes Go versions under the versions directory.
#[async_trait]
pub trait VersionInstaller: Send + Sync {
    /// Download and unpack `version` into its version directory.
    async fn install(&self, version: &str) -> Result<(), GoenvError>;

    /// Remove the version directory. Removing an absent version succeeds.
    async fn uninstall(&self, version: &str) -> Result<(), GoenvError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct RecordingInstaller {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VersionInstaller for RecordingInstaller {
        async fn install(&self, version: &str) -> Result<(), GoenvError> {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("install {version}"));
            Ok(())
        }

        async fn uninstall(&self, version: &str) -> Result<(), GoenvError> {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("uninstall {version}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn boxed_installer_dispatches_through_trait_object() {
        let installer = RecordingInstaller::default();
        {
            let boxed: &dyn VersionInstaller = &installer;
            boxed.install("1.21.0").await.expect("install succeeds");
            boxed.uninstall("1.20.5").await.expect("uninstall succeeds");
        }

        let calls = installer.calls.lock().expect("lock").clone();
        assert_eq!(calls, ["install 1.21.0", "uninstall 1.20.5"]);
    }
}
