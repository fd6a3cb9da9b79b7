use std::process;

use goenv_backend::GoenvError;
use goenv_platform::GoenvPathsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Goenv(#[from] GoenvError),

    #[error("Could not determine the current directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<GoenvPathsError> for CliError {
    fn from(error: GoenvPathsError) -> Self {
        Self::Goenv(error.into())
    }
}

impl CliError {
    /// Print the error to stderr and exit with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("error: {self}");
        process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use goenv_backend::GoenvError;
    use goenv_platform::GoenvPathsError;

    use super::CliError;

    #[test]
    fn goenv_errors_display_unchanged() {
        let error = CliError::from(GoenvError::VersionNotInstalled {
            version: "1.21.0".to_string(),
        });

        assert_eq!(error.to_string(), "Go 1.21.0 is not installed");
    }

    #[test]
    fn layout_errors_convert_through_goenv_error() {
        let error = CliError::from(GoenvPathsError::DirectoryCreationFailed {
            path: PathBuf::from("/ro/.goenv"),
            kind: std::io::ErrorKind::PermissionDenied,
            message: "permission denied".to_string(),
        });

        assert!(matches!(
            error,
            CliError::Goenv(GoenvError::DirectoryCreationFailed { .. })
        ));
        assert_eq!(
            error.to_string(),
            "Failed to create directory /ro/.goenv: permission denied"
        );
    }
}
