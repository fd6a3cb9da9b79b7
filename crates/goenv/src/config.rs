use std::path::PathBuf;

use goenv_platform::GoenvPaths;

use crate::error::CliError;
use crate::settings::{Settings, SettingsError};

/// Everything a command needs to know about its environment, resolved once
/// at startup.
#[derive(Debug)]
pub struct Config {
    pub paths: GoenvPaths,
    pub working_dir: PathBuf,
    pub settings: Settings,
    pub verbose: bool,
    /// Set when `settings.json` existed but could not be used. The defaults
    /// are in effect.
    pub settings_error: Option<SettingsError>,
}

impl Config {
    /// Resolve the root (`root` override or `~/.goenv`), the current
    /// directory and the settings file.
    ///
    /// # Errors
    /// Returns an error when neither a root override nor a home directory is
    /// available, or the current directory cannot be read.
    pub fn load(root: Option<PathBuf>, verbose: bool) -> Result<Self, CliError> {
        let paths = match root {
            Some(root) => GoenvPaths::new(root),
            None => GoenvPaths::from_home()?,
        };
        let working_dir = std::env::current_dir().map_err(CliError::WorkingDirectory)?;
        Ok(Self::with_dirs(paths, working_dir, verbose))
    }

    #[must_use]
    pub fn with_dirs(paths: GoenvPaths, working_dir: PathBuf, verbose: bool) -> Self {
        let (settings, settings_error) = match Settings::load(&paths.settings_file()) {
            Ok(settings) => (settings, None),
            Err(error) => (Settings::default(), Some(error)),
        };

        Self {
            paths,
            working_dir,
            settings,
            verbose,
            settings_error,
        }
    }
}
