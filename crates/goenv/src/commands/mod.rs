mod global;
mod install;
mod local;
mod uninstall;
mod versions;

use std::io::{self, Write};

use goenv_core::{DistInstaller, VersionResolver};

use crate::cli::Command;
use crate::config::Config;
use crate::error::CliError;

/// Installer and resolver built from one [`Config`].
pub struct Context {
    pub installer: DistInstaller,
    pub resolver: VersionResolver,
}

impl Context {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, CliError> {
        let installer =
            DistInstaller::new(config.paths.clone(), config.settings.installer_config())?;
        let resolver = VersionResolver::new(
            config.paths.clone(),
            config.working_dir.clone(),
            Box::new(installer.clone()),
        );

        Ok(Self {
            installer,
            resolver,
        })
    }
}

pub async fn dispatch(ctx: &Context, command: Command) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Global(args) => global::run(ctx, args, &mut out).await,
        Command::Local(args) => local::run(ctx, args, &mut out).await,
        Command::Install(args) => install::run(ctx, args, &mut out).await,
        Command::Uninstall(args) => {
            let stdin = io::stdin();
            uninstall::run(ctx, args, &mut stdin.lock(), &mut out).await
        }
        Command::Versions(args) => versions::run(ctx, &args, &mut out),
    }?;

    out.flush()?;
    Ok(())
}
