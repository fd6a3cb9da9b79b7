use std::io::Write;

use goenv_core::InstallOptions;
use log::info;

use super::Context;
use crate::cli::InstallArgs;
use crate::error::CliError;

pub async fn run(ctx: &Context, args: InstallArgs, out: &mut impl Write) -> Result<(), CliError> {
    if args.list {
        let versions = ctx.installer.list_available_versions().await?;
        writeln!(out, "Available versions:")?;
        for version in versions {
            writeln!(out, "{version}")?;
        }
        return Ok(());
    }

    let Some(version) = args.version else {
        return Ok(());
    };

    if ctx.resolver.is_version_installed(&version) {
        if args.skip_existing {
            info!("Go {version} already installed, skipping");
            return Ok(());
        }
        if !args.force {
            writeln!(out, "Go {version} is already installed")?;
            return Ok(());
        }
        info!("Removing Go {version} before reinstalling");
        ctx.installer.remove_version_dir(&version)?;
    }

    writeln!(out, "Installing Go {version}...")?;
    out.flush()?;

    ctx.installer
        .install_with(
            &version,
            InstallOptions {
                verify_checksum: args.verify,
            },
        )
        .await?;

    writeln!(out, "Successfully installed Go {version}")?;
    Ok(())
}
