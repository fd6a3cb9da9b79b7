use std::io::{BufRead, Write};

use goenv_backend::{GoenvError, VersionInstaller};
use log::warn;

use super::Context;
use crate::cli::UninstallArgs;
use crate::error::CliError;

pub async fn run(
    ctx: &Context,
    args: UninstallArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let version = args.version;

    if !ctx.resolver.is_version_installed(&version) {
        return Err(GoenvError::VersionNotInstalled { version }.into());
    }

    if !args.force && !confirm(&format!("Uninstall Go {version}?"), input, out)? {
        writeln!(out, "Uninstall cancelled")?;
        return Ok(());
    }

    if let Ok(active) = ctx.resolver.active_version()
        && active.version == version
    {
        warn!("Go {version} is the active version ({:?})", active.origin);
    }

    ctx.installer.uninstall(&version).await?;
    writeln!(out, "Successfully uninstalled Go {version}")?;
    Ok(())
}

fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<bool> {
    write!(out, "{question} (y/n): ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
