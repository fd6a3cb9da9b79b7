use std::io::Write;

use goenv_backend::SYSTEM_VERSION;

use super::Context;
use crate::cli::LocalArgs;
use crate::error::CliError;

pub async fn run(ctx: &Context, args: LocalArgs, out: &mut impl Write) -> Result<(), CliError> {
    if args.unset {
        ctx.resolver.unset_local_version()?;
        writeln!(
            out,
            "Removed {}",
            ctx.resolver.local_version_file().display()
        )?;
        return Ok(());
    }

    let Some(version) = args.version else {
        writeln!(out, "{}", ctx.resolver.get_local_version()?)?;
        return Ok(());
    };

    if version != SYSTEM_VERSION && !ctx.resolver.is_version_installed(&version) {
        writeln!(out, "Go {version} is not installed, installing...")?;
        out.flush()?;
    }

    ctx.resolver.set_local_version(&version).await?;
    writeln!(out, "Local version set to {version}")?;
    Ok(())
}
