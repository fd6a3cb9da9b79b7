use std::io::Write;

use goenv_backend::SYSTEM_VERSION;
use goenv_core::GlobalUpdate;

use super::Context;
use crate::cli::GlobalArgs;
use crate::error::CliError;

pub async fn run(ctx: &Context, args: GlobalArgs, out: &mut impl Write) -> Result<(), CliError> {
    let Some(version) = args.version else {
        writeln!(out, "{}", ctx.resolver.get_global_version()?)?;
        return Ok(());
    };

    if version != SYSTEM_VERSION && !ctx.resolver.is_version_installed(&version) {
        writeln!(out, "Go {version} is not installed, installing...")?;
        out.flush()?;
    }

    match ctx.resolver.set_global_version(&version).await? {
        GlobalUpdate::ResetToSystem {
            previous: Some(previous),
        } => writeln!(out, "Global version reset to system (was {previous})")?,
        GlobalUpdate::ResetToSystem { previous: None } | GlobalUpdate::Pinned { .. } => {
            writeln!(out, "Global version set to {version}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use goenv_backend::GoenvError;

    use super::run;
    use crate::cli::GlobalArgs;
    use crate::commands::test_support::{TestContext, output};
    use crate::error::CliError;

    fn args(version: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            version: version.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn shows_system_without_pointer() {
        let test = TestContext::new();
        let mut out = Vec::new();

        run(&test.ctx, args(None), &mut out).await.expect("show global");

        assert_eq!(output(out), "system\n");
    }

    #[tokio::test]
    async fn sets_installed_version_without_download() {
        let test = TestContext::new();
        test.fake_install("1.21.0");
        let mut out = Vec::new();

        run(&test.ctx, args(Some("1.21.0")), &mut out)
            .await
            .expect("set global");

        assert_eq!(output(out), "Global version set to 1.21.0\n");
        assert_eq!(
            std::fs::read_to_string(test.paths().global_version_file()).expect("pointer"),
            "1.21.0"
        );
    }

    #[tokio::test]
    async fn reset_to_system_reports_previous_version() {
        let test = TestContext::new();
        std::fs::write(test.paths().global_version_file(), "1.20.0\n").expect("pointer");
        let mut out = Vec::new();

        run(&test.ctx, args(Some("system")), &mut out)
            .await
            .expect("reset global");

        assert_eq!(output(out), "Global version reset to system (was 1.20.0)\n");
        assert!(!test.paths().global_version_file().exists());
    }

    #[tokio::test]
    async fn failed_install_is_reported_and_pointer_kept() {
        let test = TestContext::new();
        let mut out = Vec::new();

        let result = run(&test.ctx, args(Some("1.21.0")), &mut out).await;

        assert!(matches!(
            result,
            Err(CliError::Goenv(GoenvError::DownloadFailed { .. }))
        ));
        assert!(!test.paths().global_version_file().exists());
        assert!(output(out).contains("installing"));
    }
}
