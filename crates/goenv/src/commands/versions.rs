use std::io::Write;

use goenv_backend::SYSTEM_VERSION;

use super::Context;
use crate::cli::VersionsArgs;
use crate::error::CliError;

pub fn run(ctx: &Context, args: &VersionsArgs, out: &mut impl Write) -> Result<(), CliError> {
    let installed = ctx.resolver.list_versions()?;

    if args.bare {
        for version in &installed {
            writeln!(out, "{version}")?;
        }
        return Ok(());
    }

    let active = ctx.resolver.active_version()?;
    let system_go = which::which("go").is_ok();
    render(out, &installed, &active.version, system_go)?;
    Ok(())
}

fn render(
    out: &mut impl Write,
    installed: &[String],
    active: &str,
    system_go: bool,
) -> std::io::Result<()> {
    let marker = |version: &str| if version == active { "* " } else { "  " };

    if system_go {
        writeln!(out, "{}{SYSTEM_VERSION}", marker(SYSTEM_VERSION))?;
    }
    for version in installed {
        writeln!(out, "{}{version}", marker(version))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use goenv_backend::GoenvError;

    use super::{render, run};
    use crate::cli::VersionsArgs;
    use crate::commands::test_support::{TestContext, output};
    use crate::error::CliError;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn render_marks_active_version() {
        let mut out = Vec::new();

        render(&mut out, &names(&["1.20.5", "1.21.0"]), "1.21.0", false).expect("render");

        assert_eq!(output(out), "  1.20.5\n* 1.21.0\n");
    }

    #[test]
    fn render_lists_system_first_when_available() {
        let mut out = Vec::new();

        render(&mut out, &names(&["1.21.0"]), "system", true).expect("render");

        assert_eq!(output(out), "* system\n  1.21.0\n");
    }

    #[test]
    fn bare_prints_names_only() {
        let test = TestContext::new();
        test.fake_install("1.21.0");
        let mut out = Vec::new();

        run(&test.ctx, &VersionsArgs { bare: true }, &mut out).expect("versions");

        assert_eq!(output(out), "1.21.0\n");
    }

    #[test]
    fn local_pointer_marks_version() {
        let test = TestContext::new();
        test.fake_install("1.21.0");
        test.ctx.resolver.point_local("1.21.0").expect("local pointer");
        let mut out = Vec::new();

        run(&test.ctx, &VersionsArgs { bare: false }, &mut out).expect("versions");

        assert!(output(out).lines().any(|line| line == "* 1.21.0"));
    }

    #[test]
    fn missing_versions_dir_is_an_error() {
        let test = TestContext::new();
        std::fs::remove_dir(test.paths().versions_dir()).expect("remove versions dir");

        let result = run(&test.ctx, &VersionsArgs { bare: true }, &mut Vec::new());

        assert!(matches!(
            result,
            Err(CliError::Goenv(GoenvError::NoVersionsDirectory { .. }))
        ));
    }
}
