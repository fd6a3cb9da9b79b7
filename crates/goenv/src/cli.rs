use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "goenv",
    version,
    about = "Go version manager",
    long_about = "Install multiple Go toolchains side by side and choose which one is active, \
                  globally or per directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// goenv root directory [default: ~/.goenv]
    #[arg(long, global = true, env = "GOENV_ROOT", value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set or show the global Go version
    Global(GlobalArgs),
    /// Set, show or remove the local Go version of the current directory
    Local(LocalArgs),
    /// Install a specific version of Go
    Install(InstallArgs),
    /// Uninstall a specific version of Go
    Uninstall(UninstallArgs),
    /// List installed Go versions
    Versions(VersionsArgs),
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Version to make global, or `system` to use the Go found on PATH
    pub version: Option<String>,
}

#[derive(Args, Debug)]
pub struct LocalArgs {
    /// Version to pin in ./.go-version
    #[arg(conflicts_with = "unset")]
    pub version: Option<String>,

    /// Remove ./.go-version
    #[arg(long)]
    pub unset: bool,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Version to install, e.g. 1.21.0
    #[arg(required_unless_present = "list")]
    pub version: Option<String>,

    /// Remove and reinstall the version if it is already installed
    #[arg(short, long)]
    pub force: bool,

    /// List all versions available for download
    #[arg(short, long)]
    pub list: bool,

    /// Exit quietly if the version is already installed
    ///
    /// An installed version is left untouched and the command succeeds
    /// without output. Use --force to reinstall instead.
    #[arg(short, long, conflicts_with = "force")]
    pub skip_existing: bool,

    /// Check the download against the published SHA-256
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Version to remove
    pub version: String,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Print version names only
    #[arg(long)]
    pub bare: bool,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_flag_reports_package_version() {
        let version = Cli::command().render_version();

        assert_eq!(version.trim(), format!("goenv {}", env!("CARGO_PKG_VERSION")));
        assert!(version.contains("0.1."));
    }

    #[test]
    fn skip_existing_long_help_points_to_force_for_reinstall() {
        let mut command = Cli::command();
        let install = command
            .find_subcommand_mut("install")
            .expect("install subcommand");
        let help = install.render_long_help().to_string();

        assert!(help.contains("left untouched"));
        assert!(help.contains("Use --force to reinstall instead"));
    }

    #[test]
    fn install_requires_version_unless_listing() {
        assert!(Cli::try_parse_from(["goenv", "install"]).is_err());

        let cli = Cli::try_parse_from(["goenv", "install", "--list"]).expect("list parses");
        assert!(matches!(cli.command, Command::Install(ref args) if args.list && args.version.is_none()));
    }

    #[test]
    fn install_flags_parse() {
        let cli = Cli::try_parse_from(["goenv", "install", "1.21.0", "-f", "--verify"])
            .expect("install parses");

        let Command::Install(args) = cli.command else {
            panic!("expected install command");
        };
        assert_eq!(args.version.as_deref(), Some("1.21.0"));
        assert!(args.force);
        assert!(args.verify);
        assert!(!args.skip_existing);
    }

    #[test]
    fn force_and_skip_existing_conflict() {
        assert!(Cli::try_parse_from(["goenv", "install", "1.21.0", "--force", "--skip-existing"]).is_err());
    }

    #[test]
    fn local_unset_conflicts_with_version() {
        assert!(Cli::try_parse_from(["goenv", "local", "1.21.0", "--unset"]).is_err());

        let cli = Cli::try_parse_from(["goenv", "local", "--unset"]).expect("unset parses");
        assert!(matches!(cli.command, Command::Local(ref args) if args.unset));
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["goenv", "versions", "--root", "/tmp/goenv", "-v"])
            .expect("global flags parse");

        assert!(cli.verbose);
        assert_eq!(cli.root.as_deref(), Some(std::path::Path::new("/tmp/goenv")));
    }

    #[test]
    fn uninstall_requires_version() {
        assert!(Cli::try_parse_from(["goenv", "uninstall"]).is_err());
    }
}
