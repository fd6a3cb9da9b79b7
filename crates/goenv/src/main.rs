mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod settings;

use clap::Parser;
use goenv_platform::LayoutReport;
use log::{debug, warn};

use crate::cli::Cli;
use crate::commands::Context;
use crate::config::Config;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        error.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.root, cli.verbose)?;
    let layout = config.paths.initialize_layout()?;

    logging::init_logging(
        &config.paths.log_file(),
        config.verbose,
        config.settings.debug_logging,
        config.settings.max_log_size_bytes,
    );
    for message in layout_warnings(&layout) {
        warn!("{message}");
    }
    if let Some(error) = &config.settings_error {
        warn!("{error}, using default settings");
    }
    debug!(
        "goenv {} root={} cwd={}",
        env!("CARGO_PKG_VERSION"),
        config.paths.root().display(),
        config.working_dir.display()
    );

    let ctx = Context::new(&config)?;
    commands::dispatch(&ctx, cli.command).await
}

fn layout_warnings(report: &LayoutReport) -> Vec<String> {
    let cleared = report
        .cleared
        .iter()
        .map(|path| format!("Removed stale directory at {}", path.display()));
    let blocked = report.blocked.iter().map(|(path, reason)| {
        format!(
            "{} is a directory and could not be removed ({reason}); pointer writes there will fail",
            path.display()
        )
    });
    cleared.chain(blocked).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use goenv_platform::LayoutReport;

    use super::layout_warnings;

    #[test]
    fn clean_layout_has_no_warnings() {
        assert!(layout_warnings(&LayoutReport::default()).is_empty());
    }

    #[test]
    fn layout_warnings_name_cleared_and_blocked_paths() {
        let report = LayoutReport {
            cleared: vec![PathBuf::from("/r/version")],
            blocked: vec![(
                PathBuf::from("/r/.go-version"),
                "Directory not empty".to_string(),
            )],
        };

        let warnings = layout_warnings(&report);

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0], "Removed stale directory at /r/version");
        assert!(warnings[1].starts_with("/r/.go-version is a directory"));
        assert!(warnings[1].contains("Directory not empty"));
    }
}
