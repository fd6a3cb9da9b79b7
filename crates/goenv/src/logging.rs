use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Drop the oldest lines of an oversized log so that at most half of
/// `max_size` bytes remain. A missing log is not an error.
fn trim_log(path: &Path, max_size: u64) -> io::Result<()> {
    let size = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(error),
    };
    if size <= max_size {
        return Ok(());
    }

    let contents = std::fs::read(path)?;
    let budget = usize::try_from(max_size / 2).unwrap_or(usize::MAX);
    let mut kept = 0;
    for line in contents.split_inclusive(|&byte| byte == b'\n').rev() {
        if kept + line.len() > budget {
            break;
        }
        kept += line.len();
    }

    std::fs::write(path, &contents[contents.len() - kept..])
}

/// Install the global logger: a file logger at `log_path`, plus a stderr
/// logger when `verbose` is set.
///
/// Failing to trim or open the log file never stops the command; the
/// problem is reported through whatever logger could be installed.
pub fn init_logging(log_path: &Path, verbose: bool, debug_enabled: bool, max_log_size: u64) {
    let trim_result = trim_log(log_path, max_log_size);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("goenv")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    let open_result = open_log_file(log_path)
        .map(|file| loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)));

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }

    set_debug_enabled(verbose || debug_enabled);

    if let Err(error) = trim_result {
        log::warn!("Could not trim {}: {error}", log_path.display());
    }
    if let Err(error) = open_result {
        log::warn!("Could not open {}: {error}", log_path.display());
    }
    if debug_enabled {
        log::info!("Debug logging enabled, log file: {}", log_path.display());
    }
}

pub fn set_debug_enabled(enabled: bool) {
    if enabled {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Warn);
    }
}
