//! Logging setup
//!
//! Two sinks: the run log file (plain text, info and above, appended across
//! runs) and stderr (filtered by `RUST_LOG`, warnings by default).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// When `log_file` cannot be opened the run continues with stderr logging
/// only; the returned error says why so the caller can warn about it.
pub fn init(log_file: Option<&Path>, verbose: bool) -> io::Result<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let (file_layer, file_error) = match log_file.map(open_log_file).transpose() {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };
    let file_layer = file_layer.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .with_filter(LevelFilter::INFO)
    });

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Open the log file for appending and write the start banner.
fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file)?;
    writeln!(file, "Logging to {}", path.display())?;
    writeln!(file, "{}", start_banner(chrono::Local::now()))?;
    Ok(file)
}

fn start_banner(now: chrono::DateTime<chrono::Local>) -> String {
    format!("{} - sgpt setup started", now.format("%Y-%m-%d %H:%M:%S"))
}
