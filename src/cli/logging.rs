//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
///
/// `default_filter` applies when RUST_LOG is not set.
pub fn init_logging(debug: bool, default_filter: &str) -> Option<PathBuf> {
    if !debug {
        // No logging by default so stdout only carries the breakdown
        return None;
    }

    // Named temp file that outlives this function
    let temp_file = tempfile::Builder::new()
        .prefix("deploy-breakdown-")
        .suffix(".log")
        .tempfile()
        .map(|f| {
            let path = f.path().to_path_buf();
            // Keep the file on disk; the OS cleans the temp dir
            std::mem::forget(f);
            path
        })
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("deploy-breakdown-{}.log", std::process::id()))
        });

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&temp_file)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", temp_file.display(), e);
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(temp_file)
}
