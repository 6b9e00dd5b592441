//! Tracing setup
//!
//! The dialog owns the terminal while it runs, so log output goes to a file
//! when one is configured.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for the configured level
pub fn filter_directive(level: &str, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    match level.trim().to_ascii_lowercase().as_str() {
        l @ ("error" | "warn" | "info" | "debug" | "trace" | "off") => l.to_string(),
        _ => "warn".to_string(),
    }
}

/// Initialize tracing
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(level: &str, verbose: bool, file: Option<&Path>) {
    let filter = EnvFilter::new(filter_directive(level, verbose));

    let log_file = file.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    let _ = match log_file {
        Some(log_file) => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file))
                    .compact(),
            )
            .with(filter)
            .try_init(),
        None => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .with(filter)
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("info", false), "info");
        assert_eq!(filter_directive(" WARN ", false), "warn");
        assert_eq!(filter_directive("nonsense", false), "warn");
        assert_eq!(filter_directive("error", true), "debug");
    }
}
