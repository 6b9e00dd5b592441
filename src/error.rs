//! Centralized error types for the dialog
//!
//! All errors are represented by the `DialogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, DialogError>`.
//!
//! The dialog controller itself never fails: these errors come from the
//! terminal host, configuration files and the collaborators around it.

use std::fmt;
use std::path::PathBuf;

/// All dialog errors
#[derive(Debug)]
pub enum DialogError {
    // === Terminal ===
    /// Terminal setup, drawing or input failed
    Terminal { source: std::io::Error },

    // === Serial ===
    /// Serial port enumeration failed
    PortEnumeration { source: serialport::Error },
    /// Failed to create or lock a port lock file
    PortLock {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Port is held by another instance
    PortInUse { port: u32 },

    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },
    /// Language file could not be parsed
    LanguageFile { path: PathBuf, reason: String },

    // === Output ===
    /// Accepted connection could not be serialized
    Output { source: serde_json::Error },
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal { source }
            | Self::PortLock { source, .. }
            | Self::Io { source, .. }
            | Self::ConfigRead { source, .. } => Some(source),
            Self::PortEnumeration { source } => Some(source),
            Self::Output { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for DialogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal { source } => write!(f, "Terminal error: {}", source),
            Self::PortEnumeration { source } => {
                write!(f, "Cannot enumerate serial ports: {}", source)
            }
            Self::PortLock { path, .. } => {
                write!(f, "Cannot lock port file: {}", path.display())
            }
            Self::PortInUse { port } => write!(f, "COM{} is already in use", port),
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::LanguageFile { path, reason } => {
                write!(f, "Invalid language file {}: {}", path.display(), reason)
            }
            Self::Output { source } => write!(f, "Cannot write connection: {}", source),
        }
    }
}

/// Alias for Result with DialogError
pub type Result<T> = std::result::Result<T, DialogError>;
