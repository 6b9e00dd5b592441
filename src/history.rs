//! Host name history
//!
//! The history is a plain text file with one host name per line, most
//! recently used first. The dialog only reads it; the caller records a host
//! after a TCP/IP connection has been accepted.

use crate::error::{DialogError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Opaque handle to a history list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySource {
    path: Option<PathBuf>,
}

impl HistorySource {
    /// No history
    pub fn none() -> Self {
        Self { path: None }
    }

    /// History stored in a file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Source of previously used host names
pub trait HostHistory {
    /// Load host names, most recent first
    fn load(&self, source: &HistorySource) -> Vec<String>;
}

/// File-backed history
#[derive(Debug, Clone)]
pub struct FileHistory {
    max_entries: usize,
}

impl FileHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
        }
    }

    /// Move `host` to the front of the history and rewrite the file
    pub fn record(&self, source: &HistorySource, host: &str) -> Result<()> {
        let host = host.trim();
        let Some(path) = source.path() else {
            return Ok(());
        };
        if host.is_empty() {
            return Ok(());
        }

        let mut hosts = self.load(source);
        hosts.retain(|h| h != host);
        hosts.insert(0, host.to_string());
        hosts.truncate(self.max_entries);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| DialogError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut content = hosts.join("\n");
        content.push('\n');
        fs::write(path, content).map_err(|e| DialogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Recorded {} in history ({} entries)", host, hosts.len());
        Ok(())
    }

    fn parse(&self, content: &str) -> Vec<String> {
        let mut hosts: Vec<String> = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if hosts.len() >= self.max_entries {
                break;
            }
            if !hosts.iter().any(|h| h == line) {
                hosts.push(line.to_string());
            }
        }
        hosts
    }
}

impl HostHistory for FileHistory {
    fn load(&self, source: &HistorySource) -> Vec<String> {
        let Some(path) = source.path() else {
            return Vec::new();
        };

        match fs::read_to_string(path) {
            Ok(content) => self.parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file at {:?}", path);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read history {:?}: {}", path, e);
                Vec::new()
            }
        }
    }
}
