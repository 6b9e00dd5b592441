//! Per-port lock files
//!
//! An instance that opens a serial port holds an exclusive lock on
//! `com<N>.lock` for as long as the connection lives. Other instances see
//! the port as in use and leave it out of their dialog.

use super::PortUsage;
use crate::constants::LOCK_DIR_NAME;
use crate::error::{DialogError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Held port lock; released on drop
#[derive(Debug)]
pub struct PortLock {
    port: u32,
    _file: File,
}

impl PortLock {
    pub fn port(&self) -> u32 {
        self.port
    }
}

/// Lock files for serial ports
#[derive(Debug, Clone)]
pub struct PortLocks {
    dir: PathBuf,
}

impl PortLocks {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lock directory inside the config directory
    pub fn in_config_dir() -> Result<Self> {
        Ok(Self::new(crate::config::config_dir()?.join(LOCK_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock_path(&self, port: u32) -> PathBuf {
        self.dir.join(format!("com{}.lock", port))
    }

    fn is_contended_lock_error(e: &std::io::Error) -> bool {
        if e.kind() == std::io::ErrorKind::WouldBlock {
            return true;
        }

        // On Windows, file locking returns OS error codes rather than WouldBlock.
        #[cfg(windows)]
        {
            match e.raw_os_error() {
                // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
                Some(32) | Some(33) => return true,
                _ => {}
            }
        }

        false
    }

    /// Mark `port` as in use until the returned lock is dropped
    pub fn acquire(&self, port: u32) -> Result<PortLock> {
        fs::create_dir_all(&self.dir).map_err(|e| DialogError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.lock_path(port);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| DialogError::PortLock {
                path: path.clone(),
                source: e,
            })?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => {
                debug!("Locked COM{}", port);
                Ok(PortLock { port, _file: file })
            }
            Err(e) if Self::is_contended_lock_error(&e) => Err(DialogError::PortInUse { port }),
            Err(e) => Err(DialogError::PortLock { path, source: e }),
        }
    }
}

impl PortUsage for PortLocks {
    fn is_in_use(&self, port_number: u32) -> bool {
        let path = self.lock_path(port_number);
        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            // No lock file: nobody ever claimed the port
            Err(_) => return false,
        };

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => {
                let _ = FileExt::unlock(&file);
                false
            }
            Err(e) if Self::is_contended_lock_error(&e) => true,
            Err(e) => {
                warn!("Cannot probe lock {:?}: {}", path, e);
                false
            }
        }
    }
}
