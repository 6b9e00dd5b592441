//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Connection defaults
// =============================================================================

/// Size of the host name buffer; the edit box holds one character less
pub const HOST_NAME_MAX_LENGTH: usize = 1024;

/// Maximum digits accepted by the TCP port edit box
pub const TCP_PORT_MAX_DIGITS: usize = 5;

/// Default TCP port for new connections
pub const DEFAULT_TCP_PORT: u16 = 23;

/// Port put into the TCP port box when Telnet gets checked
pub const DEFAULT_TELNET_PORT: u16 = 23;

/// Default serial port number
pub const DEFAULT_COM_PORT: u32 = 1;

/// Highest enumeration index offered in the serial list
pub const DEFAULT_MAX_COM_PORT: usize = 256;

// =============================================================================
// History
// =============================================================================

/// Maximum host names kept in the history file
pub const MAX_HOST_LIST: usize = 99;

// =============================================================================
// Files
// =============================================================================

/// Config file name (next to the executable)
pub const CONFIG_FILE_NAME: &str = "connect-dlg.toml";

/// Host history file name (in the config directory)
pub const HISTORY_FILE_NAME: &str = "hosts.txt";

/// Log file name (in the config directory)
pub const LOG_FILE_NAME: &str = "connect-dlg.log";

/// Directory holding per-port lock files
pub const LOCK_DIR_NAME: &str = "locks";

// =============================================================================
// UI
// =============================================================================

/// Input poll timeout for the TUI loop (milliseconds)
pub const FRAME_DURATION_MS: u64 = 50;

/// Preferred popup width
pub const DIALOG_WIDTH: u16 = 64;

/// Preferred popup height
pub const DIALOG_HEIGHT: u16 = 15;

/// Width of the visible part of an edit box
pub const EDIT_BOX_WIDTH: usize = 30;
