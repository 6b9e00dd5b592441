//! Configuration management
//!
//! Config file is stored next to the executable as `connect-dlg.toml`.
//! It carries the defaults the dialog opens with and remembers the last
//! accepted connection.

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_COM_PORT, DEFAULT_MAX_COM_PORT, DEFAULT_TCP_PORT,
    DEFAULT_TELNET_PORT, HISTORY_FILE_NAME, LOG_FILE_NAME, MAX_HOST_LIST,
};
use crate::error::{DialogError, Result};
use crate::history::HistorySource;
use crate::request::{bounded_host_name, HostConnectionRequest, PortType, ProtocolFamily};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub history: HistoryConfig,
    pub ui: UiConfig,
    pub logs: LogsConfig,
}

/// Values the dialog opens with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Port type selected when the dialog opens
    pub port_type: PortType,
    /// Host name used when the history is empty
    pub host_name: String,
    pub tcp_port: u16,
    pub telnet: bool,
    /// Port filled in when Telnet gets checked
    pub telnet_port: u16,
    pub protocol_family: ProtocolFamily,
    pub com_port: u32,
    /// Highest enumeration index offered in the serial list
    pub max_com_port: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file (empty = `hosts.txt` in the config directory)
    pub file: Option<PathBuf>,
    /// Maximum host names kept
    pub max_entries: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Language file with localized dialog texts
    pub language_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Log file (empty = `connect-dlg.log` in the config directory)
    pub file: Option<PathBuf>,
    /// Filter directive: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port_type: PortType::TcpIp,
            host_name: String::new(),
            tcp_port: DEFAULT_TCP_PORT,
            telnet: true,
            telnet_port: DEFAULT_TELNET_PORT,
            protocol_family: ProtocolFamily::Auto,
            com_port: DEFAULT_COM_PORT,
            max_com_port: DEFAULT_MAX_COM_PORT,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            max_entries: MAX_HOST_LIST,
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Check values that serde cannot reject on its own
    pub fn validate(&self) -> Result<()> {
        let c = &self.connection;
        if c.tcp_port == 0 {
            return Err(DialogError::ConfigValidation {
                field: "connection.tcp_port",
                reason: "must be > 0".into(),
            });
        }
        if c.telnet_port == 0 {
            return Err(DialogError::ConfigValidation {
                field: "connection.telnet_port",
                reason: "must be > 0".into(),
            });
        }
        if c.com_port == 0 {
            return Err(DialogError::ConfigValidation {
                field: "connection.com_port",
                reason: "must be > 0".into(),
            });
        }
        if self.history.max_entries == 0 {
            return Err(DialogError::ConfigValidation {
                field: "history.max_entries",
                reason: "must be > 0".into(),
            });
        }
        Ok(())
    }

    /// History file, defaulting to the config directory
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history
            .file
            .clone()
            .or_else(|| config_dir().ok().map(|d| d.join(HISTORY_FILE_NAME)))
    }

    /// Log file, defaulting to the config directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logs
            .file
            .clone()
            .or_else(|| config_dir().ok().map(|d| d.join(LOG_FILE_NAME)))
    }

    /// Build the request the dialog opens with
    pub fn request(&self) -> HostConnectionRequest {
        let c = &self.connection;
        HostConnectionRequest {
            port_type: c.port_type,
            host_name: bounded_host_name(&c.host_name),
            telnet: c.telnet,
            tcp_port: c.tcp_port,
            telnet_port: c.telnet_port,
            protocol_family: c.protocol_family,
            com_port: c.com_port,
            max_com_port: c.max_com_port,
            history: self
                .history_path()
                .map(HistorySource::file)
                .unwrap_or_default(),
        }
    }

    /// Store an accepted request as the next defaults
    pub fn remember(&mut self, request: &HostConnectionRequest) {
        let c = &mut self.connection;
        c.port_type = request.port_type.normalized();
        // Port 0 is a valid dialog answer but not a stored default
        match c.port_type {
            PortType::Serial => {
                if request.com_port > 0 {
                    c.com_port = request.com_port;
                }
            }
            _ => {
                c.host_name = request.host_name.clone();
                c.telnet = request.telnet;
                if request.tcp_port > 0 {
                    c.tcp_port = request.tcp_port;
                }
                c.protocol_family = request.protocol_family;
            }
        }
    }
}

/// Get the directory holding the config file
///
/// Searches in order:
/// 1. Next to executable (production deployment)
/// 2. Up from target/release or target/debug (dev builds)
pub fn config_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| DialogError::ConfigRead {
        path: PathBuf::from("executable"),
        source: e,
    })?;
    let exe_dir = exe.parent().ok_or_else(|| DialogError::ConfigValidation {
        field: "exe_path",
        reason: "no parent directory".into(),
    })?;

    if exe_dir.join(CONFIG_FILE_NAME).exists() {
        return Ok(exe_dir.to_path_buf());
    }

    // exe_dir = .../project/target/debug, we want .../project
    if let Some(target_dir) = exe_dir.parent() {
        if target_dir
            .file_name()
            .map(|n| n == "target")
            .unwrap_or(false)
        {
            if let Some(project_root) = target_dir.parent() {
                if project_root.join(CONFIG_FILE_NAME).exists() {
                    return Ok(project_root.to_path_buf());
                }
            }
        }
    }

    Ok(exe_dir.to_path_buf())
}

/// Get the default config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Parse config text, rejecting invalid values
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| DialogError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`
///
/// A missing file is created with default values. Callers fall back to
/// `Config::default()` on error once logging is up.
pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        save(&config, path)?;
        return Ok(config);
    }

    let content = fs::read_to_string(path).map_err(|e| DialogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

/// Save config to `path`
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| DialogError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| DialogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Default values tests
    // =========================================================================

    #[test]
    fn test_default_connection_config_values() {
        let config = ConnectionConfig::default();

        assert_eq!(config.port_type, PortType::TcpIp);
        assert_eq!(config.host_name, "");
        assert_eq!(config.tcp_port, DEFAULT_TCP_PORT);
        assert!(config.telnet);
        assert_eq!(config.telnet_port, DEFAULT_TELNET_PORT);
        assert_eq!(config.protocol_family, ProtocolFamily::Auto);
        assert_eq!(config.com_port, DEFAULT_COM_PORT);
        assert_eq!(config.max_com_port, DEFAULT_MAX_COM_PORT);
    }

    #[test]
    fn test_default_history_and_logs() {
        let config = Config::default();
        assert_eq!(config.history.max_entries, MAX_HOST_LIST);
        assert_eq!(config.history.file, None);
        assert_eq!(config.logs.level, "warn");
        assert!(config.validate().is_ok());
    }

    // =========================================================================
    // Parsing tests
    // =========================================================================

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let mut config = Config::default();
        config.connection.port_type = PortType::Serial;
        config.connection.com_port = 5;
        config.connection.protocol_family = ProtocolFamily::Ipv6;
        config.history.file = Some(PathBuf::from("/tmp/hosts.txt"));
        config.ui.language_file = Some(PathBuf::from("lang/fr.toml"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored = parse(&toml_str).unwrap();

        assert_eq!(restored.connection.port_type, PortType::Serial);
        assert_eq!(restored.connection.com_port, 5);
        assert_eq!(restored.connection.protocol_family, ProtocolFamily::Ipv6);
        assert_eq!(restored.history.file, Some(PathBuf::from("/tmp/hosts.txt")));
        assert_eq!(
            restored.ui.language_file,
            Some(PathBuf::from("lang/fr.toml"))
        );
    }

    #[test]
    fn test_config_partial_connection_section() {
        let partial_toml = r#"
[connection]
port_type = "namedpipe"
tcp_port = 2222
"#;

        let config = parse(partial_toml).unwrap();

        assert_eq!(config.connection.port_type, PortType::NamedPipe);
        assert_eq!(config.connection.tcp_port, 2222);
        assert_eq!(config.connection.telnet_port, DEFAULT_TELNET_PORT);
        assert_eq!(config.history.max_entries, MAX_HOST_LIST);
    }

    #[test]
    fn test_config_empty_file() {
        let config = parse("").unwrap();
        assert_eq!(config.connection.port_type, PortType::TcpIp);
        assert_eq!(config.connection.tcp_port, DEFAULT_TCP_PORT);
    }

    #[test]
    fn test_config_rejects_zero_port() {
        let err = parse("[connection]\ntcp_port = 0\n").unwrap_err();
        assert!(matches!(
            err,
            DialogError::ConfigValidation {
                field: "connection.tcp_port",
                ..
            }
        ));
    }

    #[test]
    fn test_config_rejects_bad_type() {
        assert!(parse("[connection]\nport_type = \"carrier-pigeon\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_creates_default() {
        let dir = std::env::temp_dir().join(format!("connect-dlg-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        let _ = fs::remove_file(&path);

        let config = load(&path).unwrap();
        assert_eq!(config.connection.tcp_port, DEFAULT_TCP_PORT);
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = std::env::temp_dir().join(format!("connect-dlg-badcfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "[connection]\ntcp_port = 0\n").unwrap();

        assert!(matches!(
            load(&path),
            Err(DialogError::ConfigValidation { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    // =========================================================================
    // Request mapping tests
    // =========================================================================

    #[test]
    fn test_request_uses_configured_history_file() {
        let mut config = Config::default();
        config.history.file = Some(PathBuf::from("/tmp/h.txt"));
        config.connection.host_name = "example.com".into();

        let request = config.request();
        assert_eq!(request.history, HistorySource::file("/tmp/h.txt"));
        assert_eq!(request.host_name, "example.com");
        assert_eq!(request.max_com_port, DEFAULT_MAX_COM_PORT);
    }

    #[test]
    fn test_remember_tcp_keeps_com_port() {
        let mut config = Config::default();
        let request = HostConnectionRequest {
            port_type: PortType::TcpIp,
            host_name: "example.com".into(),
            telnet: false,
            tcp_port: 22,
            com_port: 9,
            ..Default::default()
        };
        config.remember(&request);

        assert_eq!(config.connection.host_name, "example.com");
        assert!(!config.connection.telnet);
        assert_eq!(config.connection.tcp_port, 22);
        assert_eq!(config.connection.com_port, DEFAULT_COM_PORT);
    }

    #[test]
    fn test_remember_serial_keeps_host() {
        let mut config = Config::default();
        config.connection.host_name = "keep.example".into();
        let request = HostConnectionRequest {
            port_type: PortType::Serial,
            com_port: 3,
            ..Default::default()
        };
        config.remember(&request);

        assert_eq!(config.connection.port_type, PortType::Serial);
        assert_eq!(config.connection.com_port, 3);
        assert_eq!(config.connection.host_name, "keep.example");
    }

    #[test]
    fn test_remembered_zero_port_survives_reload() {
        let mut config = Config::default();
        config.connection.tcp_port = 2222;
        config.ui.language_file = Some(PathBuf::from("lang/fr.toml"));

        let mut request = config.request();
        request.host_name = "example.com".into();
        request.tcp_port = crate::dialog::parse_port("0").unwrap();
        config.remember(&request);

        let restored = parse(&toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(restored.connection.tcp_port, 2222);
        assert_eq!(restored.connection.host_name, "example.com");
        assert_eq!(
            restored.ui.language_file,
            Some(PathBuf::from("lang/fr.toml"))
        );
    }
}
