//! connect-dlg - new-connection dialog
//!
//! Usage:
//!   connect-dlg                 Open the dialog, print the choice as JSON
//!   connect-dlg --serial        Open with the serial option selected
//!   connect-dlg ports           List serial ports

use clap::Parser;
use connect_dialog::cli::{Cli, Command};
use connect_dialog::config::{self, Config};
use connect_dialog::error::{DialogError, Result};
use connect_dialog::history::FileHistory;
use connect_dialog::i18n::LanguageFile;
use connect_dialog::serial::lock::PortLocks;
use connect_dialog::serial::{PortEnumerator, PortUsage, SystemPorts};
use connect_dialog::ui::TerminalHost;
use connect_dialog::{logging, open_host_dialog, ConnectionTarget, DialogServices};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };
    let (mut cfg, load_error) = match config::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init_tracing(&cfg.logs.level, cli.verbose, cfg.log_path().as_deref());
    let config_loaded = load_error.is_none();
    if let Some(e) = load_error {
        warn!("Config error in {:?}: {}, using defaults", config_path, e);
    }

    let locks = PortLocks::in_config_dir()?;

    if let Some(Command::Ports) = cli.command {
        return list_ports(&locks);
    }

    let language = load_language(cli.lang.as_deref().or(cfg.ui.language_file.as_deref()));
    let history = FileHistory::new(cfg.history.max_entries);
    let mut request = cfg.request();
    cli.apply(&mut request);

    let services = DialogServices {
        ports: &SystemPorts,
        usage: &locks,
        history: &history,
        language: &language,
    };
    let mut host = TerminalHost::new();
    if !open_host_dialog(&mut host, &mut request, &services)? {
        return Ok(ExitCode::from(1));
    }

    let target = request.target();
    let json = serde_json::to_string(&target).map_err(|source| DialogError::Output { source })?;
    println!("{}", json);

    if !cli.no_save {
        let config_path = config_loaded.then_some(config_path.as_path());
        remember(&mut cfg, config_path, &history, &request, &target);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_language(path: Option<&Path>) -> LanguageFile {
    match path {
        Some(path) => LanguageFile::load(path).unwrap_or_else(|e| {
            warn!("{}, using built-in texts", e);
            LanguageFile::builtin()
        }),
        None => LanguageFile::builtin(),
    }
}

/// Record the accepted connection; `config_path` is `None` when the config
/// file could not be loaded and must not be overwritten
fn remember(
    cfg: &mut Config,
    config_path: Option<&Path>,
    history: &FileHistory,
    request: &connect_dialog::HostConnectionRequest,
    target: &ConnectionTarget,
) {
    if let ConnectionTarget::Tcp { host, .. } = target {
        if let Err(e) = history.record(&request.history, host) {
            warn!("Failed to update history: {}", e);
        }
    }
    let Some(config_path) = config_path else {
        return;
    };
    cfg.remember(request);
    match config::save(cfg, config_path) {
        Ok(()) => info!("Saved connection defaults to {:?}", config_path),
        Err(e) => warn!("Failed to save config: {}", e),
    }
}

fn list_ports(usage: &dyn PortUsage) -> Result<ExitCode> {
    let ports = SystemPorts.enumerate()?;
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in &ports {
        let status = if usage.is_in_use(port.port_number) {
            "  (in use)"
        } else {
            ""
        };
        println!("COM{:<4} {}{}", port.port_number, port.label(), status);
    }
    Ok(ExitCode::SUCCESS)
}
