//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use crate::request::{HostConnectionRequest, PortType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Pick a TCP/IP host or a serial port for a new terminal connection
///
/// Prints the chosen connection as JSON and exits 0, or exits 1 when the
/// dialog is cancelled.
#[derive(Parser, Debug, Default)]
#[command(name = "connect-dlg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: connect-dlg.toml next to the executable)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host name to start with when the history is empty
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// TCP port to start with
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Open with the serial option selected
    #[arg(long)]
    pub serial: bool,

    /// Language file with localized dialog texts
    #[arg(long, value_name = "FILE")]
    pub lang: Option<PathBuf>,

    /// Don't store the accepted connection in config and history
    #[arg(long)]
    pub no_save: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports as the dialog sees them
    Ports,
}

impl Cli {
    /// Apply command-line overrides to the request the dialog opens with
    pub fn apply(&self, request: &mut HostConnectionRequest) {
        if let Some(host) = &self.host {
            request.set_host_name(host);
        }
        if let Some(port) = self.port {
            request.tcp_port = port;
        }
        if self.serial {
            request.port_type = PortType::Serial;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
