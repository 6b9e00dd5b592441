//! New-connection dialog for terminal sessions
//!
//! Lets the user pick a TCP/IP destination (host, port, protocol family,
//! Telnet or raw) or a serial port, and hands the choice back to the caller
//! as a `HostConnectionRequest`. No connection is opened here.

pub mod cli;
pub mod config;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod history;
pub mod i18n;
pub mod logging;
pub mod request;
pub mod serial;
pub mod ui;

pub use dialog::{open_host_dialog, DialogServices, HostDialog};
pub use error::{DialogError, Result};
pub use request::{ConnectionTarget, HostConnectionRequest, PortType, ProtocolFamily};
