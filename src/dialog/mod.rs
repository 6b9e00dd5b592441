//! New-connection host dialog
//!
//! `HostDialog` is the controller of one modal dialog session. It is built
//! from the caller's `HostConnectionRequest`, reacts to one `Event` at a
//! time, and writes the accepted choice back into the request. The hosting
//! mechanism (terminal UI, scripted test host) delivers events through
//! `ModalHost::run_modal`.
//!
//! The TCP/IP fields and the serial port list form two groups whose
//! enabled states always differ; the enabled group is the one written back
//! on OK.

pub mod controls;
pub mod input;

pub use controls::{
    ComboBox, ComboItem, ControlId, ControlKind, EditAction, Enablement, SelectAction,
    TextField, SERIAL_GROUP, TCPIP_GROUP,
};

use crate::constants::{HOST_NAME_MAX_LENGTH, TCP_PORT_MAX_DIGITS};
use crate::error::Result;
use crate::history::HostHistory;
use crate::i18n::LanguageFile;
use crate::request::{HostConnectionRequest, PortType, ProtocolFamily};
use crate::serial::{PortEnumerator, PortUsage, SerialPortDescriptor};
use std::collections::BTreeMap;
use tracing::{debug, error, info, trace, warn};

// =============================================================================
// Events and results
// =============================================================================

/// Input delivered to the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Button press, radio selection or checkbox toggle
    Command(ControlId),
    /// Editing in an edit box
    Edit(ControlId, EditAction),
    /// Selection change in a list
    Select(ControlId, SelectAction),
    FocusNext,
    FocusPrev,
    /// Dialog closed from outside (same as Cancel)
    Close,
}

impl Event {
    /// Control the event is aimed at
    pub fn target(&self) -> Option<ControlId> {
        match self {
            Event::Command(id) | Event::Edit(id, _) | Event::Select(id, _) => Some(*id),
            _ => None,
        }
    }
}

/// How a modal session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Cancelled,
    Accepted,
}

impl DialogResult {
    /// Integer result of the modal session (1 = OK, 0 = cancel)
    pub fn code(self) -> i32 {
        match self {
            DialogResult::Cancelled => 0,
            DialogResult::Accepted => 1,
        }
    }

    pub fn from_code(code: i32) -> Self {
        if code == 1 {
            DialogResult::Accepted
        } else {
            DialogResult::Cancelled
        }
    }
}

/// Whether the session goes on after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    End(DialogResult),
}

/// Help pages the dialog can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    NewConnection,
}

/// Window owning the dialog
pub trait DialogOwner {
    /// Show help for `topic`; the dialog stays open
    fn post_help(&mut self, topic: HelpTopic);
}

/// Runs a modal session: delivers events until the dialog ends it
pub trait ModalHost: DialogOwner {
    fn run_modal(&mut self, dialog: &mut HostDialog<'_>) -> Result<DialogResult>;
}

/// Which radio button is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    TcpIp,
    Serial,
}

/// Collaborators the dialog reads from
#[derive(Clone, Copy)]
pub struct DialogServices<'a> {
    pub ports: &'a dyn PortEnumerator,
    pub usage: &'a dyn PortUsage,
    pub history: &'a dyn HostHistory,
    pub language: &'a LanguageFile,
}

// =============================================================================
// Texts
// =============================================================================

/// Resource keys and built-in texts; `None` is the dialog title
const TEXT_INFOS: [(Option<ControlId>, &str, &str); 11] = [
    (None, "DLG_HOST_TITLE", "New connection"),
    (Some(ControlId::TcpIp), "DLG_HOST_TCPIP", "TCP/IP"),
    (Some(ControlId::HostNameLabel), "DLG_HOST_TCPIPHOST", "Host:"),
    (Some(ControlId::Telnet), "DLG_HOST_TCPIPTELNET", "Telnet"),
    (Some(ControlId::TcpPortLabel), "DLG_HOST_TCPIPPORT", "TCP port#:"),
    (Some(ControlId::ProtocolLabel), "DLG_HOST_TCPIPPROTOCOL", "Protocol:"),
    (Some(ControlId::Serial), "DLG_HOST_SERIAL", "Serial"),
    (Some(ControlId::ComLabel), "DLG_HOST_SERIALPORT", "Port:"),
    (Some(ControlId::Ok), "BTN_OK", "OK"),
    (Some(ControlId::Cancel), "BTN_CANCEL", "Cancel"),
    (Some(ControlId::Help), "BTN_HELP", "Help"),
];

/// Localized texts of the dialog
#[derive(Debug, Clone, Default)]
pub struct DialogTexts {
    title: String,
    labels: BTreeMap<ControlId, String>,
}

impl DialogTexts {
    pub fn resolve(language: &LanguageFile) -> Self {
        let mut texts = Self::default();
        for (control, key, default) in TEXT_INFOS {
            let text = language.resolve(key, default);
            match control {
                Some(id) => {
                    texts.labels.insert(id, text);
                }
                None => texts.title = text,
            }
        }
        texts
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn label(&self, id: ControlId) -> &str {
        self.labels.get(&id).map(String::as_str).unwrap_or("")
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Controller state of one dialog session
pub struct HostDialog<'a> {
    request: &'a mut HostConnectionRequest,
    enumerator: &'a dyn PortEnumerator,
    /// Enumerated ports; list entries of `com` carry indices into this
    ports: Vec<SerialPortDescriptor>,
    texts: DialogTexts,
    history: ComboBox,
    host_name: TextField,
    telnet: bool,
    tcp_port: TextField,
    protocol: ComboBox,
    connection: ConnectionKind,
    com: ComboBox,
    enablement: Enablement,
    focus: ControlId,
}

impl<'a> HostDialog<'a> {
    /// Set up the controls from `request`
    pub fn initialize(
        request: &'a mut HostConnectionRequest,
        services: &DialogServices<'a>,
    ) -> Self {
        request.port_type = request.port_type.normalized();

        let ports = match services.ports.enumerate() {
            Ok(ports) => ports,
            Err(e) => {
                warn!("Serial port enumeration failed: {}", e);
                Vec::new()
            }
        };

        let texts = DialogTexts::resolve(services.language);

        let mut history = ComboBox::default();
        for (i, host) in services.history.load(&request.history).into_iter().enumerate() {
            history.add(host, i);
        }
        history.select(0);

        let mut host_name = TextField::new(HOST_NAME_MAX_LENGTH - 1);
        match history.selected_item() {
            Some(item) => host_name.set_text(&item.label),
            None => host_name.set_text(&request.host_name),
        }

        let mut tcp_port = TextField::new(TCP_PORT_MAX_DIGITS);
        tcp_port.set_text(&request.tcp_port.to_string());

        let mut protocol = ComboBox::default();
        for family in ProtocolFamily::ALL {
            protocol.add(family.label(), family.index());
        }
        protocol.select(request.protocol_family.index());

        let mut com = ComboBox::default();
        for (i, port) in ports.iter().enumerate() {
            if i > request.max_com_port {
                continue;
            }
            if services.usage.is_in_use(port.port_number) {
                debug!("Skipping {}: in use", port.port_name);
                continue;
            }
            com.add(port.label(), i);
        }

        let mut enablement = Enablement::default();
        if com.is_empty() {
            // No usable port: serial is not an option
            request.port_type = PortType::TcpIp;
            enablement.disable(&[ControlId::Serial]);
        } else {
            let com_port = request.com_port;
            let preferred = com
                .position_by_tag(|tag| ports[tag].port_number == com_port)
                .unwrap_or(0);
            com.select(preferred);
        }

        let connection = match request.port_type {
            PortType::Serial => ConnectionKind::Serial,
            _ => ConnectionKind::TcpIp,
        };

        let telnet = request.telnet;
        let mut dialog = Self {
            request,
            enumerator: services.ports,
            ports,
            texts,
            history,
            host_name,
            telnet,
            tcp_port,
            protocol,
            connection,
            com,
            enablement,
            focus: ControlId::HostName,
        };
        dialog.select_connection(connection);
        dialog.focus = match connection {
            ConnectionKind::TcpIp => ControlId::HostName,
            ConnectionKind::Serial => ControlId::Com,
        };

        info!(
            ports = dialog.ports.len(),
            offered = dialog.com.len(),
            history = dialog.history.len(),
            "Host dialog opened ({:?})",
            connection
        );
        dialog
    }

    // =========================================================================
    // Accessors for rendering
    // =========================================================================

    pub fn texts(&self) -> &DialogTexts {
        &self.texts
    }

    pub fn connection(&self) -> ConnectionKind {
        self.connection
    }

    pub fn host_name(&self) -> &TextField {
        &self.host_name
    }

    pub fn history(&self) -> &ComboBox {
        &self.history
    }

    pub fn telnet(&self) -> bool {
        self.telnet
    }

    pub fn tcp_port(&self) -> &TextField {
        &self.tcp_port
    }

    pub fn protocol(&self) -> &ComboBox {
        &self.protocol
    }

    pub fn com(&self) -> &ComboBox {
        &self.com
    }

    pub fn ports(&self) -> &[SerialPortDescriptor] {
        &self.ports
    }

    pub fn focus(&self) -> ControlId {
        self.focus
    }

    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.enablement.is_enabled(id)
    }

    /// Port type the request holds right now
    pub fn port_type(&self) -> PortType {
        self.request.port_type
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// React to one event
    pub fn handle(&mut self, event: Event, owner: &mut dyn DialogOwner) -> Flow {
        if let Some(id) = event.target() {
            if !self.enablement.is_enabled(id) {
                trace!(?id, "Ignoring event for disabled control");
                return Flow::Continue;
            }
        }

        match event {
            Event::Command(ControlId::Ok) => return Flow::End(self.accept()),
            Event::Command(ControlId::Cancel) | Event::Close => {
                info!("Host dialog cancelled");
                return Flow::End(DialogResult::Cancelled);
            }
            Event::Command(ControlId::TcpIp) => {
                self.focus = ControlId::TcpIp;
                self.select_connection(ConnectionKind::TcpIp);
            }
            Event::Command(ControlId::Serial) => {
                self.focus = ControlId::Serial;
                self.select_connection(ConnectionKind::Serial);
            }
            Event::Command(ControlId::Telnet) => {
                self.focus = ControlId::Telnet;
                self.toggle_telnet();
            }
            Event::Command(ControlId::Help) => owner.post_help(HelpTopic::NewConnection),
            Event::Edit(ControlId::HostName, action) => self.host_name.apply(&action),
            Event::Edit(ControlId::TcpPort, action) => self.tcp_port.apply(&action),
            Event::Select(ControlId::HostName, action) => {
                if self.history.apply(action) {
                    if let Some(item) = self.history.selected_item() {
                        self.host_name.set_text(&item.label);
                    }
                }
            }
            Event::Select(ControlId::Protocol, action) => {
                self.protocol.apply(action);
            }
            Event::Select(ControlId::Com, action) => {
                self.com.apply(action);
            }
            Event::FocusNext => self.move_focus(true),
            Event::FocusPrev => self.move_focus(false),
            other => trace!(?other, "Unhandled event"),
        }
        Flow::Continue
    }

    /// Enable the group of `kind`, disable the other one
    fn select_connection(&mut self, kind: ConnectionKind) {
        self.connection = kind;
        match kind {
            ConnectionKind::TcpIp => {
                self.enablement.enable(&TCPIP_GROUP);
                self.enablement.disable(&SERIAL_GROUP);
            }
            ConnectionKind::Serial => {
                self.enablement.enable(&SERIAL_GROUP);
                self.enablement.disable(&TCPIP_GROUP);
            }
        }
        debug!("Connection kind: {:?}", kind);
    }

    fn toggle_telnet(&mut self) {
        self.telnet = !self.telnet;
        if self.telnet {
            self.tcp_port
                .set_text(&self.request.telnet_port.to_string());
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let order = ControlId::TAB_ORDER;
        let len = order.len();
        let start = order.iter().position(|id| *id == self.focus).unwrap_or(0);
        for step in 1..=len {
            let index = if forward {
                (start + step) % len
            } else {
                (start + len - step) % len
            };
            if self.enablement.is_enabled(order[index]) {
                self.focus = order[index];
                return;
            }
        }
    }

    /// Copy the enabled group into the request
    fn accept(&mut self) -> DialogResult {
        match self.connection {
            ConnectionKind::TcpIp => {
                self.request.port_type = PortType::TcpIp;
                self.request.set_host_name(self.host_name.text());
                self.request.telnet = self.telnet;
                match parse_port(self.tcp_port.text()) {
                    Some(port) => self.request.tcp_port = port,
                    None => debug!(
                        "Ignoring TCP port {:?}, keeping {}",
                        self.tcp_port.text(),
                        self.request.tcp_port
                    ),
                }
                let index = self.protocol.selected_tag().unwrap_or(0);
                self.request.protocol_family = ProtocolFamily::from_index(index);
            }
            ConnectionKind::Serial => {
                self.request.port_type = PortType::Serial;
                self.request.host_name.clear();
                let tag = self.com.selected_tag();
                debug_assert!(tag.is_some(), "serial list has no selection");
                match tag.and_then(|t| self.ports.get(t)) {
                    Some(port) => self.request.com_port = port.port_number,
                    None => error!(
                        "Serial list has no selection, keeping COM{}",
                        self.request.com_port
                    ),
                }
            }
        }
        info!(connection = ?self.request.target(), "Host dialog accepted");
        DialogResult::Accepted
    }
}

impl Drop for HostDialog<'_> {
    fn drop(&mut self) {
        let ports = std::mem::take(&mut self.ports);
        self.enumerator.release(ports);
    }
}

/// Parse the TCP port box: unsigned decimal that fits a port number
pub fn parse_port(text: &str) -> Option<u16> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Run one modal host dialog session
///
/// Returns `true` when the user accepted; `request` then holds the choice.
pub fn open_host_dialog(
    host: &mut dyn ModalHost,
    request: &mut HostConnectionRequest,
    services: &DialogServices<'_>,
) -> Result<bool> {
    let mut dialog = HostDialog::initialize(request, services);
    let result = host.run_modal(&mut dialog);
    drop(dialog);
    Ok(result? == DialogResult::Accepted)
}
