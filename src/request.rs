//! Connection request record
//!
//! `HostConnectionRequest` is owned by the caller and handed to the dialog
//! by mutable reference. The dialog reads it at initialization and writes
//! the accepted choice back into it.

use crate::constants::{
    DEFAULT_COM_PORT, DEFAULT_MAX_COM_PORT, DEFAULT_TCP_PORT, DEFAULT_TELNET_PORT,
    HOST_NAME_MAX_LENGTH,
};
use crate::history::HistorySource;
use serde::{Deserialize, Serialize};

/// Kind of port a connection goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    #[default]
    TcpIp,
    Serial,
    /// Replay from file (legacy, shown as TCP/IP)
    File,
    /// Named pipe (legacy, shown as TCP/IP)
    NamedPipe,
}

impl PortType {
    /// Map legacy port types onto TCP/IP
    pub fn normalized(self) -> Self {
        match self {
            PortType::File | PortType::NamedPipe => PortType::TcpIp,
            other => other,
        }
    }
}

/// Address family used to resolve the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolFamily {
    #[default]
    Auto,
    Ipv6,
    Ipv4,
}

impl ProtocolFamily {
    /// Entries of the protocol list, in list order
    pub const ALL: [ProtocolFamily; 3] = [
        ProtocolFamily::Auto,
        ProtocolFamily::Ipv6,
        ProtocolFamily::Ipv4,
    ];

    /// Map a protocol list index to a family
    ///
    /// The list has exactly three entries; anything past index 1 is IPv4.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => ProtocolFamily::Auto,
            1 => ProtocolFamily::Ipv6,
            _ => ProtocolFamily::Ipv4,
        }
    }

    /// Position of this family in the protocol list
    pub fn index(self) -> usize {
        match self {
            ProtocolFamily::Auto => 0,
            ProtocolFamily::Ipv6 => 1,
            ProtocolFamily::Ipv4 => 2,
        }
    }

    /// Text shown in the protocol list
    pub fn label(self) -> &'static str {
        match self {
            ProtocolFamily::Auto => "AUTO",
            ProtocolFamily::Ipv6 => "IPv6",
            ProtocolFamily::Ipv4 => "IPv4",
        }
    }
}

/// Input/output record of the host dialog
#[derive(Debug, Clone, PartialEq)]
pub struct HostConnectionRequest {
    pub port_type: PortType,
    pub host_name: String,
    pub telnet: bool,
    pub tcp_port: u16,
    /// Port put into the port box when Telnet gets checked
    pub telnet_port: u16,
    pub protocol_family: ProtocolFamily,
    pub com_port: u32,
    /// Highest enumeration index offered in the serial list (inclusive)
    pub max_com_port: usize,
    pub history: HistorySource,
}

impl Default for HostConnectionRequest {
    fn default() -> Self {
        Self {
            port_type: PortType::TcpIp,
            host_name: String::new(),
            telnet: true,
            tcp_port: DEFAULT_TCP_PORT,
            telnet_port: DEFAULT_TELNET_PORT,
            protocol_family: ProtocolFamily::Auto,
            com_port: DEFAULT_COM_PORT,
            max_com_port: DEFAULT_MAX_COM_PORT,
            history: HistorySource::none(),
        }
    }
}

/// The meaningful part of an accepted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionTarget {
    Tcp {
        host: String,
        port: u16,
        telnet: bool,
        protocol: ProtocolFamily,
    },
    Serial {
        com_port: u32,
    },
}

impl HostConnectionRequest {
    /// Set the host name, cut to the bounded buffer length
    pub fn set_host_name(&mut self, name: &str) {
        self.host_name = bounded_host_name(name);
    }

    /// Connection the caller should open
    pub fn target(&self) -> ConnectionTarget {
        match self.port_type.normalized() {
            PortType::Serial => ConnectionTarget::Serial {
                com_port: self.com_port,
            },
            _ => ConnectionTarget::Tcp {
                host: self.host_name.clone(),
                port: self.tcp_port,
                telnet: self.telnet,
                protocol: self.protocol_family,
            },
        }
    }
}

/// Cut a host name to `HOST_NAME_MAX_LENGTH - 1` characters
pub fn bounded_host_name(name: &str) -> String {
    name.chars().take(HOST_NAME_MAX_LENGTH - 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_port_types_normalize_to_tcpip() {
        assert_eq!(PortType::File.normalized(), PortType::TcpIp);
        assert_eq!(PortType::NamedPipe.normalized(), PortType::TcpIp);
        assert_eq!(PortType::Serial.normalized(), PortType::Serial);
        assert_eq!(PortType::TcpIp.normalized(), PortType::TcpIp);
    }

    #[test]
    fn test_protocol_family_index_mapping() {
        assert_eq!(ProtocolFamily::from_index(0), ProtocolFamily::Auto);
        assert_eq!(ProtocolFamily::from_index(1), ProtocolFamily::Ipv6);
        assert_eq!(ProtocolFamily::from_index(2), ProtocolFamily::Ipv4);
        for family in ProtocolFamily::ALL {
            assert_eq!(ProtocolFamily::from_index(family.index()), family);
        }
    }

    #[test]
    fn test_bounded_host_name() {
        let long = "a".repeat(HOST_NAME_MAX_LENGTH + 10);
        assert_eq!(bounded_host_name(&long).len(), HOST_NAME_MAX_LENGTH - 1);
        assert_eq!(bounded_host_name("example.com"), "example.com");
    }

    #[test]
    fn test_target_serial() {
        let request = HostConnectionRequest {
            port_type: PortType::Serial,
            com_port: 4,
            ..Default::default()
        };
        assert_eq!(request.target(), ConnectionTarget::Serial { com_port: 4 });
    }

    #[test]
    fn test_target_tcp_json() {
        let mut request = HostConnectionRequest::default();
        request.set_host_name("example.com");
        request.tcp_port = 2222;
        request.telnet = false;
        request.protocol_family = ProtocolFamily::Ipv4;

        let json = serde_json::to_string(&request.target()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"tcp","host":"example.com","port":2222,"telnet":false,"protocol":"ipv4"}"#
        );
    }
}
