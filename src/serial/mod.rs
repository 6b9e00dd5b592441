//! Serial port enumeration
//!
//! The dialog lists ports through the `PortEnumerator` trait and asks
//! `PortUsage` whether a port is already held by another instance.

pub mod lock;

use crate::error::{DialogError, Result};
use serialport::{SerialPortInfo, SerialPortType};
use std::collections::BTreeSet;
use tracing::debug;

/// One enumerated serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortDescriptor {
    /// Port number as stored in the request (`COM<n>`)
    pub port_number: u32,
    /// System name of the port
    pub port_name: String,
    /// Human-readable device name, if the system knows one
    pub friendly_name: Option<String>,
}

impl SerialPortDescriptor {
    pub fn new(port_number: u32, port_name: impl Into<String>) -> Self {
        Self {
            port_number,
            port_name: port_name.into(),
            friendly_name: None,
        }
    }

    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Text shown in the serial port list
    pub fn label(&self) -> String {
        match &self.friendly_name {
            Some(friendly) => format!("{}: {}", self.port_name, friendly),
            None => self.port_name.clone(),
        }
    }
}

/// Enumerates serial ports for the dialog
pub trait PortEnumerator {
    /// Ports ordered by port number
    fn enumerate(&self) -> Result<Vec<SerialPortDescriptor>>;

    /// Give back an enumeration once the dialog is done with it
    fn release(&self, ports: Vec<SerialPortDescriptor>) {
        debug!("Released {} serial port descriptors", ports.len());
    }
}

/// Answers whether a port is held by a running instance
pub trait PortUsage {
    fn is_in_use(&self, port_number: u32) -> bool;
}

/// Ports reported by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPorts;

impl PortEnumerator for SystemPorts {
    fn enumerate(&self) -> Result<Vec<SerialPortDescriptor>> {
        let ports =
            serialport::available_ports().map_err(|e| DialogError::PortEnumeration { source: e })?;
        let descriptors = describe_ports(&ports);
        debug!("Enumerated {} serial ports", descriptors.len());
        Ok(descriptors)
    }
}

/// Build descriptors from system port info, sorted by port number
///
/// Names without a `COM<n>` number get their 1-based position, moved up to
/// the next number no other port uses.
pub fn describe_ports(ports: &[SerialPortInfo]) -> Vec<SerialPortDescriptor> {
    let mut taken: BTreeSet<u32> = ports
        .iter()
        .filter_map(|info| com_number(&info.port_name))
        .collect();

    let mut descriptors: Vec<SerialPortDescriptor> = ports
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let port_number = com_number(&info.port_name).unwrap_or_else(|| {
                let mut n = i as u32 + 1;
                while taken.contains(&n) {
                    n += 1;
                }
                taken.insert(n);
                n
            });
            SerialPortDescriptor {
                port_number,
                port_name: info.port_name.clone(),
                friendly_name: friendly_name(&info.port_type),
            }
        })
        .collect();
    descriptors.sort_by_key(|d| d.port_number);
    descriptors
}

/// Number of a `COM<n>` port name
pub fn com_number(port_name: &str) -> Option<u32> {
    let prefix = port_name.get(..3)?;
    if !prefix.eq_ignore_ascii_case("COM") {
        return None;
    }
    port_name[3..].parse().ok().filter(|n| *n > 0)
}

fn friendly_name(port_type: &SerialPortType) -> Option<String> {
    match port_type {
        SerialPortType::UsbPort(usb) => usb
            .product
            .clone()
            .or_else(|| usb.manufacturer.clone())
            .or_else(|| Some(format!("USB {:04X}:{:04X}", usb.vid, usb.pid))),
        SerialPortType::BluetoothPort => Some("Bluetooth".to_string()),
        SerialPortType::PciPort => Some("PCI".to_string()),
        SerialPortType::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn usb(product: Option<&str>) -> SerialPortType {
        SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x16C0,
            pid: 0x0483,
            serial_number: None,
            manufacturer: Some("Teensyduino".to_string()),
            product: product.map(String::from),
        })
    }

    #[test]
    fn test_com_number() {
        assert_eq!(com_number("COM3"), Some(3));
        assert_eq!(com_number("com12"), Some(12));
        assert_eq!(com_number("COM0"), None);
        assert_eq!(com_number("COMX"), None);
        assert_eq!(com_number("/dev/ttyUSB0"), None);
        assert_eq!(com_number("CO"), None);
    }

    #[test]
    fn test_label_with_and_without_friendly_name() {
        let plain = SerialPortDescriptor::new(1, "COM1");
        assert_eq!(plain.label(), "COM1");

        let usb = SerialPortDescriptor::new(3, "COM3").with_friendly_name("USB Serial Device");
        assert_eq!(usb.label(), "COM3: USB Serial Device");
    }

    #[test]
    fn test_describe_ports_sorted_by_number() {
        let ports = vec![
            SerialPortInfo {
                port_name: "COM10".to_string(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "COM2".to_string(),
                port_type: usb(Some("USB Serial")),
            },
        ];
        let descriptors = describe_ports(&ports);
        assert_eq!(descriptors[0].port_number, 2);
        assert_eq!(descriptors[0].friendly_name.as_deref(), Some("USB Serial"));
        assert_eq!(descriptors[1].port_number, 10);
        assert_eq!(descriptors[1].friendly_name, None);
    }

    #[test]
    fn test_describe_ports_non_com_names_use_position() {
        let ports = vec![
            SerialPortInfo {
                port_name: "/dev/ttyACM0".to_string(),
                port_type: usb(None),
            },
            SerialPortInfo {
                port_name: "/dev/ttyS0".to_string(),
                port_type: SerialPortType::PciPort,
            },
        ];
        let descriptors = describe_ports(&ports);
        assert_eq!(descriptors[0].port_number, 1);
        assert_eq!(descriptors[0].friendly_name.as_deref(), Some("Teensyduino"));
        assert_eq!(descriptors[1].port_number, 2);
        assert_eq!(descriptors[1].friendly_name.as_deref(), Some("PCI"));
    }

    #[test]
    fn test_describe_ports_mixed_names_get_distinct_numbers() {
        let ports = vec![
            SerialPortInfo {
                port_name: "/dev/ttyUSB0".to_string(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "COM1".to_string(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "/dev/ttyUSB1".to_string(),
                port_type: SerialPortType::Unknown,
            },
            SerialPortInfo {
                port_name: "COM3".to_string(),
                port_type: SerialPortType::Unknown,
            },
        ];
        let descriptors = describe_ports(&ports);
        let numbers: Vec<(u32, &str)> = descriptors
            .iter()
            .map(|d| (d.port_number, d.port_name.as_str()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (1, "COM1"),
                (2, "/dev/ttyUSB0"),
                (3, "COM3"),
                (4, "/dev/ttyUSB1"),
            ]
        );
    }
}
