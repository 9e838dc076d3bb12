//! Byte-oriented channels to a physical printer.
//!
//! A [`Backend`] only has to write a byte buffer and try to read whatever
//! the printer has queued; [`crate::printer::Printer`] supplies the polling
//! loop on top. Status replies travel in-band on the same channel.

use crate::error::{Error, Result};
use crate::status::FRAME_LEN;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::debug;

pub trait Backend {
    /// Write the whole buffer to the printer.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Try to read pending data. Returns `Ok(None)` when nothing has
    /// arrived yet; never blocks beyond a short internal bound.
    fn read(&mut self) -> Result<Option<Vec<u8>>>;
}

impl Backend for Box<dyn Backend> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }
}

pub struct NetworkBackend {
    stream: TcpStream,
}

impl NetworkBackend {
    /// Connect to a printer over TCP. Port defaults to 9100, the raw
    /// printing port the QL network models listen on.
    pub fn new(host: &str) -> Result<Self> {
        let address = if host.contains(':') {
            host.to_string()
        } else {
            format!("{}:9100", host)
        };

        let stream = TcpStream::connect(&address)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(Duration::from_millis(50)))?;
        debug!(%address, "connected to network printer");
        Ok(NetworkBackend { stream })
    }
}

impl Backend for NetworkBackend {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data)?;
        self.stream.flush()?;
        debug!(bytes = data.len(), "wrote to network printer");
        Ok(())
    }

    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = [0u8; FRAME_LEN];
        match self.stream.read(&mut buf) {
            Ok(0) => Err(Error::Transport(
                "connection closed by printer".to_string(),
            )),
            Ok(n) => Ok(Some(buf[..n].to_vec())),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub struct UsbBackend {
    device: rusb::DeviceHandle<rusb::GlobalContext>,
    endpoint_in: u8,
    endpoint_out: u8,
    write_timeout: Duration,
    read_timeout: Duration,
}

impl UsbBackend {
    /// Open a printer by its `vendor_id:product_id` specifier (e.g. "04f9:2042").
    pub fn new(device_specifier: &str) -> Result<Self> {
        let (vendor_id, product_id) = parse_usb_specifier(device_specifier)?;

        let devices = rusb::devices()?;
        let mut target_device = None;

        for device in devices.iter() {
            let device_desc = device.device_descriptor()?;
            if device_desc.vendor_id() == vendor_id && device_desc.product_id() == product_id {
                target_device = Some(device);
                break;
            }
        }

        let device = target_device.ok_or_else(|| {
            Error::Transport(format!("no USB device {}", device_specifier))
        })?;
        let handle = device.open()?;

        if handle.kernel_driver_active(0)? {
            handle.detach_kernel_driver(0)?;
        }

        handle.set_active_configuration(1)?;

        let config_desc = device.config_descriptor(0)?;
        let mut printer_interface = None;
        let mut interface_number = 0;

        for interface in config_desc.interfaces() {
            for descriptor in interface.descriptors() {
                // USB class 7 is the printer class
                if descriptor.class_code() == 7 {
                    printer_interface = Some(descriptor);
                    interface_number = interface.number();
                    break;
                }
            }
            if printer_interface.is_some() {
                break;
            }
        }

        let interface_desc = printer_interface
            .ok_or_else(|| Error::Transport("no printer interface found".to_string()))?;
        handle.claim_interface(interface_number)?;

        let mut endpoint_in = 0;
        let mut endpoint_out = 0;

        for endpoint_desc in interface_desc.endpoint_descriptors() {
            match endpoint_desc.direction() {
                rusb::Direction::In => endpoint_in = endpoint_desc.address(),
                rusb::Direction::Out => endpoint_out = endpoint_desc.address(),
            }
        }

        if endpoint_in == 0 || endpoint_out == 0 {
            return Err(Error::Transport(
                "could not find required USB endpoints".to_string(),
            ));
        }

        debug!(
            interface = interface_number,
            endpoint_in, endpoint_out, "USB connection established"
        );

        Ok(UsbBackend {
            device: handle,
            endpoint_in,
            endpoint_out,
            write_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_millis(10),
        })
    }
}

impl Backend for UsbBackend {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let bytes_written = self
            .device
            .write_bulk(self.endpoint_out, data, self.write_timeout)?;
        debug!(bytes = bytes_written, total = data.len(), "USB write");
        if bytes_written != data.len() {
            return Err(Error::Transport(format!(
                "incomplete USB write: {} of {} bytes",
                bytes_written,
                data.len()
            )));
        }
        Ok(())
    }

    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = [0u8; FRAME_LEN];
        match self
            .device
            .read_bulk(self.endpoint_in, &mut buf, self.read_timeout)
        {
            Ok(0) => Ok(None),
            Ok(n) => Ok(Some(buf[..n].to_vec())),
            Err(rusb::Error::Timeout) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_usb_specifier(device_specifier: &str) -> Result<(u16, u16)> {
    let Some((vendor_str, product_str)) = device_specifier.split_once(':') else {
        return Err(Error::Transport(
            "USB device specifier must be in format vendor_id:product_id".to_string(),
        ));
    };
    let parse = |s: &str| {
        u16::from_str_radix(s.trim_start_matches("0x"), 16).map_err(|_| {
            Error::Transport(format!("invalid hex id in USB specifier: {}", s))
        })
    };
    Ok((parse(vendor_str)?, parse(product_str)?))
}

/// Create a backend from a host specifier: `vendor_id:product_id` selects
/// USB, anything else is treated as a network host.
pub fn from_host(host: &str) -> Result<Box<dyn Backend>> {
    fn is_usb_specifier(host: &str) -> bool {
        host.contains(':') && host.chars().all(|c| c.is_ascii_hexdigit() || c == ':')
    }

    if is_usb_specifier(host) {
        Ok(Box::new(UsbBackend::new(host)?))
    } else {
        Ok(Box::new(NetworkBackend::new(host)?))
    }
}
