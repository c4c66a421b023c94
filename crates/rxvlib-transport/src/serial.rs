//! Serial port link to the receiver.
//!
//! [`SerialLink`] implements the polled [`Link`] trait on top of a serial
//! port. Reads never block: each call first asks the driver how many bytes
//! are waiting and only then reads them into a small local queue.
//!
//! # Example
//!
//! ```no_run
//! use rxvlib_core::Link;
//! use rxvlib_transport::SerialLink;
//!
//! # fn example() -> rxvlib_core::Result<()> {
//! let mut link = SerialLink::open("/dev/ttyUSB0", 9600)?;
//! link.write_all(b"\x11000\x03")?;
//! while let Some(byte) = link.read_byte()? {
//!     println!("{byte:02X}");
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::time::Duration;

use tokio_serial::SerialPort;

use rxvlib_core::error::{Error, Result};
use rxvlib_core::link::Link;

/// Largest chunk pulled from the driver per read.
const READ_CHUNK: usize = 256;

/// Driver-level timeout; only reached if the driver miscounts pending bytes.
const PORT_TIMEOUT: Duration = Duration::from_millis(10);

/// Serial port configuration.
///
/// Defaults match the RX-V1600's RS-232C port: 9600 baud, 8N1, no flow
/// control.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (the receiver only supports 9600)
    pub baud_rate: u32,
    /// Number of data bits
    pub data_bits: DataBits,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Parity checking
    pub parity: Parity,
    /// Flow control (the receiver uses none)
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
        }
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Five => tokio_serial::DataBits::Five,
            DataBits::Six => tokio_serial::DataBits::Six,
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        }
    }
}

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

/// Flow control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    Software,
    Hardware,
}

impl From<FlowControl> for tokio_serial::FlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::None => tokio_serial::FlowControl::None,
            FlowControl::Software => tokio_serial::FlowControl::Software,
            FlowControl::Hardware => tokio_serial::FlowControl::Hardware,
        }
    }
}

/// Serial port [`Link`] to an RX-V1600.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    port_name: String,
    rx: VecDeque<u8>,
}

impl SerialLink {
    /// Open a serial port at `baud_rate`, 8N1, no flow control.
    pub fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::open_with_config(port, config)
    }

    /// Open a serial port with full configuration control.
    pub fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            data_bits = ?config.data_bits,
            stop_bits = ?config.stop_bits,
            parity = ?config.parity,
            flow_control = ?config.flow_control,
            "Opening serial port"
        );

        let serial = tokio_serial::new(port, config.baud_rate)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into())
            .flow_control(config.flow_control.into())
            .timeout(PORT_TIMEOUT)
            .open()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Link(format!("Failed to open serial port {port}: {e}"))
            })?;

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened");

        Ok(Self {
            port: serial,
            port_name: port.to_string(),
            rx: VecDeque::with_capacity(READ_CHUNK),
        })
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Pull whatever the driver has buffered into the local queue.
    fn fill(&mut self) -> Result<()> {
        let pending = self.port.bytes_to_read().map_err(|e| {
            Error::Link(format!("{}: cannot query input buffer: {e}", self.port_name))
        })?;
        if pending == 0 {
            return Ok(());
        }

        let mut buf = [0u8; READ_CHUNK];
        let want = (pending as usize).min(READ_CHUNK);
        match self.port.read(&mut buf[..want]) {
            Ok(n) => {
                tracing::trace!(port = %self.port_name, bytes = n, data = ?&buf[..n], "Received data");
                self.rx.extend(&buf[..n]);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(()),
            Err(e) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
                Err(Error::Io(e))
            }
        }
    }
}

impl Link for SerialLink {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.rx.is_empty() {
            self.fill()?;
        }
        Ok(self.rx.pop_front())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        tracing::trace!(port = %self.port_name, bytes = data.len(), data = ?data, "Sending data");
        self.port.write_all(data).map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send data");
            Error::Io(e)
        })?;
        self.port.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("port_name", &self.port_name)
            .field("buffered", &self.rx.len())
            .finish()
    }
}

/// Names of the serial ports present on this machine.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| Error::Link(format!("cannot enumerate serial ports: {e}")))?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
