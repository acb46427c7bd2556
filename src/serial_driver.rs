//! Linux serial implementation of the transmit driver, for the usb rs485
//! adapters these floods are normally wired to.
//!
//! The uart behind such an adapter does not offer 250000 baud as one of the
//! classic termios constants. The port therefore opens at the 38400 sentinel
//! rate and the clock is redirected through the legacy custom-divisor
//! interface, which only applies at that sentinel rate.

use std::io::Write;
use std::os::fd::{AsRawFd, RawFd};
use std::thread;
use std::time::Duration;

use nix::libc::{c_char, c_int, c_uchar, c_uint, c_ulong, c_ushort};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits, TTYPort};

use crate::consts::{BREAK_MICROS, DMX_BAUD, MAB_MICROS};
use crate::dmx_driver::{DmxSendError, DmxTransmitDriver};
use crate::types::DmxFrame;

/// Rate the port runs at as far as termios is concerned; the divisor
/// override below replaces it with the dmx rate.
const SPD_CUST_SENTINEL_BAUD: u32 = 38_400;

const ASYNC_SPD_MASK: c_int = 0x1030;
const ASYNC_SPD_CUST: c_int = 0x0030;

/// struct serial_struct out of linux/serial.h
#[repr(C)]
#[allow(dead_code)]
struct SerialStruct {
    kind: c_int,
    line: c_int,
    port: c_uint,
    irq: c_int,
    flags: c_int,
    xmit_fifo_size: c_int,
    custom_divisor: c_int,
    baud_base: c_int,
    close_delay: c_ushort,
    io_type: c_char,
    reserved_char: [c_char; 1],
    hub6: c_int,
    closing_wait: c_ushort,
    closing_wait2: c_ushort,
    iomem_base: *mut c_uchar,
    iomem_reg_shift: c_ushort,
    port_high: c_uint,
    iomap_base: c_ulong,
}

nix::ioctl_read_bad!(tiocgserial, nix::libc::TIOCGSERIAL, SerialStruct);
nix::ioctl_write_ptr_bad!(tiocsserial, nix::libc::TIOCSSERIAL, SerialStruct);

#[derive(Debug, thiserror::Error)]
pub enum SerialDriverError {
    /// The device could not be opened.
    #[error("failed to open {path}: {source}")]
    DeviceOpen {
        path: String,
        source: serialport::Error,
    },
    /// The device opened but rejected the dmx line settings.
    #[error("failed to configure {path}: {source}")]
    PortConfig {
        path: String,
        source: serialport::Error,
    },
    /// The kernel rejected the custom-divisor override.
    #[error("failed to set the custom baud divisor on {path}: {source}")]
    CustomBaud { path: String, source: nix::Error },
    /// A frame write failed outright.
    #[error("frame write failed: {0}")]
    Write(#[from] std::io::Error),
    /// The driver has already been closed.
    #[error("serial device already closed")]
    PortClosed,
}

/// Owns one serial device configured for dmx signalling.
pub struct TirSerialDriver {
    port: Option<TTYPort>,
    path: String,
}

impl TirSerialDriver {
    /// Open and configure the serial device.
    ///
    /// The port ends up exclusive, raw, 8N2 at 250kbaud, with RTS held low.
    /// RTS gates the transmit direction on many rs485 dmx adapters. A
    /// partially-configured port is dropped before the error propagates.
    pub fn open(path: &str) -> Result<Self, SerialDriverError> {
        let mut port = serialport::new(path, SPD_CUST_SENTINEL_BAUD)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::Two)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_secs(1))
            .open_native()
            .map_err(|source| SerialDriverError::DeviceOpen {
                path: path.to_string(),
                source,
            })?;

        port.set_exclusive(true)
            .map_err(|source| SerialDriverError::PortConfig {
                path: path.to_string(),
                source,
            })?;
        port.write_request_to_send(false)
            .map_err(|source| SerialDriverError::PortConfig {
                path: path.to_string(),
                source,
            })?;

        set_custom_divisor(port.as_raw_fd()).map_err(|source| SerialDriverError::CustomBaud {
            path: path.to_string(),
            source,
        })?;

        log::debug!("opened {} as dmx output (fd {})", path, port.as_raw_fd());

        Ok(TirSerialDriver {
            port: Some(port),
            path: path.to_string(),
        })
    }

    /// Drain pending output and release the device.
    ///
    /// A second close reports [SerialDriverError::PortClosed] instead of
    /// touching the handle again.
    pub fn close(&mut self) -> Result<(), SerialDriverError> {
        let mut port = self.port.take().ok_or(SerialDriverError::PortClosed)?;
        port.flush()?;

        log::debug!("closed {}", self.path);

        Ok(())
    }
}

impl DmxTransmitDriver for TirSerialDriver {
    type DriverError = SerialDriverError;

    /// One frame on the wire: break, mark-after-break, then all 513 bytes.
    ///
    /// Failures while toggling the break line are logged and the write is
    /// attempted anyway; receivers drop ill-timed frames on their own, so a
    /// slipped break costs one frame at worst.
    fn send_frame(&mut self, frame: &DmxFrame) -> Result<(), DmxSendError<SerialDriverError>> {
        let port = self.port.as_mut().ok_or(SerialDriverError::PortClosed)?;

        if let Err(error) = port.set_break() {
            log::warn!("failed to assert break on {}: {}", self.path, error);
        }
        thread::sleep(Duration::from_micros(BREAK_MICROS));
        if let Err(error) = port.clear_break() {
            log::warn!("failed to clear break on {}: {}", self.path, error);
        }

        thread::sleep(Duration::from_micros(MAB_MICROS));

        let written = port.write(frame).map_err(SerialDriverError::Write)?;
        if written != frame.len() {
            return Err(DmxSendError::UartOverflow);
        }

        log::debug!("sent {} byte frame on {}", written, self.path);

        Ok(())
    }
}

/// Point the uart clock at the dmx rate by overriding the divisor derived
/// from the kernel-reported base clock.
fn set_custom_divisor(fd: RawFd) -> nix::Result<()> {
    let mut settings = unsafe { std::mem::zeroed::<SerialStruct>() };
    unsafe { tiocgserial(fd, &mut settings) }?;

    settings.custom_divisor = settings.baud_base / DMX_BAUD as c_int;
    settings.flags &= !ASYNC_SPD_MASK;
    settings.flags |= ASYNC_SPD_CUST;

    unsafe { tiocsserial(fd, &settings) }?;

    Ok(())
}
