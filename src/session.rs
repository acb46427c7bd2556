//! One complete programming transaction against one serial device.

use crate::dmx_driver::{DmxSendError, DmxTransmitDriver};
use crate::flasher::{run_indicator, FlashConfig};
use crate::packet::build_programming_frame;
use crate::serial_driver::{SerialDriverError, TirSerialDriver};
use crate::types::DmxAddress;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Serial(#[from] SerialDriverError),
    #[error(transparent)]
    Send(#[from] DmxSendError<SerialDriverError>),
}

/// Inputs for one run, validated by the shell before hardware is touched.
#[derive(Debug, Clone)]
pub struct Session {
    /// Serial device the dmx adapter lives on.
    pub device: String,
    /// Address to program and/or indicate.
    pub address: DmxAddress,
    /// Presence switches the run into programming mode.
    pub serial_number: Option<u32>,
    /// Full off/green indicator cycles.
    pub flashes: u32,
}

impl Session {
    /// Run the transaction: send the programming frame if a serial number
    /// was given, then flash the addressed fixture, then release the device.
    pub fn run(&self) -> Result<(), SessionError> {
        let mut driver = TirSerialDriver::open(&self.device)?;

        if let Some(serial_number) = self.serial_number {
            log::debug!(
                "programming fixture {} to address {}",
                serial_number,
                self.address
            );
            let frame = build_programming_frame(serial_number, self.address);
            driver.send_frame(&frame)?;
        }

        let config = FlashConfig {
            flashes: self.flashes,
            after_programming: self.serial_number.is_some(),
            ..FlashConfig::default()
        };
        run_indicator(&mut driver, self.address, &config)?;

        driver.close()?;

        Ok(())
    }
}
