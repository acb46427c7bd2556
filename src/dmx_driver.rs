use crate::types::DmxFrame;

#[derive(Debug)]
pub enum DmxSendError<E> {
    /// There were fewer bytes written to the uart than the frame holds.
    UartOverflow,
    /// An error raised by the uart driver.
    DriverError(E),
}

impl<E: core::fmt::Display> core::fmt::Display for DmxSendError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DmxSendError::UartOverflow => write!(f, "uart overflowed"),
            DmxSendError::DriverError(error) => error.fmt(f),
        }
    }
}

impl<E: core::fmt::Display + core::fmt::Debug> std::error::Error for DmxSendError<E> {}

impl<E> From<E> for DmxSendError<E> {
    fn from(value: E) -> Self {
        Self::DriverError(value)
    }
}

/// Object to implement access to a dmx transmitter.
/// It has to communicate at 250000 baud.
pub trait DmxTransmitDriver {
    /// The driver specific error.
    type DriverError;

    /// Transmit one complete frame, break and mark-after-break included.
    fn send_frame(&mut self, frame: &DmxFrame) -> Result<(), DmxSendError<Self::DriverError>>;
}
