//! Rust library and command-line tool for programming the DMX512 network
//! address of TIR commercial led flood lights over a serial rs485 adapter.
//!
//! A flood in programming mode listens for a vendor frame that carries its
//! serial number, the new start address and a derived checksum pair in place
//! of regular channel data. After programming, the tool blinks the fixture's
//! new address green against an all-red universe so an operator can confirm
//! the change by eye. Frames go out with standard DMX512 framing: break,
//! mark-after-break, then the full 513-byte universe at 250000 baud.
//!
//! The checksum constants were reverse-engineered from a single known-good
//! capture, not from vendor documentation. They are reproduced bit for bit;
//! see [packet::checksum_pair].
//!
//! # Usage
//!
//! ```no_run
//! use dmx_tir::dmx_driver::DmxTransmitDriver;
//! use dmx_tir::flasher::{run_indicator, FlashConfig};
//! use dmx_tir::packet::build_programming_frame;
//! use dmx_tir::serial_driver::TirSerialDriver;
//! use dmx_tir::types::DmxAddress;
//!
//! let address = DmxAddress::new(33).unwrap();
//! let mut driver = TirSerialDriver::open("/dev/ttyUSB0").unwrap();
//!
//! // move the flood with serial number 3080852 to address 33
//! let frame = build_programming_frame(3_080_852, address);
//! driver.send_frame(&frame).unwrap();
//!
//! // then blink its block green; the first cycle is eaten by the fixture
//! // leaving programming mode, so ask for one extra
//! let config = FlashConfig {
//!     after_programming: true,
//!     ..FlashConfig::default()
//! };
//! run_indicator(&mut driver, address, &config).unwrap();
//!
//! driver.close().unwrap();
//! ```

pub mod consts;
/// Module for putting frames on a wire through interchangeable drivers.
pub mod dmx_driver;
/// Visual confirmation loop for the programmed address.
pub mod flasher;
mod layouts;
/// Builders for the programming and indicator frames.
pub mod packet;
/// Linux serial implementation of the transmit driver.
pub mod serial_driver;
pub mod session;
pub mod types;
