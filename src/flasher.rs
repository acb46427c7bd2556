//! Visual confirmation loop: blink the addressed fixture green against an
//! all-red universe, one frame per second.

use std::thread;
use std::time::Duration;

use crate::consts::{DEFAULT_FLASHES, FLASH_INTERVAL_MILLIS};
use crate::dmx_driver::{DmxSendError, DmxTransmitDriver};
use crate::packet::{build_indicator_frame, IndicatorState};
use crate::types::DmxAddress;

#[derive(Debug, Copy, Clone)]
pub struct FlashConfig {
    /// Full off/green cycles to run.
    pub flashes: u32,
    /// Set when a programming frame was just sent. The fixture consumes the
    /// first cycle while it leaves programming mode, so one extra cycle is
    /// run to keep the visible count right.
    pub after_programming: bool,
    /// Dwell on each frame; half a full cycle.
    pub interval: Duration,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            flashes: DEFAULT_FLASHES,
            after_programming: false,
            interval: Duration::from_millis(FLASH_INTERVAL_MILLIS),
        }
    }
}

/// Drive the indicator sequence for one fixture through the given driver.
///
/// Starts on green, alternates every frame, and runs to completion; there is
/// no cancellation beyond killing the process. Returns the number of frames
/// sent.
pub fn run_indicator<D: DmxTransmitDriver>(
    driver: &mut D,
    address: DmxAddress,
    config: &FlashConfig,
) -> Result<u32, DmxSendError<D::DriverError>> {
    let cycles = config.flashes + u32::from(config.after_programming);

    let mut state = IndicatorState::Green;
    let mut sent = 0;
    for _ in 0..cycles * 2 {
        let frame = build_indicator_frame(address, state);
        driver.send_frame(&frame)?;
        sent += 1;

        log::debug!("indicator frame {} at address {}: {:?}", sent, address, state);

        thread::sleep(config.interval);
        state = state.toggled();
    }

    Ok(sent)
}
