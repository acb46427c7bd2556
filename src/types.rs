use crate::consts::{DMX_FRAME_SIZE, FIXTURE_FOOTPRINT, MAX_START_ADDRESS};

/// A vector that contains one full DMX frame. The first byte is the start
/// code slot; builders always fill it to exactly [DMX_FRAME_SIZE] bytes.
pub type DmxFrame = heapless::Vec<u8, DMX_FRAME_SIZE>;

/// A fresh all-zero frame of full length.
pub fn blank_frame() -> DmxFrame {
    let mut frame = DmxFrame::new();
    frame.resize(DMX_FRAME_SIZE, 0).unwrap();

    frame
}

/// The requested address does not leave room for the fixture's rgb block
/// inside the universe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("dmx address {0} is outside 1..={MAX_START_ADDRESS}")]
pub struct InvalidAddressError(pub u16);

/// A dmx start address, indexed from 1.
///
/// A flood listens on three consecutive channels starting here, so valid
/// addresses stop at [MAX_START_ADDRESS] rather than 512.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DmxAddress(u16);

impl core::fmt::Display for DmxAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DmxAddress {
    pub fn new(address: u16) -> Result<Self, InvalidAddressError> {
        if !(1..=MAX_START_ADDRESS).contains(&address) {
            return Err(InvalidAddressError(address));
        }

        Ok(DmxAddress(address))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Frame index of the fixture's first channel (red). Channel numbers
    /// and frame indices line up because index 0 holds the start code.
    pub fn slot(&self) -> usize {
        self.0 as usize
    }

    /// Frame index just past the fixture's rgb block.
    pub fn end_slot(&self) -> usize {
        self.slot() + FIXTURE_FOOTPRINT
    }
}

impl TryFrom<u16> for DmxAddress {
    type Error = InvalidAddressError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_bounds() {
        assert_eq!(DmxAddress::new(1).unwrap().value(), 1);
        assert_eq!(DmxAddress::new(509).unwrap().value(), 509);

        assert_eq!(DmxAddress::new(0).unwrap_err(), InvalidAddressError(0));
        assert_eq!(DmxAddress::new(510).unwrap_err(), InvalidAddressError(510));
        assert_eq!(DmxAddress::new(511).unwrap_err(), InvalidAddressError(511));
        assert_eq!(DmxAddress::new(512).unwrap_err(), InvalidAddressError(512));
    }

    #[test]
    fn test_blank_frame_is_full_length_and_zero() {
        let frame = blank_frame();

        assert_eq!(frame.len(), DMX_FRAME_SIZE);
        assert!(frame.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_slots() {
        let address = DmxAddress::new(33).unwrap();

        assert_eq!(address.slot(), 33);
        assert_eq!(address.end_slot(), 36);
    }
}
