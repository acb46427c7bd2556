//! Builders for the two frame shapes this tool puts on the wire: the vendor
//! programming frame that rewrites a flood's start address, and the red/green
//! indicator frame used to point out which fixture answers to that address.
//!
//! Both builders are pure; each call allocates a fresh frame.

use crate::consts::{
    CHANNEL_FULL, CHECKSUM1_BASE, CHECKSUM2_BASE, CHECKSUM_REFERENCE_ADDRESS,
    CHECKSUM_REFERENCE_SERIAL, DMX_FRAME_SIZE, FIXTURE_FOOTPRINT, TIR_DEVICE_CONST_A,
    TIR_DEVICE_CONST_B, TIR_MODEL_TAG, TIR_MODE_BYTE, TIR_PRESET_LABEL, TIR_SIGNATURE,
};
use crate::layouts::programming_frame_layout;
use crate::types::{blank_frame, DmxAddress, DmxFrame};

/// What the addressed fixture's block shows during one half of a flash cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndicatorState {
    Off,
    Green,
}

impl IndicatorState {
    pub fn toggled(self) -> Self {
        match self {
            IndicatorState::Off => IndicatorState::Green,
            IndicatorState::Green => IndicatorState::Off,
        }
    }
}

/// Wrap a possibly-negative intermediate into a dmx byte.
#[inline]
fn mod256(value: i64) -> i64 {
    value.rem_euclid(256)
}

/// Checksum pair for a programming frame.
///
/// Calibrated against a single known-good capture: the reference sample
/// (serial 3080000 at address 1) yields the base pair 0x46/0xCA, everything
/// else is a delta from there. The correction term was fitted, not derived
/// from vendor documentation; keep the arithmetic bit for bit, the fixtures
/// expect exactly this.
pub fn checksum_pair(serial_number: u32, address: DmxAddress) -> [u8; 2] {
    let s = i64::from(serial_number) - i64::from(CHECKSUM_REFERENCE_SERIAL);
    let a = i64::from(address.value()) - i64::from(CHECKSUM_REFERENCE_ADDRESS);

    let mut correction = if s > 191 {
        if s - 192 > 255 {
            (s - 192) / 256 + 2
        } else {
            2
        }
    } else {
        0
    };
    if a >= 255 {
        correction += 1;
    }

    let sum = mod256(s + a);
    let checksum1 = mod256(mod256(sum + i64::from(CHECKSUM1_BASE)) + correction);
    let checksum2 = mod256(mod256(sum * 2 + i64::from(CHECKSUM2_BASE)) + correction * 2);

    [checksum1 as u8, checksum2 as u8]
}

/// Build the vendor frame that reprograms a flood's start address.
///
/// Only the low 24 bits of the serial number go on the wire, most significant
/// byte first; the checksum still covers the full value. A fixture in
/// programming mode that matches the serial number latches the new address.
pub fn build_programming_frame(serial_number: u32, address: DmxAddress) -> DmxFrame {
    let mut frame = blank_frame();
    let mut view = programming_frame_layout::View::new(frame.as_mut_slice());

    view.signature_mut().copy_from_slice(&TIR_SIGNATURE);
    view.model_tag_mut().copy_from_slice(TIR_MODEL_TAG);
    view.serial_number_mut()
        .copy_from_slice(&serial_number.to_be_bytes()[1..]);
    view.start_address_mut().write(address.value());
    view.mode_mut().write(TIR_MODE_BYTE);
    view.device_const_a_mut().copy_from_slice(&TIR_DEVICE_CONST_A);
    view.device_const_b_mut().copy_from_slice(&TIR_DEVICE_CONST_B);
    view.preset_label_mut().copy_from_slice(TIR_PRESET_LABEL);
    view.checksum_mut()
        .copy_from_slice(&checksum_pair(serial_number, address));

    frame
}

/// Build the all-red universe with the addressed fixture's block either dark
/// or green.
///
/// Every flood on the line lights red; the one being addressed blinks green
/// against that background, which is how an operator confirms the address
/// took.
pub fn build_indicator_frame(address: DmxAddress, state: IndicatorState) -> DmxFrame {
    let mut frame = blank_frame();

    // red is the first channel of every 3-channel block
    for slot in (1..DMX_FRAME_SIZE).step_by(FIXTURE_FOOTPRINT) {
        frame[slot] = CHANNEL_FULL;
    }

    frame[address.slot()..address.end_slot()].fill(0);
    if state == IndicatorState::Green {
        frame[address.slot() + 1] = CHANNEL_FULL;
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DMX_FRAME_SIZE;

    fn address(value: u16) -> DmxAddress {
        DmxAddress::new(value).unwrap()
    }

    #[test]
    fn test_checksum_reference_sample() {
        // the capture the constants were calibrated against
        assert_eq!(checksum_pair(3_080_000, address(1)), [0x46, 0xCA]);
    }

    #[test]
    fn test_checksum_forum_fixture() {
        // serial 3080852 at address 33, the vendor-forum calibration sample
        assert_eq!(checksum_pair(3_080_852, address(33)), [0xBE, 0xBA]);
    }

    #[test]
    fn test_checksum_address_carry() {
        // address delta of 255 or more adds one to the correction term
        assert_eq!(checksum_pair(3_080_000, address(300)), [0x72, 0x22]);
    }

    #[test]
    fn test_checksum_below_reference_serial() {
        // serial below the reference makes the intermediates negative;
        // they must wrap into 0..=255 instead of following C-style remainder
        assert_eq!(checksum_pair(3_079_999, address(1)), [0x45, 0xC8]);
    }

    #[test]
    fn test_programming_frame_is_deterministic() {
        let first = build_programming_frame(3_080_852, address(33));
        let second = build_programming_frame(3_080_852, address(33));

        assert_eq!(first, second);
        assert_eq!(first.len(), DMX_FRAME_SIZE);
    }

    #[test]
    fn test_programming_frame_field_placement() {
        let frame = build_programming_frame(3_080_852, address(289));

        assert_eq!(&frame[0..2], &[0x37, 0x07]);
        assert_eq!(&frame[2..11], b"TIRLUMV15");
        assert_eq!(&frame[11..13], &[0, 0]);
        // 3080852 = 0x2F0294
        assert_eq!(&frame[13..16], &[0x2F, 0x02, 0x94]);
        // 289 = 0x0121
        assert_eq!(&frame[16..18], &[0x01, 0x21]);
        assert_eq!(frame[18], 0x18);
        assert_eq!(frame[19], 0x00);
        assert_eq!(&frame[20..23], &[0xEC, 0x40, 0x41]);
        assert_eq!(frame[23], 0x00);
        assert_eq!(&frame[24..27], &[0x70, 0x56, 0x01]);
        assert_eq!(frame[27], 0x00);
        assert_eq!(&frame[28..36], b"preset00");
        assert!(frame[36..52].iter().all(|&byte| byte == 0));
        assert_eq!(&frame[52..54], &checksum_pair(3_080_852, address(289)));
        assert!(frame[54..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_programming_frame_truncates_serial_to_24_bits() {
        let frame = build_programming_frame(0x0100_0000 | 0x00AB_CDEF, address(1));

        assert_eq!(&frame[13..16], &[0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_indicator_frame_outside_target_block() {
        // one address per residue class, so the target block overlaps the
        // red grid at each of its three positions
        for value in [42u16, 43, 44] {
            let target = address(value);
            for state in [IndicatorState::Off, IndicatorState::Green] {
                let frame = build_indicator_frame(target, state);
                let block = target.slot()..target.end_slot();

                assert_eq!(frame.len(), DMX_FRAME_SIZE);
                assert_eq!(frame[0], 0x00, "start code");
                for slot in 1..DMX_FRAME_SIZE {
                    if block.contains(&slot) {
                        continue;
                    }
                    let expected = if slot % 3 == 1 { 0xFF } else { 0x00 };
                    assert_eq!(frame[slot], expected, "slot {slot}");
                }
            }
        }
    }

    #[test]
    fn test_indicator_frame_target_block() {
        let target = address(42);

        let off = build_indicator_frame(target, IndicatorState::Off);
        assert_eq!(&off[42..45], &[0, 0, 0]);

        let green = build_indicator_frame(target, IndicatorState::Green);
        assert_eq!(&green[42..45], &[0, 0xFF, 0]);
    }

    #[test]
    fn test_indicator_frame_boundary_addresses() {
        for value in [1, 509] {
            let target = address(value);
            let frame = build_indicator_frame(target, IndicatorState::Green);

            assert_eq!(frame.len(), DMX_FRAME_SIZE);
            assert_eq!(frame[target.slot() + 1], 0xFF);
        }
    }

    #[test]
    fn test_indicator_state_toggles() {
        assert_eq!(IndicatorState::Green.toggled(), IndicatorState::Off);
        assert_eq!(IndicatorState::Off.toggled(), IndicatorState::Green);
    }
}
