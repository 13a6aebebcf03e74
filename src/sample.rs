//! Raw four-channel sample and the derived lux value

use crate::config::Gain;
use crate::registers::{CS_DATA_BLUE_0, CS_DATA_GREEN_0, CS_DATA_IR_0, CS_DATA_LEN, CS_DATA_RED_0};

/// One reading of the IR, green, red and blue channels (24-bit counts)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub ir: u32,
    pub green: u32,
    pub red: u32,
    pub blue: u32,
}

#[inline]
fn u24_le(bytes: &[u8; CS_DATA_LEN], offset: u8) -> u32 {
    let i = (offset - CS_DATA_IR_0) as usize;
    u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], 0])
}

impl Sample {
    pub const fn new(ir: u32, green: u32, red: u32, blue: u32) -> Self {
        Self {
            ir,
            green,
            red,
            blue,
        }
    }

    /// Assemble a sample from the data block read at CS_DATA_IR_0
    pub fn from_le_bytes(bytes: [u8; CS_DATA_LEN]) -> Self {
        Self {
            ir: u24_le(&bytes, CS_DATA_IR_0),
            green: u24_le(&bytes, CS_DATA_GREEN_0),
            red: u24_le(&bytes, CS_DATA_RED_0),
            blue: u24_le(&bytes, CS_DATA_BLUE_0),
        }
    }

    /// Channels in register order: (ir, green, red, blue)
    pub const fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.ir, self.green, self.red, self.blue)
    }

    /// Illuminance in lux.
    ///
    /// `lux = 0.8 * G / (gain * it) * (1 - 0.033 * IR / G) * wfac`
    ///
    /// Returns `None` when the green channel is zero since the formula
    /// divides by it.
    pub fn lux(&self, gain: Gain, integration_time: f32, wfac: f32) -> Option<f32> {
        if self.green == 0 {
            return None;
        }
        let green = self.green as f32;
        let ir = self.ir as f32;
        let gain = gain.multiplier() as f32;

        Some(0.8 * green / (gain * integration_time) * (1.0 - 0.033 * ir / green) * wfac)
    }

    /// Red, green and blue scaled so the strongest channel becomes 255.
    /// A dark sample stays black.
    pub fn normalized_rgb(&self) -> [u8; 3] {
        let max = self.red.max(self.green).max(self.blue);
        if max == 0 {
            return [0, 0, 0];
        }
        let scale = |channel: u32| ((channel as u64 * 255) / max as u64) as u8;
        [scale(self.red), scale(self.green), scale(self.blue)]
    }
}

impl From<Sample> for (u32, u32, u32, u32) {
    fn from(sample: Sample) -> Self {
        sample.as_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Resolution;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.001,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_from_le_bytes() {
        let bytes = [
            0x01, 0x02, 0x03, 0x10, 0x11, 0x12, 0x20, 0x21, 0x22, 0x30, 0x31, 0x32,
        ];
        let sample = Sample::from_le_bytes(bytes);
        assert_eq!(sample.as_tuple(), (0x030201, 0x121110, 0x222120, 0x323130));
    }

    #[test]
    fn test_from_le_bytes_full_scale() {
        let sample = Sample::from_le_bytes([0xFF; CS_DATA_LEN]);
        assert_eq!(sample, Sample::new(0xFF_FFFF, 0xFF_FFFF, 0xFF_FFFF, 0xFF_FFFF));
    }

    #[test]
    fn test_lux_matches_reference_readings() {
        // Readings captured at gain x3, 18-bit resolution, wfac 1.0
        let it = Resolution::Bits18.integration_time();
        let lux = Sample::new(5, 453, 441, 145).lux(Gain::X3, it, 1.0).unwrap();
        assert_close(lux, 120.756);
        let lux = Sample::new(5, 419, 413, 132).lux(Gain::X3, it, 1.0).unwrap();
        assert_close(lux, 111.689);
    }

    #[test]
    fn test_lux_scales_with_gain_integration_time_and_wfac() {
        let sample = Sample::new(0, 1000, 0, 0);
        assert_close(sample.lux(Gain::X1, 1.0, 1.0).unwrap(), 800.0);
        assert_close(sample.lux(Gain::X18, 1.0, 1.0).unwrap(), 800.0 / 18.0);
        assert_close(sample.lux(Gain::X1, 0.25, 1.0).unwrap(), 3200.0);
        assert_close(sample.lux(Gain::X1, 4.0, 1.5).unwrap(), 300.0);
    }

    #[test]
    fn test_lux_zero_green() {
        assert_eq!(Sample::new(100, 0, 50, 50).lux(Gain::X3, 1.0, 1.0), None);
    }

    #[test]
    fn test_normalized_rgb() {
        assert_eq!(Sample::new(9, 453, 441, 145).normalized_rgb(), [248, 255, 81]);
        assert_eq!(Sample::new(0, 0, 0, 0).normalized_rgb(), [0, 0, 0]);
        assert_eq!(Sample::new(0, 0, 0xFF_FFFF, 0).normalized_rgb(), [255, 0, 0]);
    }
}
