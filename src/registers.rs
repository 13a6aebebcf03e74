//! LTR-381RGB-01 register map
//!
//! Addresses and bit fields of the registers the driver touches. Fields are
//! described by their position and width so that read-modify-write updates
//! keep the neighbouring bits of a shared register intact.

/// Default 7-bit I2C address of the sensor
pub const DEFAULT_ADDRESS: u8 = 0x53;

/// Value of [`PART_ID`] on a genuine LTR-381RGB-01
pub const EXPECTED_PART_ID: u8 = 0xC2;

pub const MAIN_CTRL: u8 = 0x00;
pub const ALS_CS_MEAS_RATE: u8 = 0x04;
pub const ALS_CS_GAIN: u8 = 0x05;
pub const PART_ID: u8 = 0x06;
pub const MAIN_STATUS: u8 = 0x07;

// Data block: IR, green, red, blue, three bytes each, LSB first
pub const CS_DATA_IR_0: u8 = 0x0A;
pub const CS_DATA_GREEN_0: u8 = 0x0D;
pub const CS_DATA_RED_0: u8 = 0x10;
pub const CS_DATA_BLUE_0: u8 = 0x13;

/// Length of the contiguous data block starting at [`CS_DATA_IR_0`]
pub const CS_DATA_LEN: usize = 12;

/// MAIN_CTRL bit 1: ALS/CS measurement enable
pub const ALS_CS_ENABLE: Field = Field::new(1, 1);
/// MAIN_CTRL bit 2: 0 = ALS mode, 1 = CS mode
pub const CS_MODE: Field = Field::new(2, 1);
/// ALS_CS_MEAS_RATE bits 6:4
pub const ALS_CS_RESOLUTION: Field = Field::new(4, 3);
/// ALS_CS_MEAS_RATE bits 2:0
pub const ALS_CS_RATE: Field = Field::new(0, 3);
/// ALS_CS_GAIN bits 2:0
pub const ALS_CS_GAIN_RANGE: Field = Field::new(0, 3);
/// MAIN_STATUS bit 3: new data available since last read
pub const ALS_CS_DATA_STATUS: Field = Field::new(3, 1);

/// A bit field inside an 8-bit register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Mask of the field in register position
    pub const fn mask(&self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Replace the field inside `register` with `value`, keeping the other bits.
    /// Bits of `value` beyond the field width are dropped.
    pub const fn apply(&self, register: u8, value: u8) -> u8 {
        (register & !self.mask()) | ((value << self.shift) & self.mask())
    }

    pub const fn extract(&self, register: u8) -> u8 {
        (register & self.mask()) >> self.shift
    }

    pub const fn is_set(&self, register: u8) -> bool {
        self.extract(register) != 0
    }
}
