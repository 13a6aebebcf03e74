//! Measurement settings of the LTR-381RGB-01
//!
//! Each setting is a closed enum carrying its register code. Raw values
//! (bit widths, periods, multipliers, or the vendor names such as `"18_BIT"`)
//! are validated through `TryFrom`/`FromStr`, which reject anything outside
//! the table with [`InvalidArgument`].

use core::str::FromStr;

use crate::error::InvalidArgument;

/// Measurement circuit selected through MAIN_CTRL
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// ALS: ambient light sensing
    #[default]
    AmbientLight,
    /// CS: color sensing
    ColorSensor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::AmbientLight, Mode::ColorSensor];

    /// Value of the CS mode bit
    pub const fn code(self) -> u8 {
        match self {
            Mode::AmbientLight => 0,
            Mode::ColorSensor => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::AmbientLight => "ALS",
            Mode::ColorSensor => "CS",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Mode::AmbientLight),
            1 => Ok(Mode::ColorSensor),
            _ => Err(InvalidArgument),
        }
    }
}

impl FromStr for Mode {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or(InvalidArgument)
    }
}

/// ALS/CS ADC resolution. Lower resolutions integrate for a shorter time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits20,
    Bits19,
    #[default]
    Bits18,
    Bits17,
    Bits16,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Bits20,
        Resolution::Bits19,
        Resolution::Bits18,
        Resolution::Bits17,
        Resolution::Bits16,
    ];

    /// Code written to ALS_CS_MEAS_RATE bits 6:4
    pub const fn code(self) -> u8 {
        match self {
            Resolution::Bits20 => 0,
            Resolution::Bits19 => 1,
            Resolution::Bits18 => 2,
            Resolution::Bits17 => 3,
            Resolution::Bits16 => 4,
        }
    }

    /// Integration-time multiplier used to normalize counts into lux,
    /// relative to the 18-bit (100 ms) conversion
    pub const fn integration_time(self) -> f32 {
        match self {
            Resolution::Bits20 => 0.25,
            Resolution::Bits19 => 0.5,
            Resolution::Bits18 => 1.0,
            Resolution::Bits17 => 2.0,
            Resolution::Bits16 => 4.0,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits20 => 20,
            Resolution::Bits19 => 19,
            Resolution::Bits18 => 18,
            Resolution::Bits17 => 17,
            Resolution::Bits16 => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Resolution::Bits20 => "20_BIT",
            Resolution::Bits19 => "19_BIT",
            Resolution::Bits18 => "18_BIT",
            Resolution::Bits17 => "17_BIT",
            Resolution::Bits16 => "16_BIT",
        }
    }
}

/// Converts from a bit width (16 to 20)
impl TryFrom<u8> for Resolution {
    type Error = InvalidArgument;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.bits() == bits)
            .ok_or(InvalidArgument)
    }
}

impl FromStr for Resolution {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|resolution| resolution.name() == s)
            .ok_or(InvalidArgument)
    }
}

/// ALS/CS measurement period
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementRate {
    Ms25,
    Ms50,
    #[default]
    Ms100,
    Ms200,
    Ms500,
    Ms1000,
    Ms2000,
}

impl MeasurementRate {
    pub const ALL: [MeasurementRate; 7] = [
        MeasurementRate::Ms25,
        MeasurementRate::Ms50,
        MeasurementRate::Ms100,
        MeasurementRate::Ms200,
        MeasurementRate::Ms500,
        MeasurementRate::Ms1000,
        MeasurementRate::Ms2000,
    ];

    /// Code written to ALS_CS_MEAS_RATE bits 2:0
    pub const fn code(self) -> u8 {
        match self {
            MeasurementRate::Ms25 => 0,
            MeasurementRate::Ms50 => 1,
            MeasurementRate::Ms100 => 2,
            MeasurementRate::Ms200 => 3,
            MeasurementRate::Ms500 => 4,
            MeasurementRate::Ms1000 => 5,
            MeasurementRate::Ms2000 => 6,
        }
    }

    pub const fn period_ms(self) -> u16 {
        match self {
            MeasurementRate::Ms25 => 25,
            MeasurementRate::Ms50 => 50,
            MeasurementRate::Ms100 => 100,
            MeasurementRate::Ms200 => 200,
            MeasurementRate::Ms500 => 500,
            MeasurementRate::Ms1000 => 1000,
            MeasurementRate::Ms2000 => 2000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MeasurementRate::Ms25 => "25_MS",
            MeasurementRate::Ms50 => "50_MS",
            MeasurementRate::Ms100 => "100_MS",
            MeasurementRate::Ms200 => "200_MS",
            MeasurementRate::Ms500 => "500_MS",
            MeasurementRate::Ms1000 => "1000_MS",
            MeasurementRate::Ms2000 => "2000_MS",
        }
    }
}

/// Converts from a period in milliseconds
impl TryFrom<u16> for MeasurementRate {
    type Error = InvalidArgument;

    fn try_from(period_ms: u16) -> Result<Self, Self::Error> {
        MeasurementRate::ALL
            .into_iter()
            .find(|rate| rate.period_ms() == period_ms)
            .ok_or(InvalidArgument)
    }
}

impl FromStr for MeasurementRate {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementRate::ALL
            .into_iter()
            .find(|rate| rate.name() == s)
            .ok_or(InvalidArgument)
    }
}

/// ALS/CS analog gain range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    X1,
    #[default]
    X3,
    X6,
    X9,
    X18,
}

impl Gain {
    pub const ALL: [Gain; 5] = [Gain::X1, Gain::X3, Gain::X6, Gain::X9, Gain::X18];

    /// Code written to ALS_CS_GAIN bits 2:0
    pub const fn code(self) -> u8 {
        match self {
            Gain::X1 => 0,
            Gain::X3 => 1,
            Gain::X6 => 2,
            Gain::X9 => 3,
            Gain::X18 => 4,
        }
    }

    pub const fn multiplier(self) -> u8 {
        match self {
            Gain::X1 => 1,
            Gain::X3 => 3,
            Gain::X6 => 6,
            Gain::X9 => 9,
            Gain::X18 => 18,
        }
    }

    /// Next higher gain, wrapping from ×18 back to ×1
    pub const fn next(self) -> Gain {
        match self {
            Gain::X1 => Gain::X3,
            Gain::X3 => Gain::X6,
            Gain::X6 => Gain::X9,
            Gain::X9 => Gain::X18,
            Gain::X18 => Gain::X1,
        }
    }
}

/// Converts from a multiplier (1, 3, 6, 9 or 18)
impl TryFrom<u8> for Gain {
    type Error = InvalidArgument;

    fn try_from(multiplier: u8) -> Result<Self, Self::Error> {
        Gain::ALL
            .into_iter()
            .find(|gain| gain.multiplier() == multiplier)
            .ok_or(InvalidArgument)
    }
}

impl FromStr for Gain {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let multiplier = s.parse::<u8>().map_err(|_| InvalidArgument)?;
        Gain::try_from(multiplier)
    }
}

/// Complete measurement configuration. The default matches the sensor
/// state the driver assumes right after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: Mode,
    pub resolution: Resolution,
    pub rate: MeasurementRate,
    pub gain: Gain,
}
