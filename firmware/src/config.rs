use ltr381rgb::{Gain, MeasurementRate, Mode, Resolution};

// I2C address of the LTR-381RGB-01
pub const SENSOR_I2C_ADDR: u8 = ltr381rgb::DEFAULT_ADDRESS;
pub const SENSOR_I2C_FREQUENCY_HZ: u32 = 400_000;

// How often the sensor task checks for new data
pub const POLL_INTERVAL_MS: u64 = 500;

// Stored sensor settings are raw numbers (bit width, milliseconds,
// multiplier) so they survive reordering of the driver enums.
pub const SENSOR_MODE_CONFIG_KEY: u16 = 0x2001;
pub const DEFAULT_SENSOR_MODE: Mode = Mode::AmbientLight;
pub const SENSOR_RESOLUTION_CONFIG_KEY: u16 = 0x2002;
pub const DEFAULT_SENSOR_RESOLUTION: Resolution = Resolution::Bits18;
pub const SENSOR_RATE_CONFIG_KEY: u16 = 0x2003;
pub const DEFAULT_SENSOR_RATE: MeasurementRate = MeasurementRate::Ms100;
pub const SENSOR_GAIN_CONFIG_KEY: u16 = 0x2004;
pub const DEFAULT_SENSOR_GAIN: Gain = Gain::X3;

// Window factor compensating the attenuation of the cover glass
pub const SENSOR_WFAC_CONFIG_KEY: u16 = 0x2005;
pub const DEFAULT_SENSOR_WFAC: f32 = 1.0;

pub const LED_BRIGHTNESS_CONFIG_KEY: u16 = 0x1001;
pub const DEFAULT_LED_BRIGHTNESS: u8 = 0x66; // 40 %

pub const NUM_LEDS: usize = 1;

pub const BUTTON_DEBOUNCE_MS: u64 = 50;

pub const WATCHDOG_TIMEOUT_MS: u64 = 8_000;

pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
