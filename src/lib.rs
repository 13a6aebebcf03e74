//! Blocking driver for the Lite-On LTR-381RGB-01 ambient light and color
//! sensor, built on the `embedded-hal` 1.0 I2C and delay traits.
//!
//! ```ignore
//! let mut sensor = Ltr381rgb::new(i2c)?;
//! sensor.set_gain(Gain::X9)?;
//! sensor.enable(&mut delay)?;
//!
//! let sample = sensor.read_raw()?;
//! let lux = sensor.lux(&sample)?;
//! ```
//!
//! Settings are typed. Raw values coming from configuration storage or a
//! user interface go through `TryFrom`/`FromStr` first, which is where
//! out-of-range values are rejected with [`InvalidArgument`].
//!
//! Enable the `defmt` feature to derive `defmt::Format` on the public types
//! and have the driver log through defmt.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
pub mod error;
pub mod registers;
pub mod sample;

#[cfg(test)]
mod mock;

pub use config::{Config, Gain, MeasurementRate, Mode, Resolution};
pub use driver::{ENABLE_SETTLE_MS, Ltr381rgb};
pub use error::{Error, InvalidArgument};
pub use registers::DEFAULT_ADDRESS;
pub use sample::Sample;
