use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{Config, Gain, MeasurementRate, Mode, Resolution};
use crate::error::Error;
use crate::registers::*;
use crate::sample::Sample;

/// Time the first conversion needs to start after enabling measurements
pub const ENABLE_SETTLE_MS: u32 = 10;

/// LTR-381RGB-01 driver
///
/// Settings are cached on the host side. A setter only touches the bus
/// when the requested value differs from the cached one, and the cache is
/// updated only after the register write went through.
pub struct Ltr381rgb<I2C> {
    i2c: I2C,
    address: u8,
    config: Config,
    wfac: f32,
}

impl<I2C, E> Ltr381rgb<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Bind to a sensor at the default address with a window factor of 1.0
    pub fn new(i2c: I2C) -> Result<Self, Error<E>> {
        Self::with_address(i2c, DEFAULT_ADDRESS, 1.0)
    }

    /// Bind to a sensor, verifying its part id.
    ///
    /// `wfac` is the window factor compensating the cover glass attenuation;
    /// it scales every lux value computed by this driver.
    pub fn with_address(mut i2c: I2C, address: u8, wfac: f32) -> Result<Self, Error<E>> {
        let mut part_id = [0u8];
        i2c.write_read(address, &[PART_ID], &mut part_id)
            .map_err(Error::Transport)?;

        if part_id[0] != EXPECTED_PART_ID {
            warn!(
                "Unexpected part id {=u8:#x} at address {=u8:#x}",
                part_id[0], address
            );
            return Err(Error::DeviceNotFound(part_id[0]));
        }
        debug!("LTR-381RGB found at address {=u8:#x}", address);

        Ok(Self {
            i2c,
            address,
            config: Config::default(),
            wfac,
        })
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn wfac(&self) -> f32 {
        self.wfac
    }

    pub fn part_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(PART_ID)
    }

    /// Start measurements and wait for the first conversion to begin
    pub fn enable<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        self.update_field(MAIN_CTRL, ALS_CS_ENABLE, 1)?;
        delay.delay_ms(ENABLE_SETTLE_MS);
        debug!("LTR-381RGB enabled");
        Ok(())
    }

    /// Put the sensor in standby
    pub fn disable(&mut self) -> Result<(), Error<E>> {
        self.update_field(MAIN_CTRL, ALS_CS_ENABLE, 0)?;
        debug!("LTR-381RGB disabled");
        Ok(())
    }

    pub fn is_enabled(&mut self) -> Result<bool, Error<E>> {
        let main_ctrl = self.read_register(MAIN_CTRL)?;
        Ok(ALS_CS_ENABLE.is_set(main_ctrl))
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<E>> {
        if self.config.mode == mode {
            return Ok(());
        }
        self.update_field(MAIN_CTRL, CS_MODE, mode.code())?;
        self.config.mode = mode;
        debug!("Mode set to {}", mode);
        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    /// Integration-time multiplier of the current resolution
    pub fn integration_time(&self) -> f32 {
        self.config.resolution.integration_time()
    }

    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<E>> {
        if self.config.resolution == resolution {
            return Ok(());
        }
        self.update_field(ALS_CS_MEAS_RATE, ALS_CS_RESOLUTION, resolution.code())?;
        self.config.resolution = resolution;
        debug!("Resolution set to {}", resolution);
        Ok(())
    }

    pub fn rate(&self) -> MeasurementRate {
        self.config.rate
    }

    pub fn set_rate(&mut self, rate: MeasurementRate) -> Result<(), Error<E>> {
        if self.config.rate == rate {
            return Ok(());
        }
        self.update_field(ALS_CS_MEAS_RATE, ALS_CS_RATE, rate.code())?;
        self.config.rate = rate;
        debug!("Measurement rate set to {}", rate);
        Ok(())
    }

    pub fn gain(&self) -> Gain {
        self.config.gain
    }

    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<E>> {
        if self.config.gain == gain {
            return Ok(());
        }
        self.update_field(ALS_CS_GAIN, ALS_CS_GAIN_RANGE, gain.code())?;
        self.config.gain = gain;
        debug!("Gain set to {}", gain);
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Apply every field of `config`. Fields already in effect are skipped;
    /// on error the fields applied so far stay applied.
    pub fn configure(&mut self, config: Config) -> Result<(), Error<E>> {
        self.set_mode(config.mode)?;
        self.set_resolution(config.resolution)?;
        self.set_rate(config.rate)?;
        self.set_gain(config.gain)
    }

    /// True when a sample arrived since the data registers were last read
    pub fn is_data_new(&mut self) -> Result<bool, Error<E>> {
        let status = self.read_register(MAIN_STATUS)?;
        Ok(ALS_CS_DATA_STATUS.is_set(status))
    }

    /// Read the IR, green, red and blue channels in one burst
    pub fn read_raw(&mut self) -> Result<Sample, Error<E>> {
        let mut buffer = [0u8; CS_DATA_LEN];
        self.i2c
            .write_read(self.address, &[CS_DATA_IR_0], &mut buffer)
            .map_err(Error::Transport)?;
        let sample = Sample::from_le_bytes(buffer);
        trace!("Raw sample {}", sample);
        Ok(sample)
    }

    /// Read a fresh sample and convert it to lux
    pub fn read_lux(&mut self) -> Result<f32, Error<E>> {
        let sample = self.read_raw()?;
        self.lux(&sample)
    }

    /// Lux for an already read sample using the current gain, resolution
    /// and window factor
    pub fn lux(&self, sample: &Sample) -> Result<f32, Error<E>> {
        sample
            .lux(self.config.gain, self.integration_time(), self.wfac)
            .ok_or_else(|| {
                warn!("Green channel reads zero, no lux value");
                Error::ZeroGreenChannel
            })
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .map_err(Error::Transport)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::Transport)
    }

    // Read-modify-write of a single field
    fn update_field(&mut self, register: u8, field: Field, value: u8) -> Result<(), Error<E>> {
        let current = self.read_register(register)?;
        self.write_register(register, field.apply(current, value))
    }
}
