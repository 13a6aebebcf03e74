use defmt::{debug, error, info, trace, warn};
use embassy_executor::task;
use embassy_rp::i2c;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal::i2c::I2c;
use ltr381rgb::{Error, Ltr381rgb, Sample};

use crate::config::{POLL_INTERVAL_MS, SENSOR_I2C_ADDR, SENSOR_I2C_FREQUENCY_HZ};
use crate::config_resources::OpticalSensorResources;
use crate::tasks::config_manager::{get_sensor_config, get_sensor_wfac, set_sensor_config};

#[derive(defmt::Format)]
pub enum OpticalSensorEvents {
    /// Step to the next gain, wrapping from x18 back to x1
    CycleGain,
}

pub type OpticalSensorChannelType =
    channel::Channel<CriticalSectionRawMutex, OpticalSensorEvents, 4>;
pub static OPTICAL_SENSOR_EVENT_CHANNEL: OpticalSensorChannelType = channel::Channel::new();

/// Latest sample with fresh data, consumed by the LED indicator
pub static OPTICAL_SAMPLE_SIGNAL: Signal<CriticalSectionRawMutex, Sample> = Signal::new();

fn apply_event<I2C: I2c>(
    sensor: &mut Ltr381rgb<I2C>,
    event: OpticalSensorEvents,
) -> Result<(), Error<I2C::Error>> {
    match event {
        OpticalSensorEvents::CycleGain => sensor.set_gain(sensor.gain().next()),
    }
}

#[task]
pub async fn optical_sensor_task(r: OpticalSensorResources) {
    info!("Initializing optical sensor task");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = SENSOR_I2C_FREQUENCY_HZ;
    let bus = i2c::I2c::new_blocking(r.i2c, r.scl, r.sda, i2c_config);

    let wfac = get_sensor_wfac().await;
    let mut sensor = match Ltr381rgb::with_address(bus, SENSOR_I2C_ADDR, wfac) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Optical sensor not available: {}, check your wiring", e);
            return;
        }
    };

    let config = get_sensor_config().await;
    if let Err(e) = sensor.configure(config) {
        error!("Failed to configure optical sensor: {}", e);
    }
    if let Err(e) = sensor.enable(&mut Delay) {
        error!("Failed to enable optical sensor: {}", e);
        return;
    }
    info!(
        "Optical sensor running: mode {}, resolution {}, rate {}, gain x{}, wfac {}",
        sensor.mode().name(),
        sensor.resolution().name(),
        sensor.rate().name(),
        sensor.gain().multiplier(),
        sensor.wfac()
    );

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let receiver = OPTICAL_SENSOR_EVENT_CHANNEL.receiver();

    loop {
        ticker.next().await;

        while let Ok(event) = receiver.try_receive() {
            debug!("Received optical sensor event: {:?}", event);
            match apply_event(&mut sensor, event) {
                Ok(()) => {
                    info!("Gain set to x{}", sensor.gain().multiplier());
                    set_sensor_config(sensor.config()).await;
                }
                Err(e) => warn!("Failed to apply sensor setting: {}", e),
            }
        }

        match sensor.is_data_new() {
            Ok(true) => {}
            Ok(false) => {
                trace!("No new optical data");
                continue;
            }
            Err(e) => {
                warn!("Failed to read sensor status: {}", e);
                continue;
            }
        }

        let sample = match sensor.read_raw() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Failed to read sensor data: {}", e);
                continue;
            }
        };

        match sensor.lux(&sample) {
            Ok(lux) => info!("ALS: {} lx", lux),
            Err(e) => warn!("No lux value: {}", e),
        }
        info!(
            "IR: {} | G: {} | R: {} | B: {}",
            sample.ir, sample.green, sample.red, sample.blue
        );

        OPTICAL_SAMPLE_SIGNAL.signal(sample);
    }
}
