use defmt::{debug, error, info, warn};
use embassy_executor::task;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::once_lock::OnceLock;
use ltr381rgb::{Config, Gain, MeasurementRate, Mode, Resolution};
use sequential_storage::cache::NoCache;
use sequential_storage::map::{Value, fetch_item, store_item};
use serde::{Deserialize, Serialize};

use crate::flash_layout::get_config_storage_range;
use crate::{MFlashType, config::*};

#[derive(Debug, defmt::Format)]
pub enum ConfigError {
    Storage,
}

impl From<sequential_storage::Error<embassy_rp::flash::Error>> for ConfigError {
    fn from(_: sequential_storage::Error<embassy_rp::flash::Error>) -> Self {
        ConfigError::Storage
    }
}

#[derive(defmt::Format)]
pub enum ConfigManagerEvents {
    SensorConfig(Config),
}

pub type ConfigManagerChannelType =
    channel::Channel<CriticalSectionRawMutex, ConfigManagerEvents, 8>;
pub static CONFIG_MANAGER_EVENT_CHANNEL: ConfigManagerChannelType = channel::Channel::new();

// Configuration manager using sequential-storage
pub struct ConfigManager {
    flash: &'static MFlashType<'static>,
    data_buffer: [u8; 128],
}

static CONFIG_MANAGER: OnceLock<Mutex<CriticalSectionRawMutex, ConfigManager>> = OnceLock::new();

impl ConfigManager {
    fn new(flash: &'static MFlashType<'static>) -> Self {
        Self {
            flash,
            data_buffer: [0u8; 128],
        }
    }

    /// Store a serializable value
    pub async fn set<T>(&mut self, key: u16, value: &T) -> Result<(), ConfigError>
    where
        T: for<'de> Deserialize<'de> + Serialize + for<'b> Value<'b>,
    {
        debug!("Storing item with key: {=u16:#x}", key);

        let mut flash = self.flash.lock().await;

        store_item(
            &mut *flash,
            get_config_storage_range(),
            &mut NoCache::new(),
            &mut self.data_buffer,
            &key,
            value,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to store item with key: {=u16:#x}: {}",
                key,
                defmt::Debug2Format(&e)
            );
            ConfigError::from(e)
        })
    }

    // Retrieve a value or None if not found
    pub async fn get<T>(&mut self, key: u16) -> Result<Option<T>, ConfigError>
    where
        T: for<'de> Deserialize<'de> + Serialize + for<'b> Value<'b>,
    {
        debug!("Fetching item with key: {=u16:#x}", key);

        let mut flash = self.flash.lock().await;

        fetch_item(
            &mut *flash,
            get_config_storage_range(),
            &mut NoCache::new(),
            &mut self.data_buffer,
            &key,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch item with key: {=u16:#x}: {}",
                key,
                defmt::Debug2Format(&e)
            );
            ConfigError::from(e)
        })
    }

    /// Fetch a raw stored value and convert it into a setting. Missing,
    /// unreadable and out-of-range values all yield `default`.
    async fn load<R, T>(&mut self, key: u16, default: T) -> T
    where
        R: for<'de> Deserialize<'de> + Serialize + for<'b> Value<'b> + Copy + defmt::Format,
        T: TryFrom<R>,
    {
        match self.get::<R>(key).await {
            Ok(Some(raw)) => T::try_from(raw).unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid stored value {} for key {=u16:#x}",
                    raw, key
                );
                default
            }),
            _ => default,
        }
    }

    async fn store_sensor_config(&mut self, config: Config) -> Result<(), ConfigError> {
        self.set(SENSOR_MODE_CONFIG_KEY, &config.mode.code()).await?;
        self.set(SENSOR_RESOLUTION_CONFIG_KEY, &config.resolution.bits())
            .await?;
        self.set(SENSOR_RATE_CONFIG_KEY, &config.rate.period_ms())
            .await?;
        self.set(SENSOR_GAIN_CONFIG_KEY, &config.gain.multiplier())
            .await
    }
}

/// Runtime configuration values, read from the flash storage and stored here
/// to prevent multiple reads from the flash.
struct RuntimeConfig {
    pub sensor: Config,
    pub sensor_wfac: f32,
    pub led_brightness: u8,
}

static RUNTIME_CONFIG: Mutex<CriticalSectionRawMutex, RuntimeConfig> =
    Mutex::new(RuntimeConfig {
        sensor: Config {
            mode: DEFAULT_SENSOR_MODE,
            resolution: DEFAULT_SENSOR_RESOLUTION,
            rate: DEFAULT_SENSOR_RATE,
            gain: DEFAULT_SENSOR_GAIN,
        },
        sensor_wfac: DEFAULT_SENSOR_WFAC,
        led_brightness: DEFAULT_LED_BRIGHTNESS,
    });

pub async fn get_sensor_config() -> Config {
    let config = RUNTIME_CONFIG.lock().await;
    config.sensor
}
pub async fn get_sensor_wfac() -> f32 {
    let config = RUNTIME_CONFIG.lock().await;
    config.sensor_wfac
}
pub async fn get_led_brightness() -> u8 {
    let config = RUNTIME_CONFIG.lock().await;
    config.led_brightness
}
pub async fn set_sensor_config(value: Config) {
    let mut config = RUNTIME_CONFIG.lock().await;
    if config.sensor == value {
        return;
    }
    config.sensor = value;
    CONFIG_MANAGER_EVENT_CHANNEL
        .send(ConfigManagerEvents::SensorConfig(value))
        .await;
}

/// Load the persisted settings into the runtime configuration. Must complete
/// before the tasks reading the configuration are spawned.
pub async fn init_config_manager(flash: &'static MFlashType<'static>) {
    let mut config_manager = ConfigManager::new(flash);

    let mode = config_manager
        .load::<u8, Mode>(SENSOR_MODE_CONFIG_KEY, DEFAULT_SENSOR_MODE)
        .await;
    let resolution = config_manager
        .load::<u8, Resolution>(SENSOR_RESOLUTION_CONFIG_KEY, DEFAULT_SENSOR_RESOLUTION)
        .await;
    let rate = config_manager
        .load::<u16, MeasurementRate>(SENSOR_RATE_CONFIG_KEY, DEFAULT_SENSOR_RATE)
        .await;
    let gain = config_manager
        .load::<u8, Gain>(SENSOR_GAIN_CONFIG_KEY, DEFAULT_SENSOR_GAIN)
        .await;
    let sensor = Config {
        mode,
        resolution,
        rate,
        gain,
    };
    debug!("Received sensor config: {}", sensor);

    let sensor_wfac = match config_manager.get::<f32>(SENSOR_WFAC_CONFIG_KEY).await {
        Ok(Some(wfac)) if wfac.is_finite() && wfac > 0.0 => wfac,
        Ok(Some(wfac)) => {
            warn!("Ignoring invalid stored wfac {}", wfac);
            DEFAULT_SENSOR_WFAC
        }
        _ => DEFAULT_SENSOR_WFAC,
    };
    debug!("Received sensor wfac: {}", sensor_wfac);

    let led_brightness = config_manager
        .get::<u8>(LED_BRIGHTNESS_CONFIG_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or(DEFAULT_LED_BRIGHTNESS);
    debug!("Received led brightness: {}", led_brightness);

    {
        let mut runtime_config = RUNTIME_CONFIG.lock().await;
        runtime_config.sensor = sensor;
        runtime_config.sensor_wfac = sensor_wfac;
        runtime_config.led_brightness = led_brightness;
    }
    info!("Runtime configuration updated");

    if CONFIG_MANAGER.init(Mutex::new(config_manager)).is_err() {
        error!("Config manager initialized twice");
    }
}

#[task]
pub async fn config_manager_task() {
    info!("Config manager task started");

    let config_manager_mutex = CONFIG_MANAGER.get().await;
    let receiver = CONFIG_MANAGER_EVENT_CHANNEL.receiver();

    loop {
        let event = receiver.receive().await;
        debug!("Received config manager event: {:?}", event);

        let mut config_manager = config_manager_mutex.lock().await;

        let result = match event {
            ConfigManagerEvents::SensorConfig(config) => {
                config_manager.store_sensor_config(config).await
            }
        };
        if let Err(e) = result {
            error!("Failed to persist configuration: {:?}", e);
        }
    }
}
