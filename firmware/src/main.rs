#![no_std]
#![no_main]

use config::{FLASH_SIZE, WATCHDOG_TIMEOUT_MS};
use embassy_rp::{flash::Async, watchdog::Watchdog};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, mutex::Mutex, once_lock::OnceLock};

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

mod config;
mod config_resources;
mod flash_layout;
mod tasks;

use crate::config_resources::{
    AssignedResources, OpticalSensorResources, RGBLEDResources, UserButtonResources,
};
use crate::tasks::config_manager::init_config_manager;

pub type FlashType<'a> =
    embassy_rp::flash::Flash<'a, embassy_rp::peripherals::FLASH, Async, FLASH_SIZE>;
pub type MFlashType<'a> = Mutex<NoopRawMutex, FlashType<'a>>;
pub static OM_FLASH: OnceLock<MFlashType<'static>> = OnceLock::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    info!("Starting up...");

    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));

    let flash = embassy_rp::flash::Flash::<embassy_rp::peripherals::FLASH, Async, FLASH_SIZE>::new(
        p.FLASH, p.DMA_CH1,
    );
    let flash: MFlashType = Mutex::<NoopRawMutex, _>::new(flash);

    if OM_FLASH.init(flash).is_err() {
        error!("Failed to initialize flash");
        return;
    }

    info!("Initializing config manager...");
    init_config_manager(OM_FLASH.get().await).await;

    // Spawn the async tasks
    spawner
        .spawn(tasks::config_manager::config_manager_task())
        .unwrap();

    spawner
        .spawn(tasks::optical_sensor::optical_sensor_task(r.optical_sensor))
        .unwrap();

    spawner
        .spawn(tasks::led_indicator::led_indicator_task(r.rgb_led))
        .unwrap();

    spawner
        .spawn(tasks::user_button::user_button_task(r.user_button))
        .unwrap();

    loop {
        Timer::after(Duration::from_secs(1)).await;
        watchdog.feed();
    }
}
