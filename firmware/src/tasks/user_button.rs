use defmt::{debug, info};
use embassy_executor::task;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::config_resources::UserButtonResources;
use crate::tasks::optical_sensor::{OPTICAL_SENSOR_EVENT_CHANNEL, OpticalSensorEvents};

/// Each press of the user button steps the sensor gain
#[task]
pub async fn user_button_task(r: UserButtonResources) {
    info!("Starting user button task");

    let mut button = Input::new(r.pin, Pull::Up);

    info!("User button task initialized");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if button.is_high() {
            // bounce
            continue;
        }
        debug!("User button pressed");
        OPTICAL_SENSOR_EVENT_CHANNEL
            .send(OpticalSensorEvents::CycleGain)
            .await;

        button.wait_for_high().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
    }
}
