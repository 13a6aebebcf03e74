use core::iter;

use defmt::{debug, info};
use embassy_executor::task;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use smart_leds::{RGB8, brightness, gamma};

use crate::config::NUM_LEDS;
use crate::config_resources::RGBLEDResources;
use crate::tasks::config_manager::get_led_brightness;
use crate::tasks::optical_sensor::OPTICAL_SAMPLE_SIGNAL;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

fn frame(color: RGB8, level: u8) -> [RGB8; NUM_LEDS] {
    let mut data = [RGB8::default(); NUM_LEDS];
    let corrected = brightness(gamma(iter::repeat(color).take(NUM_LEDS)), level);
    for (led, color) in data.iter_mut().zip(corrected) {
        *led = color;
    }
    data
}

/// Show the color of the latest sample on the NeoPixel
#[task]
pub async fn led_indicator_task(r: RGBLEDResources) {
    info!("Initializing LED indicator task");
    let Pio {
        mut common, sm0, ..
    } = Pio::new(r.pio, Irqs);

    let program = PioWs2812Program::new(&mut common);
    let mut ws2812: PioWs2812<'_, PIO0, 0, NUM_LEDS> =
        PioWs2812::new(&mut common, sm0, r.dma_ch, r.pin, &program);

    let level = get_led_brightness().await;
    debug!("LED brightness from config: {}", level);

    ws2812.write(&[RGB8::default(); NUM_LEDS]).await;

    info!("LED indicator task initialized");

    loop {
        let sample = OPTICAL_SAMPLE_SIGNAL.wait().await;
        let [red, green, blue] = sample.normalized_rgb();
        ws2812
            .write(&frame(RGB8::new(red, green, blue), level))
            .await;
    }
}
