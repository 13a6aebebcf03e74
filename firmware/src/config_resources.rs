// Pin mapping on the Raspberry Pi Pico carrier board
//
//| GPIO # | Name        | Description                                          |
//| ------ | ----------- | ---------------------------------------------------- |
//| 14     | I2C1_SDA    | LTR-381RGB-01 data line. The controller is primary.  |
//| 15     | I2C1_SCL    | LTR-381RGB-01 clock line.                            |
//| 22     | NEOPIXEL    | Data output for the WS2812 color indicator.          |
//| 26     | USER_BTN    | Gain select button. Active low, internal pull-up.    |

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
  optical_sensor: OpticalSensorResources {
    sda: PIN_14,
    scl: PIN_15,
    i2c: I2C1,
  },
  rgb_led: RGBLEDResources {
    dma_ch: DMA_CH0,
    pin: PIN_22,
    pio: PIO0,
  },
  user_button: UserButtonResources {
    pin: PIN_26,
  },
}
