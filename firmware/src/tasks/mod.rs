pub mod config_manager;
pub mod led_indicator;
pub mod optical_sensor;
pub mod user_button;
