//! Device drivers and the tick timer.
//!
//! Chip drivers are generic over `embedded-hal` 1.0 traits so they run
//! against esp-idf-hal pins on the device and against mocks on the host.

pub mod animation;
pub mod hw_timer;
pub mod lcd;
pub mod max7219;
pub mod tone;
