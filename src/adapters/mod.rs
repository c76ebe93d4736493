//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                 |
//! |------------|------------------|-----------------------------|
//! | `hardware` | SensorPort       | DHT11 (single-wire GPIO)    |
//! |            | TextDisplayPort  | HD44780 16x2 LCD (4-bit)    |
//! |            | MatrixPort       | MAX7219 8x8 LED matrix      |
//! |            | TonePort         | Piezo buzzer on LEDC PWM    |
//! | `log_sink` | EventSink        | Serial log output           |

pub mod hardware;
pub mod log_sink;
